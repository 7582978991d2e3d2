use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::measure::{RangeBounds, RangeTable};
use crate::schema::ParamKey;
use crate::tui::theme::Theme;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub theme: Option<Theme>,
    /// Target directory for file exports and the clipboard file fallback.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
    /// Per-parameter classification bound overrides, keyed by report name.
    #[serde(default)]
    pub ranges: BTreeMap<ParamKey, RangeOverride>,
}

/// Partial override of one parameter's (low, high) bounds. A side left out
/// keeps its canonical value.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct RangeOverride {
    pub low: Option<f64>,
    pub high: Option<f64>,
}

impl Config {
    /// The canonical range table with this config's overrides applied.
    /// Call [`validate`] first; unknown-parameter partial overrides are
    /// skipped here.
    pub fn range_table(&self) -> RangeTable {
        let mut table = RangeTable::canonical();
        for (key, over) in &self.ranges {
            let base = table.bounds(*key);
            let resolved = match (base, over.low, over.high) {
                (Some(base), low, high) => RangeBounds {
                    low: low.unwrap_or(base.low),
                    high: high.unwrap_or(base.high),
                },
                (None, Some(low), Some(high)) => RangeBounds { low, high },
                (None, _, _) => continue,
            };
            table.set_bounds(*key, resolved);
        }
        table
    }
}

/// Collect every problem in the config rather than stopping at the first,
/// so one edit round fixes them all.
pub fn validate(config: &Config) -> Result<(), Vec<String>> {
    let canonical = RangeTable::canonical();
    let mut errors = Vec::new();

    for (key, over) in &config.ranges {
        let has_canonical = canonical.bounds(*key).is_some();
        if !has_canonical && (over.low.is_none() || over.high.is_none()) {
            errors.push(format!(
                "ranges.{}: parameter has no built-in bounds, both low and high are required",
                key.as_str()
            ));
            continue;
        }
        let base = canonical.bounds(*key).unwrap_or(RangeBounds {
            low: f64::NEG_INFINITY,
            high: f64::INFINITY,
        });
        let low = over.low.unwrap_or(base.low);
        let high = over.high.unwrap_or(base.high);
        if low > high {
            errors.push(format!(
                "ranges.{}: low ({}) must not exceed high ({})",
                key.as_str(),
                low,
                high
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::RangeStatus;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
theme: light
export_dir: /tmp/knee-exports
ranges:
  femoralTorsion:
    low: 5
    high: 25
  tttgDistanceMRI:
    high: 12
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.theme, Some(Theme::Light));
        assert_eq!(config.export_dir, Some(PathBuf::from("/tmp/knee-exports")));
        assert_eq!(config.ranges.len(), 2);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert!(config.theme.is_none());
        assert!(config.ranges.is_empty());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_partial_override_keeps_other_bound() {
        let yaml = "ranges:\n  tttgDistanceMRI:\n    high: 12\n";
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let table = config.range_table();
        assert_eq!(
            table.classify_text(ParamKey::TttgDistanceMri, "13"),
            RangeStatus::High
        );
        assert_eq!(
            table.classify_text(ParamKey::TttgDistanceMri, "-1"),
            RangeStatus::Low
        );
    }

    #[test]
    fn test_override_for_unbounded_parameter_requires_both() {
        let yaml = "ranges:\n  legLengthDifference:\n    high: 10\n";
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("legLengthDifference"));
    }

    #[test]
    fn test_full_override_for_unbounded_parameter() {
        let yaml = "ranges:\n  legLengthDifference:\n    low: -10\n    high: 10\n";
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert!(validate(&config).is_ok());
        let table = config.range_table();
        assert_eq!(
            table.classify_text(ParamKey::LegLengthDifference, "15.0"),
            RangeStatus::High
        );
        assert_eq!(
            table.classify_text(ParamKey::LegLengthDifference, "3"),
            RangeStatus::Normal
        );
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let yaml = "ranges:\n  femoralTorsion:\n    low: 30\n    high: 10\n";
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let errors = validate(&config).unwrap_err();
        assert!(errors[0].contains("must not exceed"));
    }
}
