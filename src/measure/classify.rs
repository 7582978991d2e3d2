use std::collections::BTreeMap;

use crate::schema::ParamKey;

/// How a value sits relative to its reference range. Drives the field border
/// tint in the form and nothing else — classification is advisory, never an
/// input error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeStatus {
    Low,
    High,
    Normal,
    /// Empty, unparseable, or no reference range for this parameter.
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBounds {
    pub low: f64,
    pub high: f64,
}

/// Reference bounds per parameter. Built from the canonical table, then
/// optionally adjusted by config overrides. Parameters without an entry
/// always classify as [`RangeStatus::Neutral`].
#[derive(Debug, Clone)]
pub struct RangeTable {
    bounds: BTreeMap<ParamKey, RangeBounds>,
}

impl Default for RangeTable {
    fn default() -> Self {
        Self::canonical()
    }
}

impl RangeTable {
    /// The canonical bounds. Simplified for coloring; clinical significance
    /// involves context.
    pub fn canonical() -> Self {
        let mut bounds = BTreeMap::new();
        let mut insert = |key, low, high| {
            bounds.insert(key, RangeBounds { low, high });
        };
        insert(ParamKey::FemoralTorsion, 7.0, 25.0);
        insert(ParamKey::TibialTorsion, 10.0, 40.0);
        insert(ParamKey::PatellaHeightInsallSalvati, 0.0, 1.2);
        insert(ParamKey::CatonDeschampsIndex, 0.0, 1.2);
        // Lower bound is the pathological edge; see classify().
        insert(ParamKey::PatellaTrochleaIndex, 12.5, 100.0);
        insert(ParamKey::TttgDistanceCt, 0.0, 20.0);
        insert(ParamKey::TttgDistanceMri, 0.0, 15.0);
        insert(ParamKey::TttgIndex, 0.0, 0.23);
        insert(ParamKey::TtpclDistance, 0.0, 24.0);
        // Negative tilt counts as normal.
        insert(ParamKey::PatellaTilt, f64::NEG_INFINITY, 20.0);
        insert(ParamKey::GenuValgum, 0.0, 7.0);
        insert(ParamKey::BeightonTotalScore, 0.0, 4.0);
        Self { bounds }
    }

    pub fn bounds(&self, key: ParamKey) -> Option<RangeBounds> {
        self.bounds.get(&key).copied()
    }

    pub fn set_bounds(&mut self, key: ParamKey, bounds: RangeBounds) {
        self.bounds.insert(key, bounds);
    }

    /// Classify a parsed value against this table.
    ///
    /// Two parameters deviate from the plain low/high rule: the
    /// Patella-Trochlea Index is inverted (values at or above the lower bound
    /// are normal, the upper bound is ignored), and the Beighton total is
    /// one-sided (values at or below the upper bound are normal).
    pub fn classify_value(&self, key: ParamKey, value: f64) -> RangeStatus {
        let Some(range) = self.bounds(key) else {
            return RangeStatus::Neutral;
        };

        match key {
            ParamKey::PatellaTrochleaIndex => {
                if value >= range.low {
                    RangeStatus::Normal
                } else {
                    RangeStatus::Low
                }
            }
            ParamKey::BeightonTotalScore => {
                if value <= range.high {
                    RangeStatus::Normal
                } else {
                    RangeStatus::High
                }
            }
            _ => {
                if value < range.low {
                    RangeStatus::Low
                } else if value > range.high {
                    RangeStatus::High
                } else {
                    RangeStatus::Normal
                }
            }
        }
    }

    /// Classify raw entry text. Empty and unparseable input is neutral.
    pub fn classify_text(&self, key: ParamKey, raw: &str) -> RangeStatus {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return RangeStatus::Neutral;
        }
        match trimmed.parse::<f64>() {
            Ok(value) => self.classify_value(key, value),
            Err(_) => RangeStatus::Neutral,
        }
    }
}

/// Convenience wrapper over [`RangeTable::classify_text`].
pub fn classify(table: &RangeTable, key: ParamKey, raw: &str) -> RangeStatus {
    table.classify_text(key, raw)
}
