//! Builds the filtered summary rows behind every export target.

use crate::measure::{beighton_total, format_one_decimal, leg_length_difference};
use crate::measure::{MeasurementSet, Side};
use crate::schema::{FieldKind, FieldSpec, ParamKey, SCHEMA};

/// Column headers of the summary table, report language.
pub const HEADER: [&str; 4] = ["Parameter", "Rechts", "Links", "Referenzbereich"];

/// One exported row: label, right value, left value, reference range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub label: String,
    pub right: String,
    pub left: String,
    pub reference: String,
}

impl SummaryRow {
    pub fn cells(&self) -> [&str; 4] {
        [&self.label, &self.right, &self.left, &self.reference]
    }
}

/// Build the rows for every parameter with qualifying data, in schema order.
///
/// Qualifying means: a true flag on either side for booleans, a non-empty
/// entry on either side for numerics, and a non-empty, non-zero value for
/// derived parameters. An all-false Beighton panel therefore exports
/// nothing, and an empty result means "nothing to export".
pub fn summary_rows(set: &MeasurementSet) -> Vec<SummaryRow> {
    SCHEMA
        .iter()
        .filter_map(|spec| build_row(set, spec))
        .collect()
}

fn build_row(set: &MeasurementSet, spec: &FieldSpec) -> Option<SummaryRow> {
    let (right, left) = match spec.kind {
        FieldKind::BooleanLr => {
            if !set.has_data(spec.key) {
                return None;
            }
            (
                flag_cell(set.flag(spec.key, Some(Side::Right))),
                flag_cell(set.flag(spec.key, Some(Side::Left))),
            )
        }
        FieldKind::BooleanSingle => {
            if !set.has_data(spec.key) {
                return None;
            }
            (flag_cell(true), "-".to_string())
        }
        FieldKind::NumericLr => {
            if !set.has_data(spec.key) {
                return None;
            }
            (
                numeric_cell(set, spec, Side::Right),
                numeric_cell(set, spec, Side::Left),
            )
        }
        FieldKind::DerivedSingle => (derived_cell(set, spec)?, "-".to_string()),
    };

    Some(SummaryRow {
        label: spec.summary_label.to_string(),
        right,
        left,
        reference: spec.reference.to_string(),
    })
}

fn flag_cell(value: bool) -> String {
    if value { "Ja" } else { "Nein" }.to_string()
}

fn numeric_cell(set: &MeasurementSet, spec: &FieldSpec, side: Side) -> String {
    let raw = set.text(spec.key, side).unwrap_or("").trim();
    if raw.is_empty() {
        return "-".to_string();
    }
    // Leg lengths are reported bare; the difference row carries the unit.
    if spec.key == ParamKey::LegLength {
        return raw.to_string();
    }
    format!("{}{}", raw, spec.unit)
}

/// Derived values qualify only when present and non-zero; zero is treated
/// as "no data".
fn derived_cell(set: &MeasurementSet, spec: &FieldSpec) -> Option<String> {
    match spec.key {
        ParamKey::LegLengthDifference => {
            let diff = leg_length_difference(set)?;
            if diff == 0.0 {
                return None;
            }
            Some(format!("{}{}", format_one_decimal(diff), spec.unit))
        }
        ParamKey::BeightonTotalScore => {
            let total = beighton_total(set);
            if total == 0 {
                return None;
            }
            Some(total.to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{spec_for, BEIGHTON_SINGLE};

    fn enter(set: &mut MeasurementSet, key: ParamKey, side: Side, value: &str) {
        *set.text_mut(key, side).unwrap() = value.to_string();
    }

    #[test]
    fn test_empty_set_exports_nothing() {
        let set = MeasurementSet::new();
        assert!(summary_rows(&set).is_empty());
    }

    #[test]
    fn test_numeric_one_side_qualifies() {
        let mut set = MeasurementSet::new();
        enter(&mut set, ParamKey::FemoralTorsion, Side::Right, "23");

        let rows = summary_rows(&set);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "Femoral Torsion (\u{b0})");
        assert_eq!(rows[0].right, "23\u{b0}");
        assert_eq!(rows[0].left, "-");
        assert_eq!(rows[0].reference, "~15\u{b0} (Path >25-30\u{b0})");
    }

    #[test]
    fn test_boolean_qualifies_when_either_side_true() {
        let mut set = MeasurementSet::new();
        set.toggle_flag(ParamKey::Mri, Some(Side::Left));

        let rows = summary_rows(&set);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].right, "Nein");
        assert_eq!(rows[0].left, "Ja");
    }

    #[test]
    fn test_false_booleans_excluded() {
        let mut set = MeasurementSet::new();
        set.toggle_flag(ParamKey::XrayEos, Some(Side::Right));
        set.toggle_flag(ParamKey::XrayEos, Some(Side::Right));
        assert!(summary_rows(&set).is_empty());
    }

    #[test]
    fn test_leg_length_reported_bare_and_difference_with_unit() {
        let mut set = MeasurementSet::new();
        enter(&mut set, ParamKey::LegLength, Side::Right, "500");
        enter(&mut set, ParamKey::LegLength, Side::Left, "485");

        let rows = summary_rows(&set);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].right, "500");
        assert_eq!(rows[0].left, "485");
        assert_eq!(rows[1].label, "Leg Length Difference (mm)");
        assert_eq!(rows[1].right, "15.0mm");
        assert_eq!(rows[1].left, "-");
    }

    #[test]
    fn test_zero_difference_excluded() {
        let mut set = MeasurementSet::new();
        enter(&mut set, ParamKey::LegLength, Side::Right, "500");
        enter(&mut set, ParamKey::LegLength, Side::Left, "500");

        let rows = summary_rows(&set);
        // Leg length itself still exports; the zero difference does not.
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "Leg Length (mm)");
    }

    #[test]
    fn test_zero_beighton_total_excluded() {
        let set = MeasurementSet::new();
        assert!(!summary_rows(&set)
            .iter()
            .any(|row| row.label.starts_with("Beighton Score")));
    }

    #[test]
    fn test_beighton_total_row() {
        let mut set = MeasurementSet::new();
        set.toggle_flag(ParamKey::BeightonElbow, Some(Side::Right));
        set.toggle_flag(BEIGHTON_SINGLE, None);

        let rows = summary_rows(&set);
        let total = rows
            .iter()
            .find(|row| row.label == "Beighton Score (0-9)")
            .unwrap();
        assert_eq!(total.right, "2");
        assert_eq!(total.left, "-");

        let trunk = rows
            .iter()
            .find(|row| row.label == spec_for(BEIGHTON_SINGLE).summary_label)
            .unwrap();
        assert_eq!(trunk.right, "Ja");
        assert_eq!(trunk.left, "-");
    }

    #[test]
    fn test_rows_follow_schema_order() {
        let mut set = MeasurementSet::new();
        enter(&mut set, ParamKey::PatellaTilt, Side::Right, "12");
        set.toggle_flag(ParamKey::Mri, Some(Side::Right));
        enter(&mut set, ParamKey::FemoralTorsion, Side::Left, "18");

        let labels: Vec<_> = summary_rows(&set)
            .into_iter()
            .map(|row| row.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "MRI Performed",
                "Femoral Torsion (\u{b0})",
                "Patella Tilt (\u{b0})"
            ]
        );
    }

    #[test]
    fn test_whitespace_only_entry_does_not_qualify() {
        let mut set = MeasurementSet::new();
        enter(&mut set, ParamKey::TttgIndex, Side::Right, "   ");
        assert!(summary_rows(&set).is_empty());
    }
}
