//! Derived values: leg length difference and the Beighton total.
//!
//! Both are pure functions of the measurement set and are recomputed after
//! every edit to one of their inputs. Neither is stored alongside the
//! entered values.

use crate::measure::{MeasurementSet, Side};
use crate::schema::{ParamKey, BEIGHTON_PAIRED, BEIGHTON_SINGLE};

/// Right minus left leg length, rounded to one decimal. `None` while either
/// side is empty or unparseable.
pub fn leg_length_difference(set: &MeasurementSet) -> Option<f64> {
    let right = set.numeric(ParamKey::LegLength, Side::Right)?;
    let left = set.numeric(ParamKey::LegLength, Side::Left)?;
    Some(((right - left) * 10.0).round() / 10.0)
}

/// Count of true flags among the nine Beighton items (0-9).
pub fn beighton_total(set: &MeasurementSet) -> u8 {
    let mut total = 0u8;
    for key in BEIGHTON_PAIRED {
        total += set.flag(key, Some(Side::Right)) as u8;
        total += set.flag(key, Some(Side::Left)) as u8;
    }
    total += set.flag(BEIGHTON_SINGLE, None) as u8;
    total
}

/// Fixed one-decimal rendering used for the leg length difference ("15.0").
pub fn format_one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_leg_length(set: &mut MeasurementSet, right: &str, left: &str) {
        *set.text_mut(ParamKey::LegLength, Side::Right).unwrap() = right.to_string();
        *set.text_mut(ParamKey::LegLength, Side::Left).unwrap() = left.to_string();
    }

    #[test]
    fn test_difference_right_minus_left() {
        let mut set = MeasurementSet::new();
        set_leg_length(&mut set, "500", "485");
        let diff = leg_length_difference(&set).unwrap();
        assert_eq!(format_one_decimal(diff), "15.0");
    }

    #[test]
    fn test_difference_negative() {
        let mut set = MeasurementSet::new();
        set_leg_length(&mut set, "480", "495.5");
        let diff = leg_length_difference(&set).unwrap();
        assert_eq!(format_one_decimal(diff), "-15.5");
    }

    #[test]
    fn test_difference_rounds_to_one_decimal() {
        let mut set = MeasurementSet::new();
        set_leg_length(&mut set, "500.26", "500");
        assert_eq!(leg_length_difference(&set), Some(0.3));
    }

    #[test]
    fn test_difference_requires_both_sides() {
        let mut set = MeasurementSet::new();
        assert_eq!(leg_length_difference(&set), None);

        set_leg_length(&mut set, "500", "");
        assert_eq!(leg_length_difference(&set), None);

        set_leg_length(&mut set, "", "485");
        assert_eq!(leg_length_difference(&set), None);
    }

    #[test]
    fn test_difference_unparseable_side_is_none() {
        let mut set = MeasurementSet::new();
        set_leg_length(&mut set, "500", "4x5");
        assert_eq!(leg_length_difference(&set), None);
    }

    #[test]
    fn test_beighton_total_empty() {
        let set = MeasurementSet::new();
        assert_eq!(beighton_total(&set), 0);
    }

    #[test]
    fn test_beighton_total_counts_each_side() {
        let mut set = MeasurementSet::new();
        set.toggle_flag(ParamKey::BeightonPinky, Some(Side::Right));
        set.toggle_flag(ParamKey::BeightonPinky, Some(Side::Left));
        set.toggle_flag(ParamKey::BeightonKnee, Some(Side::Left));
        assert_eq!(beighton_total(&set), 3);
    }

    #[test]
    fn test_beighton_total_max_is_nine() {
        let mut set = MeasurementSet::new();
        for key in BEIGHTON_PAIRED {
            set.toggle_flag(key, Some(Side::Right));
            set.toggle_flag(key, Some(Side::Left));
        }
        set.toggle_flag(BEIGHTON_SINGLE, None);
        assert_eq!(beighton_total(&set), 9);
    }
}
