use std::collections::BTreeMap;

use crate::schema::{FieldKind, ParamKey, SCHEMA};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Right,
    Left,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Right => "Right",
            Side::Left => "Left",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidePair<T> {
    pub right: T,
    pub left: T,
}

impl<T> SidePair<T> {
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Right => &self.right,
            Side::Left => &self.left,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Right => &mut self.right,
            Side::Left => &mut self.left,
        }
    }
}

/// Current value of one input parameter. Numeric fields keep the raw entry
/// text; parsing happens at classification and derivation time so a
/// half-typed number is never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(SidePair<String>),
    Flags(SidePair<bool>),
    Flag(bool),
}

/// All entered measurements, keyed by parameter. Keys are fixed at
/// construction from the schema; values mutate in place. Derived parameters
/// have no entry here — they are computed from their inputs (see
/// [`crate::measure::derive`]).
#[derive(Debug, Clone)]
pub struct MeasurementSet {
    entries: BTreeMap<ParamKey, ParamValue>,
}

impl Default for MeasurementSet {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasurementSet {
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        for spec in SCHEMA {
            let value = match spec.kind {
                FieldKind::NumericLr => ParamValue::Text(SidePair::default()),
                FieldKind::BooleanLr => ParamValue::Flags(SidePair::default()),
                FieldKind::BooleanSingle => ParamValue::Flag(false),
                FieldKind::DerivedSingle => continue,
            };
            entries.insert(spec.key, value);
        }
        Self { entries }
    }

    pub fn value(&self, key: ParamKey) -> Option<&ParamValue> {
        self.entries.get(&key)
    }

    /// Raw entry text for one side of a numeric parameter. Empty string when
    /// unset; `None` for non-numeric parameters.
    pub fn text(&self, key: ParamKey, side: Side) -> Option<&str> {
        match self.entries.get(&key) {
            Some(ParamValue::Text(pair)) => Some(pair.get(side).as_str()),
            _ => None,
        }
    }

    pub fn text_mut(&mut self, key: ParamKey, side: Side) -> Option<&mut String> {
        match self.entries.get_mut(&key) {
            Some(ParamValue::Text(pair)) => Some(pair.get_mut(side)),
            _ => None,
        }
    }

    /// Parsed numeric value for one side, `None` when empty or unparseable.
    pub fn numeric(&self, key: ParamKey, side: Side) -> Option<f64> {
        let raw = self.text(key, side)?.trim();
        if raw.is_empty() {
            return None;
        }
        raw.parse::<f64>().ok()
    }

    pub fn flag(&self, key: ParamKey, side: Option<Side>) -> bool {
        match (self.entries.get(&key), side) {
            (Some(ParamValue::Flags(pair)), Some(side)) => *pair.get(side),
            (Some(ParamValue::Flag(value)), None) => *value,
            _ => false,
        }
    }

    /// Flip a checkbox. `side` is ignored for single-checkbox parameters and
    /// required for left/right ones; anything else is a no-op.
    pub fn toggle_flag(&mut self, key: ParamKey, side: Option<Side>) {
        match self.entries.get_mut(&key) {
            Some(ParamValue::Flags(pair)) => {
                if let Some(side) = side {
                    let slot = pair.get_mut(side);
                    *slot = !*slot;
                }
            }
            Some(ParamValue::Flag(value)) => *value = !*value,
            _ => {}
        }
    }

    /// True when the parameter carries data worth exporting: any true flag,
    /// or non-empty entry text on either side. Derived parameters are judged
    /// on their computed values by the caller.
    pub fn has_data(&self, key: ParamKey) -> bool {
        match self.entries.get(&key) {
            Some(ParamValue::Text(pair)) => {
                !pair.right.trim().is_empty() || !pair.left.trim().is_empty()
            }
            Some(ParamValue::Flags(pair)) => pair.right || pair.left,
            Some(ParamValue::Flag(value)) => *value,
            None => false,
        }
    }

    pub fn any_data(&self) -> bool {
        self.entries.keys().any(|key| self.has_data(*key))
    }
}
