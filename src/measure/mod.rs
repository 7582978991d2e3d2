pub mod classify;
pub mod derive;
pub mod store;

pub use classify::{classify, RangeBounds, RangeStatus, RangeTable};
pub use derive::{beighton_total, format_one_decimal, leg_length_difference};
pub use store::{MeasurementSet, ParamValue, Side, SidePair};
