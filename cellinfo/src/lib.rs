//! Normalization of cellular radio measurements.
//!
//! Raw cell information comes in a different shape for every radio technology.
//! [`build_from_cell_info`] turns any of them into a [`CellRecord`] that can be
//! queried without knowing the radio type, converted to JSON or rendered as
//! text.

pub mod bag;
pub mod build;
pub mod present;
pub mod raw;
pub mod record;
pub mod signal;

pub use bag::{FieldBag, FieldValue};
pub use build::{build_from_cell_info, CellRecordBuilder, Dispatcher};
pub use present::stringify;
pub use raw::{RawCell, RawCellInfo, RawSignalStrength};
pub use record::{CellRecord, Field, RadioType};
pub use signal::SignalStrength;

/// Value read back for an integer field that is not known.
pub const UNKNOWN: i32 = i32::MAX;
/// Value read back for a timestamp that is not known.
pub const UNKNOWN_TIMESTAMP: i64 = i64::MAX;

// platforms report unknown values with the same sentinel
pub(crate) fn known(value: Option<i32>) -> Option<i32> {
    value.filter(|x| *x != UNKNOWN)
}
