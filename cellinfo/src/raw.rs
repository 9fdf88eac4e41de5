//! Serde representation of the cell information handed over by the platform.
//!
//! Every numeric field is optional: platforms leave out whatever they could not
//! measure, and some send the [`UNKNOWN`](crate::UNKNOWN) sentinel instead.

use log::debug;
use serde::{Deserialize, Deserializer};
use serde_json::Number;

/// Read an integer field, treating a number that does not fit an `i32` as
/// unknown rather than rejecting the whole cell.
pub fn lenient_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    let value = lenient_long(deserializer)?;
    Ok(value.and_then(|x| match i32::try_from(x) {
        Ok(x) => Some(x),
        Err(_) => {
            debug!("{x} is out of range, treating it as unknown");
            None
        }
    }))
}

pub fn lenient_long<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let number = Option::<Number>::deserialize(deserializer)?;
    Ok(number.and_then(|x| match x.as_i64() {
        Some(x) => Some(x),
        None => {
            debug!("{x} is not a 64-bit integer, treating it as unknown");
            None
        }
    }))
}

/// One observed cell as reported by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawCellInfo {
    #[serde(default, deserialize_with = "lenient_long")]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub registered: bool,
    #[serde(flatten)]
    pub cell: RawCell,
}

/// Concrete shape of a [`RawCellInfo`], selected by the `type` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawCell {
    /// Only the generic fields are known.
    #[default]
    Generic,
    Gsm {
        #[serde(default)]
        signal: RawSignalStrength,
        #[serde(default)]
        identity: RawGsmIdentity,
    },
    Wcdma {
        #[serde(default)]
        signal: RawSignalStrength,
        #[serde(default)]
        identity: RawWcdmaIdentity,
    },
    Lte {
        #[serde(default)]
        signal: RawSignalStrength,
        #[serde(default)]
        identity: RawLteIdentity,
    },
    Cdma {
        #[serde(default)]
        signal: RawSignalStrength,
        #[serde(default)]
        identity: RawCdmaIdentity,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawSignalStrength {
    #[serde(default, deserialize_with = "lenient_int")]
    pub dbm: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub asu_level: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub level: Option<i32>,
    // only meaningful for LTE
    #[serde(default, deserialize_with = "lenient_int")]
    pub timing_advance: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawGsmIdentity {
    #[serde(default, deserialize_with = "lenient_int")]
    pub cid: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub lac: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub mcc: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub mnc: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawWcdmaIdentity {
    #[serde(default, deserialize_with = "lenient_int")]
    pub cid: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub lac: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub mcc: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub mnc: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub psc: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawLteIdentity {
    #[serde(default, deserialize_with = "lenient_int")]
    pub ci: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub mcc: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub mnc: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub tac: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub pci: Option<i32>,
    // some dumps carry a copy here, the signal strength one is authoritative
    #[serde(default, deserialize_with = "lenient_int")]
    pub timing_advance: Option<i32>,
}

/// CDMA identities are laid out differently from the 3GPP ones and are not
/// decoded into cell records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawCdmaIdentity {
    #[serde(default, deserialize_with = "lenient_int")]
    pub network_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub system_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub base_station_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub latitude: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub longitude: Option<i32>,
}
