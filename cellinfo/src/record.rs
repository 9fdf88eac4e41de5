use strum::{Display, EnumIter, FromRepr};

use crate::{bag::FieldBag, signal::SignalStrength, UNKNOWN, UNKNOWN_TIMESTAMP};

pub(crate) const CELL_TYPE: &str = "cell_type";
pub(crate) const TIMESTAMP: &str = "timestamp";
pub(crate) const IS_REGISTERED: &str = "is_registered";
pub(crate) const SIGNAL_STRENGTH: &str = "signal_strength";

/// Radio technology of a cell. The discriminant is the code stored in the bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, FromRepr)]
#[strum(serialize_all = "UPPERCASE")]
#[repr(i32)]
pub enum RadioType {
    Unknown = 0,
    Gsm = 1,
    Cdma = 2,
    Wcdma = 3,
    Lte = 4,
}

impl RadioType {
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Whether `field` is meaningful for cells of this radio type.
    pub fn has(self, field: Field) -> bool {
        use Field::*;

        match self {
            RadioType::Gsm => matches!(field, Cid | Lac | Mcc | Mnc),
            RadioType::Wcdma => matches!(field, Cid | Lac | Mcc | Mnc | Psc),
            RadioType::Lte => matches!(field, Cid | Mcc | Mnc | Pci | Tac | TimingAdvance),
            // CDMA identities are not decoded
            RadioType::Cdma | RadioType::Unknown => false,
        }
    }
}

/// Integer identity fields of a cell record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Field {
    /// Cell ID (CI for LTE)
    Cid,
    /// Location Area Code (GSM, WCDMA)
    Lac,
    /// Mobile Country Code
    Mcc,
    /// Mobile Network Code
    Mnc,
    /// Primary Scrambling Code (WCDMA)
    Psc,
    /// Physical Cell ID (LTE)
    Pci,
    /// Tracking Area Code (LTE)
    Tac,
    /// Timing Advance (LTE)
    TimingAdvance,
}

impl Field {
    pub fn key(self) -> &'static str {
        match self {
            Field::Cid => "cid",
            Field::Lac => "lac",
            Field::Mcc => "mcc",
            Field::Mnc => "mnc",
            Field::Psc => "psc",
            Field::Pci => "pci",
            Field::Tac => "tac",
            Field::TimingAdvance => "ta",
        }
    }
}

/// Normalized information about one observed cell.
///
/// Records are produced by [`crate::build`] and cannot be modified afterwards.
/// Every getter is total: unknown integers read back as [`UNKNOWN`], an unknown
/// timestamp as [`UNKNOWN_TIMESTAMP`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellRecord {
    pub(crate) bag: FieldBag,
}

impl CellRecord {
    /// Rebuild a record from a bag previously obtained through [`CellRecord::bag`].
    pub fn from_bag(bag: &FieldBag) -> Self {
        let mut copy = FieldBag::new();
        copy.merge_from(bag);
        Self { bag: copy }
    }

    pub fn bag(&self) -> &FieldBag {
        &self.bag
    }

    pub fn cell_type(&self) -> RadioType {
        let code = self.bag.get_int(CELL_TYPE, RadioType::Unknown.code());
        RadioType::from_repr(code).unwrap_or(RadioType::Unknown)
    }

    pub fn timestamp(&self) -> i64 {
        self.bag.get_long(TIMESTAMP, UNKNOWN_TIMESTAMP)
    }

    pub fn is_registered(&self) -> bool {
        self.bag.get_bool(IS_REGISTERED, false)
    }

    pub fn signal_strength(&self) -> Option<SignalStrength> {
        self.bag.get_bag(SIGNAL_STRENGTH).map(SignalStrength::from_bag)
    }

    pub fn get(&self, field: Field) -> i32 {
        self.bag.get_int(field.key(), UNKNOWN)
    }

    pub fn cid(&self) -> i32 {
        self.get(Field::Cid)
    }

    pub fn lac(&self) -> i32 {
        self.get(Field::Lac)
    }

    pub fn mcc(&self) -> i32 {
        self.get(Field::Mcc)
    }

    pub fn mnc(&self) -> i32 {
        self.get(Field::Mnc)
    }

    pub fn psc(&self) -> i32 {
        self.get(Field::Psc)
    }

    pub fn pci(&self) -> i32 {
        self.get(Field::Pci)
    }

    pub fn tac(&self) -> i32 {
        self.get(Field::Tac)
    }

    pub fn timing_advance(&self) -> i32 {
        self.get(Field::TimingAdvance)
    }
}
