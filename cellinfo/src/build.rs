//! Construction of [`CellRecord`]s from raw platform cell information.

use log::{debug, warn};

use crate::{
    bag::FieldBag,
    known,
    raw::{
        RawCell, RawCellInfo, RawGsmIdentity, RawLteIdentity, RawSignalStrength, RawWcdmaIdentity,
    },
    record::{CellRecord, Field, RadioType, CELL_TYPE, IS_REGISTERED, SIGNAL_STRENGTH, TIMESTAMP},
    signal::SignalStrength,
    UNKNOWN_TIMESTAMP,
};

/// Accumulates the fields of a single [`CellRecord`].
///
/// The radio type is fixed when the builder is created, and fields that do not
/// apply to it are refused.
#[derive(Debug)]
pub struct CellRecordBuilder {
    radio: RadioType,
    bag: FieldBag,
}

impl CellRecordBuilder {
    /// Start a record of type `radio`, copying the generic fields of `raw`.
    pub fn new(radio: RadioType, raw: &RawCellInfo) -> Self {
        let mut bag = FieldBag::new();
        if let Some(timestamp) = raw.timestamp.filter(|x| *x != UNKNOWN_TIMESTAMP) {
            bag.set_long(TIMESTAMP, timestamp);
        }
        bag.set_bool(IS_REGISTERED, raw.registered);
        if radio != RadioType::Unknown {
            bag.set_int(CELL_TYPE, radio.code());
        }

        Self { radio, bag }
    }

    pub fn signal_strength(mut self, raw: &RawSignalStrength) -> Self {
        let ss = SignalStrength::from_raw(raw);
        self.bag.set_bag(SIGNAL_STRENGTH, ss.into_bag());
        self
    }

    /// Set an identity field. Unknown values are left out of the record.
    pub fn field(mut self, field: Field, value: Option<i32>) -> Self {
        if !self.radio.has(field) {
            warn!("{field:?} does not apply to {} cells, ignoring it", self.radio);
            return self;
        }
        if let Some(value) = known(value) {
            self.bag.set_int(field.key(), value);
        }
        self
    }

    pub fn build(self) -> CellRecord {
        CellRecord { bag: self.bag }
    }
}

/// Strategy used to turn raw cell information into records.
///
/// Whether the platform can decode WCDMA cells is resolved once, when the
/// dispatcher is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatcher {
    /// Decodes CDMA, GSM and LTE cells. WCDMA cells only get generic fields.
    Legacy,
    /// Decodes WCDMA cells too.
    Wcdma,
}

impl Dispatcher {
    pub fn new(wcdma_decoding: bool) -> Self {
        if wcdma_decoding {
            Dispatcher::Wcdma
        } else {
            Dispatcher::Legacy
        }
    }

    pub fn build(self, raw: &RawCellInfo) -> CellRecord {
        match (self, &raw.cell) {
            (Dispatcher::Wcdma, RawCell::Wcdma { signal, identity }) => {
                wcdma(raw, signal, identity)
            }
            _ => legacy(raw),
        }
    }
}

/// Build a record from `raw`, grabbing as much information as its shape allows.
pub fn build_from_cell_info(raw: &RawCellInfo, wcdma_decoding: bool) -> CellRecord {
    Dispatcher::new(wcdma_decoding).build(raw)
}

fn legacy(raw: &RawCellInfo) -> CellRecord {
    match &raw.cell {
        RawCell::Cdma { signal, .. } => {
            debug!("CDMA cell identity is not decoded");
            CellRecordBuilder::new(RadioType::Cdma, raw)
                .signal_strength(signal)
                .build()
        }
        RawCell::Gsm { signal, identity } => gsm(raw, signal, identity),
        RawCell::Lte { signal, identity } => lte(raw, signal, identity),
        RawCell::Wcdma { .. } => {
            debug!("WCDMA decoding unavailable, keeping generic fields only");
            CellRecordBuilder::new(RadioType::Unknown, raw).build()
        }
        RawCell::Generic => CellRecordBuilder::new(RadioType::Unknown, raw).build(),
    }
}

fn gsm(raw: &RawCellInfo, signal: &RawSignalStrength, identity: &RawGsmIdentity) -> CellRecord {
    CellRecordBuilder::new(RadioType::Gsm, raw)
        .signal_strength(signal)
        .field(Field::Cid, identity.cid)
        .field(Field::Lac, identity.lac)
        .field(Field::Mcc, identity.mcc)
        .field(Field::Mnc, identity.mnc)
        .build()
}

fn lte(raw: &RawCellInfo, signal: &RawSignalStrength, identity: &RawLteIdentity) -> CellRecord {
    if identity.timing_advance.is_some() && identity.timing_advance != signal.timing_advance {
        debug!(
            "ignoring identity timing advance {:?}, signal strength reports {:?}",
            identity.timing_advance, signal.timing_advance
        );
    }

    CellRecordBuilder::new(RadioType::Lte, raw)
        .signal_strength(signal)
        .field(Field::Cid, identity.ci)
        .field(Field::Mcc, identity.mcc)
        .field(Field::Mnc, identity.mnc)
        .field(Field::Tac, identity.tac)
        .field(Field::Pci, identity.pci)
        // reported by the signal strength, not the identity
        .field(Field::TimingAdvance, signal.timing_advance)
        .build()
}

fn wcdma(
    raw: &RawCellInfo,
    signal: &RawSignalStrength,
    identity: &RawWcdmaIdentity,
) -> CellRecord {
    CellRecordBuilder::new(RadioType::Wcdma, raw)
        .signal_strength(signal)
        .field(Field::Cid, identity.cid)
        .field(Field::Lac, identity.lac)
        .field(Field::Mcc, identity.mcc)
        .field(Field::Mnc, identity.mnc)
        .field(Field::Psc, identity.psc)
        .build()
}
