use crate::{bag::FieldBag, known, raw::RawSignalStrength, UNKNOWN};

const DBM: &str = "dbm";
const ASU_LEVEL: &str = "asu_level";
const LEVEL: &str = "level";

/// Signal strength measured for a cell, kept as a nested [`FieldBag`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalStrength {
    bag: FieldBag,
}

impl SignalStrength {
    pub fn from_raw(raw: &RawSignalStrength) -> Self {
        let mut bag = FieldBag::new();
        if let Some(x) = known(raw.dbm) {
            bag.set_int(DBM, x);
        }
        if let Some(x) = known(raw.asu_level) {
            bag.set_int(ASU_LEVEL, x);
        }
        if let Some(x) = known(raw.level) {
            bag.set_int(LEVEL, x);
        }
        Self { bag }
    }

    pub fn from_bag(bag: &FieldBag) -> Self {
        let mut copy = FieldBag::new();
        copy.merge_from(bag);
        Self { bag: copy }
    }

    pub fn bag(&self) -> &FieldBag {
        &self.bag
    }

    pub fn into_bag(self) -> FieldBag {
        self.bag
    }

    pub fn dbm(&self) -> i32 {
        self.bag.get_int(DBM, UNKNOWN)
    }

    pub fn asu_level(&self) -> i32 {
        self.bag.get_int(ASU_LEVEL, UNKNOWN)
    }

    pub fn level(&self) -> i32 {
        self.bag.get_int(LEVEL, UNKNOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw() {
        let ss = SignalStrength::from_raw(&RawSignalStrength {
            dbm: Some(-85),
            asu_level: Some(UNKNOWN),
            level: None,
            timing_advance: Some(12),
        });

        assert_eq!(ss.dbm(), -85);
        assert_eq!(ss.asu_level(), UNKNOWN);
        assert_eq!(ss.level(), UNKNOWN);
        // timing advance belongs to the cell record
        assert_eq!(ss.bag().len(), 1);
    }

    #[test]
    fn bag_copy() {
        let ss = SignalStrength::from_raw(&RawSignalStrength {
            dbm: Some(-70),
            level: Some(4),
            ..Default::default()
        });
        let copy = SignalStrength::from_bag(ss.bag());
        assert_eq!(copy, ss);
        assert_eq!(copy.into_bag().get_int("level", 0), 4);
    }
}
