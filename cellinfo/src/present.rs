//! JSON and text rendering of cell records.

use std::fmt::{self, Display, Formatter};

use serde_json::Value;

use crate::{
    record::{CellRecord, RadioType},
    UNKNOWN,
};

/// Render an integer field, `?` standing for an unknown value.
pub fn stringify(value: i32) -> String {
    if value == UNKNOWN {
        "?".to_owned()
    } else {
        value.to_string()
    }
}

impl CellRecord {
    /// Every known field of the record. Unknown fields are left out.
    pub fn to_json(&self) -> Value {
        self.bag.to_json()
    }

    /// Multi-line human readable summary, one newline-terminated line per entry.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl Display for CellRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let radio = self.cell_type();
        writeln!(f, "Cell type: {radio}")?;
        if self.is_registered() {
            writeln!(f, "[Registered]")?;
        }

        if let RadioType::Cdma | RadioType::Unknown = radio {
            return Ok(());
        }

        writeln!(f, "CID: {}", stringify(self.cid()))?;
        writeln!(f, "MCC: {}", stringify(self.mcc()))?;
        writeln!(f, "MNC: {}", stringify(self.mnc()))?;

        match radio {
            RadioType::Gsm => writeln!(f, "LAC: {}", stringify(self.lac())),
            RadioType::Wcdma => {
                writeln!(f, "LAC: {}", stringify(self.lac()))?;
                writeln!(f, "PSC: {}", stringify(self.psc()))
            }
            RadioType::Lte => {
                writeln!(f, "TAC: {}", stringify(self.tac()))?;
                writeln!(f, "Timing Advance: {}", stringify(self.timing_advance()))
            }
            RadioType::Cdma | RadioType::Unknown => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        build::{build_from_cell_info, CellRecordBuilder},
        raw::{
            RawCell, RawCellInfo, RawGsmIdentity, RawLteIdentity, RawSignalStrength,
            RawWcdmaIdentity,
        },
        record::Field,
    };

    fn gsm() -> CellRecord {
        let raw = RawCellInfo {
            timestamp: Some(123456),
            registered: true,
            cell: RawCell::Gsm {
                signal: RawSignalStrength {
                    dbm: Some(-89),
                    level: Some(3),
                    ..Default::default()
                },
                identity: RawGsmIdentity {
                    cid: Some(100),
                    lac: Some(200),
                    mcc: Some(208),
                    mnc: Some(10),
                },
            },
        };
        build_from_cell_info(&raw, false)
    }

    #[test]
    fn gsm_text() {
        assert_eq!(
            gsm().to_text(),
            "Cell type: GSM\n[Registered]\nCID: 100\nMCC: 208\nMNC: 10\nLAC: 200\n"
        );
    }

    #[test]
    fn unknown_text() {
        let record = build_from_cell_info(&RawCellInfo::default(), true);
        assert_eq!(record.to_text(), "Cell type: UNKNOWN\n");
    }

    #[test]
    fn cdma_text() {
        let raw = RawCellInfo {
            timestamp: None,
            registered: true,
            cell: RawCell::Cdma {
                signal: RawSignalStrength::default(),
                identity: Default::default(),
            },
        };
        let record = build_from_cell_info(&raw, false);
        assert_eq!(record.to_text(), "Cell type: CDMA\n[Registered]\n");
    }

    #[test]
    fn wcdma_text_with_unknowns() {
        let raw = RawCellInfo {
            timestamp: Some(3),
            registered: false,
            cell: RawCell::Wcdma {
                signal: RawSignalStrength::default(),
                identity: RawWcdmaIdentity {
                    cid: Some(1234),
                    lac: None,
                    mcc: Some(262),
                    mnc: Some(2),
                    psc: Some(i32::MAX),
                },
            },
        };
        let record = build_from_cell_info(&raw, true);
        assert_eq!(
            record.to_text(),
            "Cell type: WCDMA\nCID: 1234\nMCC: 262\nMNC: 2\nLAC: ?\nPSC: ?\n"
        );
    }

    #[test]
    fn lte_text() {
        let raw = RawCellInfo {
            timestamp: Some(3),
            registered: true,
            cell: RawCell::Lte {
                signal: RawSignalStrength {
                    timing_advance: Some(6),
                    ..Default::default()
                },
                identity: RawLteIdentity {
                    ci: Some(5),
                    mcc: Some(1),
                    mnc: Some(-1),
                    tac: None,
                    pci: Some(12),
                    timing_advance: Some(100),
                },
            },
        };
        let record = build_from_cell_info(&raw, false);
        assert_eq!(
            record.to_text(),
            "Cell type: LTE\n[Registered]\nCID: 5\nMCC: 1\nMNC: -1\nTAC: ?\nTiming Advance: 6\n"
        );
        assert_eq!(record.to_text(), format!("{record}"));
    }

    #[test]
    fn json() {
        let record = gsm();
        let json = record.to_json();
        assert_eq!(
            json,
            json!({
                "timestamp": 123456,
                "is_registered": true,
                "cell_type": 1,
                "signal_strength": { "dbm": -89, "level": 3 },
                "cid": 100,
                "lac": 200,
                "mcc": 208,
                "mnc": 10,
            })
        );

        // every stored field shows up with the same value
        for (key, _) in record.bag().iter() {
            assert!(json.get(key).is_some(), "{key} missing");
        }
        for field in [Field::Cid, Field::Lac, Field::Mcc, Field::Mnc] {
            assert_eq!(json[field.key()], json!(record.get(field)));
        }
        assert_eq!(json["timestamp"], json!(record.timestamp()));
    }

    #[test]
    fn json_omits_unknown() {
        let raw = RawCellInfo::default();
        let record = CellRecordBuilder::new(RadioType::Lte, &raw)
            .field(Field::Cid, Some(1))
            .field(Field::Tac, None)
            .field(Field::TimingAdvance, Some(i32::MAX))
            .build();
        assert_eq!(
            record.to_json(),
            json!({ "is_registered": false, "cell_type": 4, "cid": 1 })
        );
        assert!(!record.to_json().to_string().contains(&i32::MAX.to_string()));
    }

    #[test]
    fn stringify_values() {
        assert_eq!(stringify(i32::MAX), "?");
        assert_eq!(stringify(0), "0");
        assert_eq!(stringify(208), "208");
        assert_eq!(stringify(-113), "-113");
        assert_eq!(stringify(i32::MIN), "-2147483648");
        assert_eq!(stringify(i32::MAX - 1), "2147483646");
    }
}
