//! Reading dumps of raw platform cell information.

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use anyhow::{Context, Result};
use cellinfo::{
    raw::{
        lenient_int, lenient_long, RawCdmaIdentity, RawGsmIdentity, RawLteIdentity,
        RawWcdmaIdentity,
    },
    RawCell, RawCellInfo, RawSignalStrength,
};
use log::{debug, warn};
use serde::Deserialize;

/// Cells read from one source, along with the number of entries that could
/// not be parsed.
#[derive(Debug, Default)]
pub struct Loaded {
    pub cells: Vec<RawCellInfo>,
    pub skipped: usize,
}

impl Loaded {
    pub fn extend(&mut self, other: Loaded) {
        self.cells.extend(other.cells);
        self.skipped += other.skipped;
    }
}

/// Load a dump file. `.csv` files hold flat rows, anything else JSON lines.
pub fn load(path: &Path) -> Result<Loaded> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let origin = path.display().to_string();

    let csv = path
        .extension()
        .is_some_and(|x| x.eq_ignore_ascii_case("csv"));
    if csv {
        read_csv(file, &origin)
    } else {
        read_json_lines(BufReader::new(file), &origin)
    }
}

pub fn read_json_lines(reader: impl BufRead, origin: &str) -> Result<Loaded> {
    let mut loaded = Loaded::default();
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {origin}"))?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str(&line) {
            Ok(raw) => loaded.cells.push(raw),
            Err(e) => {
                warn!("{origin}:{}: {e}", i + 1);
                loaded.skipped += 1;
            }
        }
    }

    debug!("{origin}: read {} cells", loaded.cells.len());
    Ok(loaded)
}

/// Flat CSV representation of a cell, one column per field
#[derive(Debug, Deserialize)]
struct Row {
    radio: RowRadio,
    #[serde(default, deserialize_with = "lenient_long")]
    timestamp: Option<i64>,
    registered: Option<bool>,
    #[serde(default, deserialize_with = "lenient_int")]
    cid: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    lac: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    mcc: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    mnc: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    psc: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    pci: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    tac: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    ta: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    dbm: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    asu_level: Option<i32>,
    #[serde(default, deserialize_with = "lenient_int")]
    level: Option<i32>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum RowRadio {
    Generic,
    Gsm,
    Wcdma,
    Lte,
    Cdma,
}

impl From<Row> for RawCellInfo {
    fn from(row: Row) -> Self {
        let signal = RawSignalStrength {
            dbm: row.dbm,
            asu_level: row.asu_level,
            level: row.level,
            timing_advance: row.ta,
        };

        let cell = match row.radio {
            RowRadio::Generic => RawCell::Generic,
            RowRadio::Gsm => RawCell::Gsm {
                signal,
                identity: RawGsmIdentity {
                    cid: row.cid,
                    lac: row.lac,
                    mcc: row.mcc,
                    mnc: row.mnc,
                },
            },
            RowRadio::Wcdma => RawCell::Wcdma {
                signal,
                identity: RawWcdmaIdentity {
                    cid: row.cid,
                    lac: row.lac,
                    mcc: row.mcc,
                    mnc: row.mnc,
                    psc: row.psc,
                },
            },
            RowRadio::Lte => RawCell::Lte {
                signal,
                identity: RawLteIdentity {
                    ci: row.cid,
                    mcc: row.mcc,
                    mnc: row.mnc,
                    tac: row.tac,
                    pci: row.pci,
                    timing_advance: None,
                },
            },
            // no columns for CDMA identities
            RowRadio::Cdma => RawCell::Cdma {
                signal,
                identity: RawCdmaIdentity::default(),
            },
        };

        RawCellInfo {
            timestamp: row.timestamp,
            registered: row.registered.unwrap_or(false),
            cell,
        }
    }
}

pub fn read_csv(reader: impl Read, origin: &str) -> Result<Loaded> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut loaded = Loaded::default();
    for (i, result) in reader.deserialize::<Row>().enumerate() {
        match result {
            Ok(row) => loaded.cells.push(row.into()),
            Err(e) if e.is_io_error() => {
                return Err(e).with_context(|| format!("Failed to read {origin}"));
            }
            Err(e) => {
                // header is line 1
                warn!("{origin}:{}: {e}", i + 2);
                loaded.skipped += 1;
            }
        }
    }

    debug!("{origin}: read {} cells", loaded.cells.len());
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use tempfile::Builder;

    use super::*;

    const CSV: &str = "\
radio,timestamp,registered,cid,lac,mcc,mnc,psc,pci,tac,ta,dbm,asu_level,level
gsm,123456,true,100,200,208,10,,,,,-89,12,3
lte,99,false,26000001,,310,260,,271,11000,4,-110,,
cdma,5,,,,,,,,,,-75,,
5g,1,,,,,,,,,,,,
";

    #[test]
    fn csv_rows() {
        let loaded = read_csv(CSV.as_bytes(), "test").unwrap();
        assert_eq!(loaded.skipped, 1);
        assert_eq!(loaded.cells.len(), 3);

        let gsm = &loaded.cells[0];
        assert_eq!(gsm.timestamp, Some(123456));
        assert!(gsm.registered);
        assert_eq!(
            gsm.cell,
            RawCell::Gsm {
                signal: RawSignalStrength {
                    dbm: Some(-89),
                    asu_level: Some(12),
                    level: Some(3),
                    timing_advance: None,
                },
                identity: RawGsmIdentity {
                    cid: Some(100),
                    lac: Some(200),
                    mcc: Some(208),
                    mnc: Some(10),
                },
            }
        );

        let RawCell::Lte { signal, identity } = &loaded.cells[1].cell else {
            panic!("expected an LTE cell");
        };
        assert_eq!(signal.timing_advance, Some(4));
        assert_eq!(identity.ci, Some(26000001));
        assert_eq!(identity.tac, Some(11000));

        assert!(!loaded.cells[2].registered);
        assert!(matches!(loaded.cells[2].cell, RawCell::Cdma { .. }));
    }

    #[test]
    fn out_of_range_values_keep_the_cell() {
        let input = "\
radio,timestamp,registered,cid,lac,mcc,mnc
gsm,7,true,3000000000,200,208,10
";
        let loaded = read_csv(input.as_bytes(), "test").unwrap();
        assert_eq!(loaded.skipped, 0);
        assert_eq!(loaded.cells.len(), 1);
        assert!(loaded.cells[0].registered);
        let RawCell::Gsm { identity, .. } = &loaded.cells[0].cell else {
            panic!("expected a GSM cell");
        };
        assert_eq!(identity.cid, None);
        assert_eq!(identity.lac, Some(200));

        let input = r#"{"type":"gsm","timestamp":7,"identity":{"cid":3000000000,"mcc":208}}"#;
        let loaded = read_json_lines(Cursor::new(input), "test").unwrap();
        assert_eq!(loaded.skipped, 0);
        assert_eq!(loaded.cells.len(), 1);
        assert_eq!(loaded.cells[0].timestamp, Some(7));
    }

    #[test]
    fn json_lines() {
        let input = r#"{"type":"gsm","timestamp":1,"identity":{"cid":3}}

not json
{"type":"generic","registered":true}
"#;
        let loaded = read_json_lines(Cursor::new(input), "test").unwrap();
        assert_eq!(loaded.skipped, 1);
        assert_eq!(loaded.cells.len(), 2);
        assert_eq!(loaded.cells[1].cell, RawCell::Generic);
        assert!(loaded.cells[1].registered);
    }

    #[test]
    fn load_by_extension() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        assert_eq!(load(file.path()).unwrap().cells.len(), 3);

        let mut file = Builder::new().suffix(".jsonl").tempfile().unwrap();
        writeln!(file, r#"{{"type":"cdma","registered":true}}"#).unwrap();
        let mut loaded = load(file.path()).unwrap();
        assert_eq!(loaded.cells.len(), 1);

        loaded.extend(Loaded {
            cells: vec![RawCellInfo::default()],
            skipped: 2,
        });
        assert_eq!(loaded.cells.len(), 2);
        assert_eq!(loaded.skipped, 2);

        assert!(load(Path::new("/nonexistent.csv")).is_err());
    }
}
