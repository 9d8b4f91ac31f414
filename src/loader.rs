//! Typed loaders for the monthly CSV files.

use std::fs::File;
use std::io;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::{ByteRecord, ReaderBuilder, Trim};
use tracing::{debug, info};

use crate::error::{PxDataError, Result};
use crate::models::{
    AddressRecord, ChemicalRecord, Config, DataFile, PrescriptionRecord, YearMonth,
    ADDRESS_COLUMNS, CHEMICAL_COLUMNS, PRESCRIPTION_COLUMNS,
};
use crate::paths::DataLayout;
use crate::utils;

/// A record type that can be built from one positional CSV row.
pub trait MonthlyRecord: Sized {
    /// Which of the month's files holds these records.
    const FILE: DataFile;
    /// Column names, assigned by position.
    const COLUMNS: &'static [&'static str];
    /// Whether the first row is a header to throw away.
    const SKIP_FIRST_ROW: bool;

    fn from_row(row: &Row<'_>) -> Result<Self>;
}

/// One data row, already checked to have exactly `COLUMNS.len()` fields.
pub struct Row<'a> {
    record: &'a ByteRecord,
    columns: &'static [&'static str],
    path: &'a Path,
    line: u64,
}

impl Row<'_> {
    /// Field text with surrounding whitespace removed. Invalid UTF-8 is replaced.
    pub fn text(&self, index: usize) -> String {
        self.record
            .get(index)
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .unwrap_or_default()
    }

    /// Parse a numeric field. A blank field is `None`.
    pub fn number<T: FromStr>(&self, index: usize) -> Result<Option<T>> {
        let value = self.text(index);
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some).map_err(|_| {
            self.error(format!(
                "column {} expected a number, got {:?}",
                self.column(index),
                value
            ))
        })
    }

    /// Parse a `YYYYMM` field into the first day of that month.
    pub fn year_month(&self, index: usize) -> Result<NaiveDate> {
        utils::parse_year_month(&self.text(index))
            .map_err(|message| self.error(format!("column {}: {}", self.column(index), message)))
    }

    fn column(&self, index: usize) -> &'static str {
        self.columns.get(index).copied().unwrap_or("?")
    }

    fn error(&self, message: String) -> PxDataError {
        PxDataError::Parse {
            path: self.path.to_path_buf(),
            line: self.line,
            message,
        }
    }
}

impl MonthlyRecord for AddressRecord {
    const FILE: DataFile = DataFile::Address;
    const COLUMNS: &'static [&'static str] = &ADDRESS_COLUMNS;
    const SKIP_FIRST_ROW: bool = false;

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(AddressRecord {
            year_month: row.year_month(0)?,
            practice_code: row.text(1),
            practice_name: row.text(2),
            addr1: row.text(3),
            addr2: row.text(4),
            addr3: row.text(5),
            addr4: row.text(6),
            postcode: row.text(7),
        })
    }
}

impl MonthlyRecord for ChemicalRecord {
    const FILE: DataFile = DataFile::Chemicals;
    const COLUMNS: &'static [&'static str] = &CHEMICAL_COLUMNS;
    const SKIP_FIRST_ROW: bool = true;

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(ChemicalRecord {
            chem_code: row.text(0),
            chem_name: row.text(1),
        })
    }
}

impl MonthlyRecord for PrescriptionRecord {
    const FILE: DataFile = DataFile::Prescriptions;
    const COLUMNS: &'static [&'static str] = &PRESCRIPTION_COLUMNS;
    const SKIP_FIRST_ROW: bool = true;

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(PrescriptionRecord {
            sha: row.text(0),
            pct: row.text(1),
            practice_code: row.text(2),
            bnf_code: row.text(3),
            bnf_name: row.text(4),
            line_count_dispensed: row.number(5)?,
            net_cost: row.number(6)?,
            actual_cost: row.number(7)?,
            quantity_dispensed: row.number(8)?,
            year_month: row.year_month(9)?,
        })
    }
}

/// Read every data row of `path` as `R`.
///
/// Rows may carry one extra empty trailing field (a trailing comma); any
/// other width mismatch fails the whole load.
pub fn load_csv<R: MonthlyRecord>(path: &Path) -> Result<Vec<R>> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => PxDataError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => PxDataError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file);

    let width = R::COLUMNS.len();
    let mut records = Vec::new();
    let mut record = ByteRecord::new();
    let mut row_index: u64 = 0;

    loop {
        let has_row = reader
            .read_byte_record(&mut record)
            .map_err(|source| PxDataError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
        if !has_row {
            break;
        }
        row_index += 1;

        if R::SKIP_FIRST_ROW && row_index == 1 {
            debug!("Skipping header row of {}", path.display());
            continue;
        }

        let line = record.position().map(|p| p.line()).unwrap_or(row_index);
        let trailing_empty = record.len() == width + 1 && record.get(width).is_some_and(|f| f.is_empty());
        if record.len() != width && !trailing_empty {
            return Err(PxDataError::Parse {
                path: path.to_path_buf(),
                line,
                message: format!("expected {} columns, found {}", width, record.len()),
            });
        }

        let row = Row {
            record: &record,
            columns: R::COLUMNS,
            path,
            line,
        };
        records.push(R::from_row(&row)?);
    }

    Ok(records)
}

/// Loads a month's data files from a [`DataLayout`].
#[derive(Debug, Clone)]
pub struct DataLoader {
    layout: DataLayout,
}

impl DataLoader {
    pub fn new(config: &Config) -> Self {
        Self::from_layout(DataLayout::new(config))
    }

    pub fn from_layout(layout: DataLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    /// Load the records of type `R` for one month.
    pub fn load<R: MonthlyRecord>(&self, month: YearMonth) -> Result<Vec<R>> {
        let path = self.layout.filepath(R::FILE, month);
        info!("📂 Loading {} data for {} from {}", R::FILE, month, path.display());

        let records = load_csv::<R>(&path)?;
        info!("✅ Loaded {} {} records for {}", records.len(), R::FILE, month);
        Ok(records)
    }

    /// Practice addresses. The file has no header row.
    pub fn load_address_data(&self, year: i32, month: u32) -> Result<Vec<AddressRecord>> {
        self.load(YearMonth::new(year, month)?)
    }

    /// Chemical substances. The first row is discarded as a header.
    pub fn load_chems_data(&self, year: i32, month: u32) -> Result<Vec<ChemicalRecord>> {
        self.load(YearMonth::new(year, month)?)
    }

    /// Practice prescribing. The first row is discarded as a header.
    pub fn load_prescription_data(&self, year: i32, month: u32) -> Result<Vec<PrescriptionRecord>> {
        self.load(YearMonth::new(year, month)?)
    }
}
