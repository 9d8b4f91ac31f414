use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PxDataError, Result};
use crate::utils;

/// Earliest year the published archive is expected to cover.
pub const MIN_YEAR: i32 = 2010;
/// Latest accepted year.
pub const MAX_YEAR: i32 = 3000;

/// Root directory used when nothing else is configured.
pub const DEFAULT_ROOT_DATA_DIR: &str = "./full_data/";

/// Environment variable that overrides the root data directory.
pub const ROOT_DATA_DIR_ENV: &str = "PXDATA_ROOT_DATA_DIR";

/// Configuration for locating the monthly data files
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base path under which the `<YYYY>_<MM>_<MonthName>/` directories live.
    pub root_data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_data_dir: PathBuf::from(DEFAULT_ROOT_DATA_DIR),
        }
    }
}

impl Config {
    pub fn new(root_data_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_data_dir: root_data_dir.into(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let root_data_dir = std::env::var(ROOT_DATA_DIR_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ROOT_DATA_DIR.to_string());

        Self::new(root_data_dir)
    }
}

/// A validated calendar month, ordered by year then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(PxDataError::InvalidYear {
                year,
                min: MIN_YEAR,
                max: MAX_YEAR,
            });
        }
        if !(1..=12).contains(&month) {
            return Err(PxDataError::InvalidMonth { month });
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month. December rolls over into January of the next year.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn month_name(&self) -> &'static str {
        // month is always 1..=12 once constructed
        utils::month_name(self.month).unwrap_or_default()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Inclusive run of months from `from` to `to`.
///
/// The range is `Copy` and every call to [`MonthRange::iter`] starts again
/// from `from`, so the same range can be walked any number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    from: YearMonth,
    to: YearMonth,
}

impl MonthRange {
    pub fn new(from: YearMonth, to: YearMonth) -> Result<Self> {
        if from > to {
            return Err(PxDataError::InvertedRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Validate both ends and build the range.
    pub fn from_parts(year_from: i32, month_from: u32, year_to: i32, month_to: u32) -> Result<Self> {
        let from = YearMonth::new(year_from, month_from)?;
        let to = YearMonth::new(year_to, month_to)?;
        Self::new(from, to)
    }

    pub fn start(&self) -> YearMonth {
        self.from
    }

    pub fn end(&self) -> YearMonth {
        self.to
    }

    /// Number of months covered, both ends included.
    pub fn len(&self) -> usize {
        let months = (self.to.year - self.from.year) * 12 + self.to.month as i32
            - self.from.month as i32;
        months as usize + 1
    }

    /// A range always holds at least one month.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> MonthIter {
        MonthIter {
            next: Some(self.from),
            to: self.to,
        }
    }
}

impl IntoIterator for MonthRange {
    type Item = YearMonth;
    type IntoIter = MonthIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the months of a [`MonthRange`].
#[derive(Debug, Clone)]
pub struct MonthIter {
    next: Option<YearMonth>,
    to: YearMonth,
}

impl Iterator for MonthIter {
    type Item = YearMonth;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current < self.to {
            Some(current.succ())
        } else {
            None
        };
        Some(current)
    }
}

/// The three files published for each month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum DataFile {
    Address,
    Chemicals,
    Prescriptions,
}

impl DataFile {
    pub const ALL: [DataFile; 3] = [DataFile::Address, DataFile::Chemicals, DataFile::Prescriptions];

    /// Text appended to the month prefix to form the file name.
    pub fn suffix(&self) -> &'static str {
        match self {
            DataFile::Address => "ADDR BNFT.CSV",
            DataFile::Chemicals => "CHEM SUBS.CSV",
            DataFile::Prescriptions => "PDPI BNFT.CSV",
        }
    }
}

impl fmt::Display for DataFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataFile::Address => "address",
            DataFile::Chemicals => "chemicals",
            DataFile::Prescriptions => "prescriptions",
        };
        f.write_str(name)
    }
}

/// Practice address row from `ADDR BNFT.CSV`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub year_month: NaiveDate,
    pub practice_code: String,
    pub practice_name: String,
    pub addr1: String,
    pub addr2: String,
    pub addr3: String,
    pub addr4: String,
    pub postcode: String,
}

/// Column names of the address file, by position.
pub const ADDRESS_COLUMNS: [&str; 8] = [
    "Year-Month",
    "PracticeCode",
    "PracticeName",
    "Addr1",
    "Addr2",
    "Addr3",
    "Addr4",
    "PostCode",
];

/// Chemical substance row from `CHEM SUBS.CSV`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalRecord {
    pub chem_code: String,
    pub chem_name: String,
}

/// Column names of the chemicals file, by position.
pub const CHEMICAL_COLUMNS: [&str; 2] = ["ChemCode", "ChemName"];

/// Practice-level prescribing row from `PDPI BNFT.CSV`
///
/// Numeric columns left blank in the file load as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionRecord {
    pub sha: String,
    pub pct: String,
    pub practice_code: String,
    pub bnf_code: String,
    pub bnf_name: String,
    pub line_count_dispensed: Option<i64>,
    pub net_cost: Option<f64>,
    pub actual_cost: Option<f64>,
    pub quantity_dispensed: Option<f64>,
    pub year_month: NaiveDate,
}

/// Column names of the prescription file, by position.
pub const PRESCRIPTION_COLUMNS: [&str; 10] = [
    "SHA",
    "PCT",
    "PracticeCode",
    "BNFCode",
    "BNFName",
    "LineCountDispensed",
    "NetCost",
    "ActualCost",
    "QuantityDispensed",
    "Year-Month",
];
