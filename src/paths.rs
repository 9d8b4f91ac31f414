//! File path construction for the monthly archive layout.
//!
//! Data for April 2013 lives under the configured root as:
//!
//! ```text
//! 2013_04_April/T201304ADDR BNFT.CSV
//! 2013_04_April/T201304CHEM SUBS.CSV
//! 2013_04_April/T201304PDPI BNFT.CSV
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::models::{Config, DataFile, MonthIter, MonthRange, YearMonth};

/// Computes data file locations under a root directory.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(config: &Config) -> Self {
        Self::from_root(&config.root_data_dir)
    }

    pub fn from_root(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one month's files, e.g. `<root>/2013_04_April`.
    pub fn month_dir(&self, month: YearMonth) -> PathBuf {
        self.root.join(format!(
            "{}_{:02}_{}",
            month.year(),
            month.month(),
            month.month_name()
        ))
    }

    /// Prefix shared by a month's three files, e.g. `<root>/2013_04_April/T201304`.
    pub fn prefix(&self, month: YearMonth) -> PathBuf {
        self.month_dir(month)
            .join(format!("T{}{:02}", month.year(), month.month()))
    }

    pub fn filepath(&self, file: DataFile, month: YearMonth) -> PathBuf {
        with_suffix(self.prefix(month), file.suffix())
    }

    pub fn file_path_prefix(&self, year: i32, month: u32) -> Result<PathBuf> {
        let month = YearMonth::new(year, month)?;
        Ok(self.prefix(month))
    }

    pub fn address_filepath(&self, year: i32, month: u32) -> Result<PathBuf> {
        Ok(self.filepath(DataFile::Address, YearMonth::new(year, month)?))
    }

    pub fn chems_filepath(&self, year: i32, month: u32) -> Result<PathBuf> {
        Ok(self.filepath(DataFile::Chemicals, YearMonth::new(year, month)?))
    }

    pub fn prescription_filepath(&self, year: i32, month: u32) -> Result<PathBuf> {
        Ok(self.filepath(DataFile::Prescriptions, YearMonth::new(year, month)?))
    }

    /// Prefixes for every month from `from` to `to`, both included.
    ///
    /// Fails if either end is out of bounds or `from` comes after `to`.
    pub fn file_path_prefixes(
        &self,
        year_from: i32,
        month_from: u32,
        year_to: i32,
        month_to: u32,
    ) -> Result<FilePaths<'_>> {
        let range = MonthRange::from_parts(year_from, month_from, year_to, month_to)?;
        debug!("Generating {} prefixes for {} to {}", range.len(), range.start(), range.end());
        Ok(FilePaths::new(self, range, None))
    }

    /// One path per month in `range` for the given file type, in calendar order.
    pub fn filepaths(&self, file: DataFile, range: MonthRange) -> FilePaths<'_> {
        FilePaths::new(self, range, Some(file))
    }

    pub fn address_filepaths(
        &self,
        year_from: i32,
        month_from: u32,
        year_to: i32,
        month_to: u32,
    ) -> Result<FilePaths<'_>> {
        let range = MonthRange::from_parts(year_from, month_from, year_to, month_to)?;
        Ok(self.filepaths(DataFile::Address, range))
    }

    pub fn chems_filepaths(
        &self,
        year_from: i32,
        month_from: u32,
        year_to: i32,
        month_to: u32,
    ) -> Result<FilePaths<'_>> {
        let range = MonthRange::from_parts(year_from, month_from, year_to, month_to)?;
        Ok(self.filepaths(DataFile::Chemicals, range))
    }

    pub fn prescription_filepaths(
        &self,
        year_from: i32,
        month_from: u32,
        year_to: i32,
        month_to: u32,
    ) -> Result<FilePaths<'_>> {
        let range = MonthRange::from_parts(year_from, month_from, year_to, month_to)?;
        Ok(self.filepaths(DataFile::Prescriptions, range))
    }
}

/// Paths for each month of a [`MonthRange`]: bare prefixes, or full file
/// paths when built for a [`DataFile`].
#[derive(Debug, Clone)]
pub struct FilePaths<'a> {
    layout: &'a DataLayout,
    range: MonthRange,
    months: MonthIter,
    file: Option<DataFile>,
}

impl<'a> FilePaths<'a> {
    fn new(layout: &'a DataLayout, range: MonthRange, file: Option<DataFile>) -> Self {
        Self {
            layout,
            range,
            months: range.iter(),
            file,
        }
    }

    pub fn range(&self) -> MonthRange {
        self.range
    }

    /// A fresh sequence over the same months, starting again from the first.
    pub fn restart(&self) -> Self {
        Self::new(self.layout, self.range, self.file)
    }
}

impl Iterator for FilePaths<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<Self::Item> {
        let month = self.months.next()?;
        Some(match self.file {
            Some(file) => self.layout.filepath(file, month),
            None => self.layout.prefix(month),
        })
    }
}

/// Append `suffix` to the final component of `prefix` without adding a separator.
fn with_suffix(prefix: PathBuf, suffix: &str) -> PathBuf {
    let mut path = OsString::from(prefix);
    path.push(suffix);
    PathBuf::from(path)
}
