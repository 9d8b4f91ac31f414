//! Pre-flight check that every expected file exists for a range of months.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::Result;
use crate::models::{DataFile, MonthRange};
use crate::paths::DataLayout;

/// Receives each expected file that is not on disk.
pub trait MissingFileReporter {
    fn missing(&mut self, file: DataFile, path: &Path);
}

/// Reports missing files as `tracing` warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl MissingFileReporter for TracingReporter {
    fn missing(&mut self, file: DataFile, path: &Path) {
        warn!(kind = %file, "⚠️ File not found - {}", path.display());
    }
}

impl MissingFileReporter for Vec<PathBuf> {
    fn missing(&mut self, _file: DataFile, path: &Path) {
        self.push(path.to_path_buf());
    }
}

/// Warn about every missing address, chemicals or prescription file in the range.
///
/// Missing files never fail the call; only invalid bounds do.
pub fn check_data(
    layout: &DataLayout,
    year_from: i32,
    month_from: u32,
    year_to: i32,
    month_to: u32,
) -> Result<()> {
    check_data_with(
        layout,
        year_from,
        month_from,
        year_to,
        month_to,
        &mut TracingReporter,
    )
}

/// Same walk as [`check_data`], sending missing files to `reporter`.
pub fn check_data_with<R: MissingFileReporter>(
    layout: &DataLayout,
    year_from: i32,
    month_from: u32,
    year_to: i32,
    month_to: u32,
    reporter: &mut R,
) -> Result<()> {
    let range = MonthRange::from_parts(year_from, month_from, year_to, month_to)?;
    let missing = check_range(layout, range, reporter);
    info!(
        "🔍 Checked {} months from {} to {}: {} file(s) missing",
        range.len(),
        range.start(),
        range.end(),
        missing
    );
    Ok(())
}

/// Check each month's files in calendar order and return how many were missing.
pub fn check_range<R: MissingFileReporter>(
    layout: &DataLayout,
    range: MonthRange,
    reporter: &mut R,
) -> usize {
    let mut missing = 0;
    for month in range {
        for file in DataFile::ALL {
            let path = layout.filepath(file, month);
            if !path.is_file() {
                reporter.missing(file, &path);
                missing += 1;
            }
        }
    }
    missing
}
