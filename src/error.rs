use std::path::PathBuf;

use thiserror::Error;

use crate::models::YearMonth;

/// Broad failure classes a caller can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Year, month or range bounds rejected before any I/O happened.
    Validation,
    /// The data file is missing or could not be read.
    Io,
    /// The file was read but a row did not have the expected shape or values.
    Parse,
}

/// Errors produced while building data paths or loading monthly files.
#[derive(Debug, Error)]
pub enum PxDataError {
    #[error("year must be between {min} and {max} (inclusive), got {year}")]
    InvalidYear { year: i32, min: i32, max: i32 },

    #[error("month must be between 1 and 12 (inclusive), got {month}")]
    InvalidMonth { month: u32 },

    #[error("\"from\" month {from} is after \"to\" month {to}")]
    InvertedRange { from: YearMonth, to: YearMonth },

    #[error("file not found: {path:?}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read CSV {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path:?} line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },
}

impl PxDataError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PxDataError::InvalidYear { .. }
            | PxDataError::InvalidMonth { .. }
            | PxDataError::InvertedRange { .. } => ErrorKind::Validation,
            PxDataError::FileNotFound { .. } | PxDataError::Io { .. } => ErrorKind::Io,
            PxDataError::Csv { source, .. } if source.is_io_error() => ErrorKind::Io,
            PxDataError::Csv { .. } | PxDataError::Parse { .. } => ErrorKind::Parse,
        }
    }
}

/// Convenient alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, PxDataError>;
