//! Path generation and CSV loading for the monthly GP practice prescribing
//! archives published by NHS Digital.

pub mod checker;
pub mod error;
pub mod loader;
pub mod models;
pub mod paths;
pub mod utils;

pub use checker::{check_data, check_data_with, MissingFileReporter, TracingReporter};
pub use error::{ErrorKind, PxDataError, Result};
pub use loader::{load_csv, DataLoader, MonthlyRecord};
pub use models::{
    AddressRecord, ChemicalRecord, Config, DataFile, MonthRange, PrescriptionRecord, YearMonth,
};
pub use paths::{DataLayout, FilePaths};
