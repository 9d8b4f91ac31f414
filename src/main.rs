use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pxdata::checker::check_range;
use pxdata::utils::split_yyyymm;
use pxdata::{
    AddressRecord, ChemicalRecord, Config, DataFile, DataLayout, DataLoader, MonthRange,
    MonthlyRecord, PrescriptionRecord, TracingReporter, YearMonth,
};

/// GP prescribing data helper
#[derive(Parser)]
#[command(name = "pxdata")]
#[command(version = "0.1.0")]
#[command(about = "Locate, check and load monthly GP practice prescribing data files")]
#[command(long_about = "
Works against the standard archive layout, one directory per month:

  <root>/2013_04_April/T201304ADDR BNFT.CSV
  <root>/2013_04_April/T201304CHEM SUBS.CSV
  <root>/2013_04_April/T201304PDPI BNFT.CSV

The root defaults to ./full_data/ and can be set with PXDATA_ROOT_DATA_DIR
(also read from a .env file) or --root-data-dir.

Examples:
  pxdata paths --from 201311 --to 201402
  pxdata check --from 201301 --to 201312
  pxdata load prescriptions --month 201304 --limit 5
")]
struct Args {
    /// Base directory holding the month directories
    #[arg(long, global = true)]
    root_data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the expected file paths for a range of months
    Paths {
        /// First month, YYYYMM
        #[arg(long)]
        from: String,
        /// Last month (inclusive), YYYYMM
        #[arg(long)]
        to: String,
        /// Only print paths for this file type
        #[arg(long, value_enum)]
        kind: Option<DataFile>,
    },
    /// Warn about any missing files in a range of months
    Check {
        /// First month, YYYYMM
        #[arg(long)]
        from: String,
        /// Last month (inclusive), YYYYMM
        #[arg(long)]
        to: String,
    },
    /// Load one month's file and print its records as JSON lines
    Load {
        #[arg(value_enum)]
        kind: DataFile,
        /// Month to load, YYYYMM
        #[arg(long)]
        month: String,
        /// Number of records to print
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn parse_month(value: &str, field_name: &str) -> Result<YearMonth> {
    let (year, month) = split_yyyymm(value).map_err(|e| anyhow!("{}: {}", field_name, e))?;
    Ok(YearMonth::new(year, month)?)
}

fn parse_range(from: &str, to: &str) -> Result<MonthRange> {
    let from = parse_month(from, "--from")?;
    let to = parse_month(to, "--to")?;
    Ok(MonthRange::new(from, to)?)
}

fn print_records<R: MonthlyRecord + Serialize>(
    loader: &DataLoader,
    month: YearMonth,
    limit: usize,
) -> Result<()> {
    let records = loader.load::<R>(month)?;
    println!("{} {} records for {}", records.len(), R::FILE, month);
    for record in records.iter().take(limit) {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pxdata=info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = Config::from_env();
    if let Some(root) = args.root_data_dir {
        config.root_data_dir = root;
    }
    info!("📋 Using data root {}", config.root_data_dir.display());

    let layout = DataLayout::new(&config);

    match args.command {
        Command::Paths { from, to, kind } => {
            let range = parse_range(&from, &to)?;
            let files: Vec<DataFile> = match kind {
                Some(kind) => vec![kind],
                None => DataFile::ALL.to_vec(),
            };
            for month in range {
                for file in &files {
                    println!("{}", layout.filepath(*file, month).display());
                }
            }
        }
        Command::Check { from, to } => {
            let range = parse_range(&from, &to)?;
            let missing = check_range(&layout, range, &mut TracingReporter);
            if missing == 0 {
                println!("✅ All {} files present", range.len() * DataFile::ALL.len());
            } else {
                println!("⚠️  {} of {} files missing", missing, range.len() * DataFile::ALL.len());
            }
        }
        Command::Load { kind, month, limit } => {
            let month = parse_month(&month, "--month")?;
            let loader = DataLoader::from_layout(layout);
            match kind {
                DataFile::Address => print_records::<AddressRecord>(&loader, month, limit)?,
                DataFile::Chemicals => print_records::<ChemicalRecord>(&loader, month, limit)?,
                DataFile::Prescriptions => {
                    print_records::<PrescriptionRecord>(&loader, month, limit)?
                }
            }
        }
    }

    Ok(())
}
