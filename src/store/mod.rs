pub mod disk;
pub mod memory;

use crate::core::config::{AppConfig, StorageKind};
use crate::core::CurrencyRepository;
use crate::providers::national_bank::{FEED_DATE_FORMAT, parse_strict_date};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use disk::DiskRepository;
use memory::MemoryRepository;
use std::sync::Arc;
use tracing::debug;

/// Parses a lookup date given either in the feed's `DD.MM.YYYY` form or as
/// ISO `YYYY-MM-DD`.
pub fn parse_query_date(date: &str) -> Result<NaiveDate> {
    let date = date.trim();
    parse_strict_date(date, FEED_DATE_FORMAT)
        .or_else(|| parse_strict_date(date, "%Y-%m-%d"))
        .ok_or_else(|| anyhow!("Invalid date: {date}, expected DD.MM.YYYY or YYYY-MM-DD"))
}

/// Opens the repository selected by the configuration.
pub fn open_repository(config: &AppConfig) -> Result<Arc<dyn CurrencyRepository>> {
    match config.storage {
        StorageKind::Memory => {
            debug!("Using in-memory rate storage");
            Ok(Arc::new(MemoryRepository::new()))
        }
        StorageKind::Disk => {
            let path = config.default_data_path()?.join("rates");
            debug!("Using disk rate storage at {}", path.display());
            let repository = DiskRepository::open(&path)
                .with_context(|| format!("Failed to open rate storage at {}", path.display()))?;
            Ok(Arc::new(repository))
        }
    }
}
