use super::parse_query_date;
use crate::core::{Currency, CurrencyRepository};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const RATES_PARTITION: &str = "rates";

/// Rate storage backed by a fjall keyspace.
///
/// Each record is stored as JSON under `YYYY-MM-DD/CODE`, so a prefix scan on
/// the date yields that day's rates ordered by code.
pub struct DiskRepository {
    keyspace: Keyspace,
    rates: PartitionHandle,
}

fn date_prefix(adate: NaiveDate) -> String {
    format!("{}/", adate.format("%Y-%m-%d"))
}

fn record_key(adate: NaiveDate, code: &str) -> String {
    format!("{}{}", date_prefix(adate), code)
}

impl DiskRepository {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)?;

        let keyspace = Config::new(path).open()?;
        let rates = keyspace.open_partition(RATES_PARTITION, PartitionCreateOptions::default())?;
        Ok(Self { keyspace, rates })
    }
}

#[async_trait]
impl CurrencyRepository for DiskRepository {
    async fn save(&self, records: Vec<Currency>) -> Result<()> {
        let mut batch = self.keyspace.batch();
        for record in &records {
            let key = record_key(record.adate, &record.code);
            batch.insert(&self.rates, key.as_bytes(), serde_json::to_vec(record)?);
        }
        batch.commit().context("Failed to commit rate batch")?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to persist rate journal")?;
        debug!("Stored {} rates", records.len());
        Ok(())
    }

    async fn get_currency(&self, date: &str, code: &str) -> Result<Vec<Currency>> {
        let adate = parse_query_date(date)?;

        if !code.is_empty() {
            return match self.rates.get(record_key(adate, code))? {
                Some(value) => Ok(vec![serde_json::from_slice(&value)?]),
                None => Ok(Vec::new()),
            };
        }

        let mut found = Vec::new();
        for entry in self.rates.prefix(date_prefix(adate)) {
            let (_, value) = entry?;
            found.push(serde_json::from_slice(&value)?);
        }
        debug!(%adate, count = found.len(), "Rate lookup");
        Ok(found)
    }
}
