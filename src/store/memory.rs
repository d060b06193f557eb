use super::parse_query_date;
use crate::core::{Currency, CurrencyRepository};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tracing::debug;

/// Rate storage that lives as long as the process, keyed by date and code.
#[derive(Default)]
pub struct MemoryRepository {
    inner: Mutex<BTreeMap<(NaiveDate, String), Currency>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CurrencyRepository for MemoryRepository {
    async fn save(&self, records: Vec<Currency>) -> Result<()> {
        let mut rates = self.inner.lock().await;
        debug!("Storing {} rates", records.len());
        for record in records {
            rates.insert((record.adate, record.code.clone()), record);
        }
        Ok(())
    }

    async fn get_currency(&self, date: &str, code: &str) -> Result<Vec<Currency>> {
        let adate = parse_query_date(date)?;
        let rates = self.inner.lock().await;

        let found: Vec<Currency> = if code.is_empty() {
            rates
                .range((adate, String::new())..)
                .take_while(|((d, _), _)| *d == adate)
                .map(|(_, record)| record.clone())
                .collect()
        } else {
            rates
                .get(&(adate, code.to_string()))
                .cloned()
                .into_iter()
                .collect()
        };
        debug!(%adate, code, count = found.len(), "Rate lookup");
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(code: &str, value: f64, day: u32) -> Currency {
        Currency {
            title: format!("{code} title"),
            code: code.to_string(),
            value,
            adate: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let repo = MemoryRepository::new();
        repo.save(vec![rate("USD", 450.25, 15), rate("EUR", 490.0, 15)])
            .await
            .unwrap();

        let found = repo.get_currency("15.06.2024", "USD").await.unwrap();
        assert_eq!(found, vec![rate("USD", 450.25, 15)]);

        // Unknown combinations are empty, not errors
        assert!(repo.get_currency("15.06.2024", "GBP").await.unwrap().is_empty());
        assert!(repo.get_currency("16.06.2024", "USD").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_code_returns_whole_day() {
        let repo = MemoryRepository::new();
        repo.save(vec![
            rate("USD", 450.25, 15),
            rate("EUR", 490.0, 15),
            rate("USD", 451.0, 16),
        ])
        .await
        .unwrap();

        let found = repo.get_currency("2024-06-15", "").await.unwrap();
        let codes: Vec<_> = found.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, ["EUR", "USD"]);
    }

    #[tokio::test]
    async fn test_save_overwrites_same_date_and_code() {
        let repo = MemoryRepository::new();
        repo.save(vec![rate("USD", 450.25, 15)]).await.unwrap();
        repo.save(vec![rate("USD", 452.0, 15)]).await.unwrap();

        let found = repo.get_currency("15.06.2024", "USD").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, 452.0);
    }

    #[tokio::test]
    async fn test_invalid_query_date() {
        let repo = MemoryRepository::new();
        assert!(repo.get_currency("yesterday", "USD").await.is_err());
    }
}
