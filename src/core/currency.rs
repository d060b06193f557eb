//! Exchange rate records and the collaborators that produce and store them

use super::error::RateError;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One currency's exchange rate on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub title: String,
    pub code: String,
    pub value: f64,
    pub adate: NaiveDate,
}

/// Fetches a batch of rates for a date from an upstream feed.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn get_currency_data(&self, date: &str) -> Result<Vec<Currency>, RateError>;
}

/// Durable storage for rate records.
///
/// Implementations must tolerate concurrent `save` calls, since the service
/// issues them from independent background tasks.
#[async_trait]
pub trait CurrencyRepository: Send + Sync {
    async fn save(&self, records: Vec<Currency>) -> Result<()>;
    async fn get_currency(&self, date: &str, code: &str) -> Result<Vec<Currency>>;
}
