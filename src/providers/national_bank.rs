use crate::core::{Currency, RateError, RateSource};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Date format used by the feed, e.g. `15.06.2024`.
pub const FEED_DATE_FORMAT: &str = "%d.%m.%Y";

/// Parses `raw` under `format`, accepting only the exact zero-padded text the
/// format would print back. chrono alone takes `1.3.2024`, `15.06.24` (year
/// 24) and `15.06.+2024`.
pub fn parse_strict_date(raw: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, format)
        .ok()
        .filter(|date| date.format(format).to_string() == raw)
}

#[derive(Debug, Deserialize)]
struct RatesDocument {
    #[serde(rename = "item", default)]
    items: Vec<RateItem>,
}

#[derive(Debug, Deserialize)]
struct RateItem {
    fullname: String,
    title: String,
    description: String,
    date: String,
}

impl TryFrom<RateItem> for Currency {
    type Error = RateError;

    fn try_from(item: RateItem) -> Result<Self, Self::Error> {
        let code = item.title.trim().to_string();

        let raw_value = item.description.trim();
        let value = raw_value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| RateError::InvalidValue {
                code: code.clone(),
                value: raw_value.to_string(),
            })?;

        let raw_date = item.date.trim();
        let adate = parse_strict_date(raw_date, FEED_DATE_FORMAT).ok_or_else(|| {
            RateError::InvalidDate {
                code: code.clone(),
                date: raw_date.to_string(),
            }
        })?;

        Ok(Currency {
            title: item.fullname.trim().to_string(),
            code,
            value,
            adate,
        })
    }
}

/// Decodes a rates document. Either every item converts or the whole batch
/// is rejected.
///
/// Surrounding whitespace in the value and date fields is trimmed before
/// parsing, so `" 450.25 "` is accepted. The text between must still be a
/// finite number and an exact `DD.MM.YYYY` date.
pub fn parse_rates(xml: &str) -> Result<Vec<Currency>, RateError> {
    let document: RatesDocument = quick_xml::de::from_str(xml)?;
    document.items.into_iter().map(Currency::try_from).collect()
}

pub struct NationalBankProvider {
    base_url: String,
    client: reqwest::Client,
}

impl NationalBankProvider {
    pub fn new(base_url: &str) -> Result<Self, RateError> {
        Self::with_timeout(base_url, None)
    }

    /// Without a timeout a hanging upstream blocks the fetch indefinitely.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, RateError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(NationalBankProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    fn rates_url(&self, date: &str) -> String {
        format!("{}/rss/get_rates.cfm?fdate={}", self.base_url, date)
    }
}

#[async_trait]
impl RateSource for NationalBankProvider {
    #[instrument(name = "NationalBankFetch", skip(self), fields(date = %date))]
    async fn get_currency_data(&self, date: &str) -> Result<Vec<Currency>, RateError> {
        let url = self.rates_url(date);
        debug!("Requesting rates from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RateError::Status { status, url });
        }

        let body = response.text().await?;
        let rates = parse_rates(&body)?;
        debug!(count = rates.len(), "Decoded rates");
        Ok(rates)
    }
}
