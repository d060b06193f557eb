use thiserror::Error;

/// Errors raised while fetching and decoding a rate feed.
#[derive(Debug, Error)]
pub enum RateError {
    #[error("request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error: {status} for URL: {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("failed to decode rates XML: {0}")]
    Decode(#[from] quick_xml::de::DeError),

    #[error("invalid rate value '{value}' for currency {code}")]
    InvalidValue { code: String, value: String },

    #[error("invalid rate date '{date}' for currency {code}, expected DD.MM.YYYY")]
    InvalidDate { code: String, date: String },
}
