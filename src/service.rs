//! Coordinates fetching rates from the feed and persisting them.

use crate::core::{Currency, CurrencyRepository, RateError, RateSource};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Receives the outcome of background persistence, which is never returned
/// through [`CurrencyService::save_currency`] itself.
pub trait PersistListener: Send + Sync {
    fn saved(&self, date: &str, count: usize);
    fn failed(&self, date: &str, error: &anyhow::Error);
}

/// Reports persistence outcomes through `tracing`.
pub struct TracingListener;

impl PersistListener for TracingListener {
    fn saved(&self, date: &str, count: usize) {
        info!(date, count, "Currency data saved to storage");
    }

    fn failed(&self, date: &str, error: &anyhow::Error) {
        error!(date, error = %error, "Error saving currency data to storage");
    }
}

/// Handle to a background persistence task.
///
/// Dropping it detaches the task, which keeps running to completion.
#[must_use = "dropping the handle detaches persistence; await `wait` to observe it"]
pub struct PersistHandle {
    date: String,
    handle: JoinHandle<Result<usize>>,
}

impl PersistHandle {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the write and returns the number of records persisted.
    pub async fn wait(self) -> Result<usize> {
        let PersistHandle { date, handle } = self;
        handle
            .await
            .with_context(|| format!("Persistence task for {date} did not complete"))?
    }
}

pub struct CurrencyService {
    repo: Arc<dyn CurrencyRepository>,
    source: Arc<dyn RateSource>,
    listener: Arc<dyn PersistListener>,
}

impl CurrencyService {
    pub fn new(repo: Arc<dyn CurrencyRepository>, source: Arc<dyn RateSource>) -> Self {
        Self::with_listener(repo, source, Arc::new(TracingListener))
    }

    pub fn with_listener(
        repo: Arc<dyn CurrencyRepository>,
        source: Arc<dyn RateSource>,
        listener: Arc<dyn PersistListener>,
    ) -> Self {
        CurrencyService {
            repo,
            source,
            listener,
        }
    }

    /// Fetches the rates for `date` and hands them to a background task for
    /// persistence.
    ///
    /// Returns as soon as the fetch succeeds. A successful return says nothing
    /// about durability: storage failures only reach the listener and
    /// [`PersistHandle::wait`].
    pub async fn save_currency(&self, date: &str) -> Result<PersistHandle, RateError> {
        let rates = self.source.get_currency_data(date).await?;
        debug!(date, count = rates.len(), "Fetched rates, persisting in background");

        let repo = Arc::clone(&self.repo);
        let listener = Arc::clone(&self.listener);
        let task_date = date.to_string();
        let handle = tokio::spawn(async move {
            let count = rates.len();
            match repo.save(rates).await {
                Ok(()) => {
                    listener.saved(&task_date, count);
                    Ok(count)
                }
                Err(e) => {
                    listener.failed(&task_date, &e);
                    Err(e)
                }
            }
        });

        Ok(PersistHandle {
            date: date.to_string(),
            handle,
        })
    }

    pub async fn get_currency(&self, date: &str, code: &str) -> Result<Vec<Currency>> {
        self.repo.get_currency(date, code).await
    }
}
