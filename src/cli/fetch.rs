use super::ui;
use crate::service::CurrencyService;
use anyhow::{Context, Result};

/// Fetches the rates for `date` and waits until they are stored.
///
/// The service itself returns before the write completes; the CLI has to
/// wait here or the runtime would shut down underneath the background task.
pub async fn run(service: &CurrencyService, date: &str) -> Result<usize> {
    let spinner = ui::new_spinner(&format!("Fetching rates for {date}"));
    let fetched = service.save_currency(date).await;
    spinner.finish_and_clear();
    let handle = fetched.with_context(|| format!("Failed to fetch rates for {date}"))?;

    let spinner = ui::new_spinner("Saving rates");
    let stored = handle.wait().await;
    spinner.finish_and_clear();
    let count = stored.with_context(|| format!("Failed to save rates for {date}"))?;

    println!(
        "{} {} rates for {}",
        ui::style_text("Stored", ui::StyleType::Success),
        count,
        ui::style_text(date, ui::StyleType::Title)
    );
    Ok(count)
}
