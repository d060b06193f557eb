pub mod cli;
pub mod core;
pub mod providers;
pub mod service;
pub mod store;

use crate::core::config::AppConfig;
use crate::providers::NationalBankProvider;
use crate::service::CurrencyService;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub enum AppCommand {
    Fetch { date: String },
    Get { date: String, code: Option<String> },
}

/// Wires the configured feed client and storage into a service.
pub fn build_service(config: &AppConfig) -> Result<CurrencyService> {
    let provider_config = &config.providers.national_bank;
    let source = NationalBankProvider::with_timeout(
        &provider_config.base_url,
        provider_config.timeout_secs.map(Duration::from_secs),
    )?;
    let repo = store::open_repository(config)?;

    Ok(CurrencyService::new(repo, Arc::new(source)))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("nbrates starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let service = build_service(&config)?;

    match command {
        AppCommand::Fetch { date } => cli::fetch::run(&service, &date).await.map(|_| ()),
        AppCommand::Get { date, code } => cli::get::run(&service, &date, code.as_deref()).await,
    }
}
