pub mod cli;
pub mod core;
pub mod display;
pub mod providers;

use crate::core::config::AppConfig;
use crate::display::RateDisplay;
use crate::providers::MoonPayProvider;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Show,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("moonrate starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Show => cli::show::show(&config).await,
    }
}

/// Builds the MoonPay provider from `config` and mounts a widget on it.
pub fn mount_display(config: &AppConfig) -> Result<RateDisplay> {
    let moonpay = &config.providers.moonpay;
    let provider = MoonPayProvider::new(
        &moonpay.base_url,
        &moonpay.resolved_api_key(),
        moonpay.timeout(),
    )?;
    let logo = display::load_logo(config.logo_file().as_deref());

    Ok(RateDisplay::mount(
        Arc::new(provider),
        config.pair.clone(),
        logo,
    ))
}
