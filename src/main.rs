//! Pad bridge CLI
//!
//! Reads raw HID reports from a dance pad that enumerates as a generic
//! HID device and injects the mapped key events through a uinput
//! virtual keyboard, so keyboard-only applications can use the pad.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

mod cli;
mod commands;

use cli::Cli;
use padbridge::config::BridgeConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Cooperative stop flag: set by Ctrl+C, checked by every loop
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        ctrlc::set_handler(move || {
            stop.store(true, Ordering::SeqCst);
        })
        .context("Failed to install Ctrl+C handler")?;
    }

    if cli.all_hid {
        return commands::listen::run(stop);
    }

    let config = BridgeConfig::load(&cli.config)?;
    debug!("Target device: {}", config.device);
    commands::map::run(config, cli.print_buttons, &stop)
}
