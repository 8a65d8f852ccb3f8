#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! xcinventory — render an xcdata.ini inventory from running EC2 instances.

mod cli;
mod commands;
mod config;
mod inventory;
mod logging;
mod provider;
mod types;

use clap::Parser;

use cli::{Cli, OutputCtx, write_error};
use config::{Config, default_config_paths};
use inventory::InventoryError;
use provider::AwsCli;
use types::ErrorOutput;

fn main() {
    let cli = Cli::parse();

    let ctx = OutputCtx::new(cli.output, cli.json, cli.no_header, cli.debug);

    let loaded = match Config::load(cli.config.as_deref(), &default_config_paths()) {
        Ok(loaded) => loaded,
        Err(err) => fail(&cli, &InventoryError::from(err)),
    };
    let mut config = loaded.config;
    config.apply_overrides(&cli.settings.overrides());

    if let Err(err) = logging::init(&config.log_file, &config.log_level) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
    for warning in &loaded.warnings {
        log::warn!("main: {warning}");
    }
    for source in &loaded.sources {
        log::debug!("main: loaded config file '{}'", source.display());
    }
    log::debug!(
        "main: cfg={}",
        serde_json::to_string_pretty(&config).unwrap_or_default()
    );

    let api = AwsCli::new(config.aws_command.clone(), config.profile.clone());

    if let Err(err) = commands::dispatch(cli.command.as_ref(), &config, &api, &ctx) {
        log::error!("main: {err}");
        fail(&cli, &err);
    }
}

fn fail(cli: &Cli, err: &InventoryError) -> ! {
    let error_output = ErrorOutput::from_inventory_error(err);
    write_error(&error_output, cli.output, cli.json);
    std::process::exit(err.exit_code());
}
