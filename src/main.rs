mod auth;
mod db;
mod env;
mod error;
mod links;
mod models;
mod shell;
mod store;
mod telemetry;
#[cfg(test)]
mod test;
mod validation;
mod workflows;

use std::io;

use anyhow::Context;
use tracing::info;

use env::{Config, load_environment};
use shell::Shell;
use store::FileStore;
use telemetry::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();

    load_environment().context("Failed to load environment files")?;
    let config = Config::from_env();
    info!(data_dir = %config.data_dir.display(), "Starting fitness coach manager");

    let store = FileStore::new(config.data_dir.clone());
    store
        .bootstrap()
        .with_context(|| format!("Failed to prepare data directory {}", config.data_dir.display()))?;

    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout(), &store, config.link_generator());
    shell.run().context("Shell stopped on a storage failure")?;

    Ok(())
}
