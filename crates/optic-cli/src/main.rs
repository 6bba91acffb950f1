//! `optic-cart` command-line host

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{execute, load_config, Cli};
use optic_cart::{CartStore, FileStore, TracingSink};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.namespace.as_deref())?;
    tracing::debug!(
        data_dir = %cli.data_dir.display(),
        key = %config.storage_key(),
        "opening cart"
    );

    let mut store = CartStore::with_parts(FileStore::new(&cli.data_dir), TracingSink, config);
    let output = execute(&mut store, cli.command)?;
    println!("{output}");
    Ok(())
}
