// src/main.rs

//! The main entry point for the FinityDB server application.

use anyhow::Result;
use finitydb::config::Config;
use finitydb::server;
use std::env;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let args: Vec<String> = env::args().collect();

    if args.contains(&"--version".to_string()) {
        println!("FinityDB version {VERSION}");
        return Ok(());
    }

    // The configuration path may be given as the first positional argument;
    // a missing file falls back to the built-in defaults.
    let config_path = args.get(1).map(|s| s.as_str()).unwrap_or("config.toml");

    let config = match Config::from_file(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration from \"{config_path}\": {e}");
            std::process::exit(1);
        }
    };

    // `RUST_LOG` wins over the configured level when set.
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .compact()
        .with_ansi(true)
        .init();

    info!("Starting FinityDB version {VERSION}");

    server::run(config).await
}
