//! # Order Report Library
//!
//! Command-line reporting over a B2B order book. Pricing lives in
//! `b2b-core`; this crate handles files, configuration and output.
//!
//! ## Module Organization
//! ```text
//! order_report/
//! ├── lib.rs          ◄─── You are here (run & logging setup)
//! ├── config.rs       ◄─── ReportConfig (env) + CliArgs (flags)
//! ├── book.rs         ◄─── OrderBook loading and validation
//! └── report.rs       ◄─── Report rows and table rendering
//! ```
//!
//! ## Run Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  clap ──► CliArgs ──► ReportConfig::load().with_cli()                  │
//! │                                │                                        │
//! │                                ▼                                        │
//! │                       OrderBook::load(path)                             │
//! │                                │                                        │
//! │                                ▼                                        │
//! │                build_report ──► stdout                                  │
//! │                                                                         │
//! │  Logs go to stderr so the report can be piped.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod book;
pub mod config;
pub mod report;

use anyhow::Context;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::book::OrderBook;
use crate::config::{CliArgs, ReportConfig};
use crate::report::build_report;

/// Runs the report for already parsed command-line flags.
pub fn run(cli: CliArgs) -> anyhow::Result<()> {
    let config = ReportConfig::load()
        .context("Invalid environment configuration")?
        .with_cli(cli);
    debug!(path = %config.orders_path.display(), currency = %config.currency.code, "Configuration loaded");

    let book = OrderBook::load(&config.orders_path)
        .with_context(|| format!("Cannot load order book {}", config.orders_path.display()))?;

    let report = build_report(&book, &config)?;
    println!("{}", report);
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=order_report=trace` - Trace this crate only
/// - Default: WARN, so a normal run prints only the report
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
