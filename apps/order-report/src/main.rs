//! # Order Report Entry Point
//!
//! ```text
//! $ order-report --file orders.json --customer c1
//! ```
//!
//! ## Startup Sequence
//! 1. Parse flags (clap exits on `--help` or bad input)
//! 2. Initialize tracing (stderr), read the environment
//! 3. Load and validate the order book
//! 4. Print the report

use clap::Parser;
use order_report::config::CliArgs;

fn main() -> anyhow::Result<()> {
    let cli = CliArgs::parse();
    order_report::init_tracing();
    order_report::run(cli)
}
