//! Report configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, then overridden by command-line flags.
//!
//! | Variable             | Default          | Meaning                        |
//! |----------------------|------------------|--------------------------------|
//! | `B2B_ORDERS_PATH`    | `./orders.json`  | Order book file                |
//! | `B2B_CURRENCY`       | `PLN`            | `PLN` or `USD` formatting      |
//! | `B2B_VAT_ROUNDING`   | `total`          | `total` or `line`              |
//! | `B2B_ORDER_PREFIX`   | `ZAM-`           | Prefix of suggested order ids  |
//! | `B2B_ORDER_BASELINE` | `10240`          | Number used when none parse    |

use std::env;
use std::path::PathBuf;

use b2b_core::{CurrencyFormat, OrderIdScheme, VatRounding, ORDER_ID_BASELINE, ORDER_ID_PREFIX};
use clap::Parser;

/// Report configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Order book JSON file
    pub orders_path: PathBuf,

    /// Currency rendering
    pub currency: CurrencyFormat,

    /// Where VAT is rounded
    pub vat_rounding: VatRounding,

    /// Scheme for the suggested next order id
    pub id_scheme: OrderIdScheme,

    /// Only this customer's orders (CLI only)
    pub customer_filter: Option<String>,

    /// Only this order (CLI only)
    pub order_filter: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            orders_path: PathBuf::from("./orders.json"),
            currency: CurrencyFormat::pln(),
            vat_rounding: VatRounding::OnTotal,
            id_scheme: OrderIdScheme::default(),
            customer_filter: None,
            order_filter: None,
        }
    }
}

impl ReportConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn load_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let currency_code = lookup("B2B_CURRENCY").unwrap_or_else(|| "PLN".to_string());
        let currency = CurrencyFormat::for_code(&currency_code)
            .ok_or_else(|| ConfigError::InvalidValue("B2B_CURRENCY".to_string()))?;

        let vat_rounding = match lookup("B2B_VAT_ROUNDING") {
            Some(value) => parse_rounding(&value)
                .ok_or_else(|| ConfigError::InvalidValue("B2B_VAT_ROUNDING".to_string()))?,
            None => VatRounding::OnTotal,
        };

        let prefix = lookup("B2B_ORDER_PREFIX").unwrap_or_else(|| ORDER_ID_PREFIX.to_string());
        let baseline = lookup("B2B_ORDER_BASELINE")
            .unwrap_or_else(|| ORDER_ID_BASELINE.to_string())
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue("B2B_ORDER_BASELINE".to_string()))?;

        Ok(ReportConfig {
            orders_path: lookup("B2B_ORDERS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./orders.json")),
            currency,
            vat_rounding,
            id_scheme: OrderIdScheme { prefix, baseline },
            customer_filter: None,
            order_filter: None,
        })
    }

    /// Applies command-line overrides.
    pub fn with_cli(mut self, cli: CliArgs) -> Self {
        if let Some(path) = cli.file {
            self.orders_path = path;
        }
        if cli.per_line {
            self.vat_rounding = VatRounding::PerLine;
        }
        self.customer_filter = cli.customer;
        self.order_filter = cli.order;
        self
    }
}

fn parse_rounding(value: &str) -> Option<VatRounding> {
    match value.trim().to_ascii_lowercase().as_str() {
        "total" | "on_total" => Some(VatRounding::OnTotal),
        "line" | "per_line" => Some(VatRounding::PerLine),
        _ => None,
    }
}

// =============================================================================
// Command Line
// =============================================================================

/// Command-line flags. Each one overrides its environment counterpart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "order-report")]
#[command(about = "Priced report over a B2B order book")]
pub struct CliArgs {
    /// Order book JSON (default: $B2B_ORDERS_PATH or ./orders.json)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Only orders of this customer
    #[arg(short, long, value_name = "ID")]
    pub customer: Option<String>,

    /// Only this order, with a line breakdown
    #[arg(short, long, value_name = "ID")]
    pub order: Option<String>,

    /// Round VAT per line instead of on the total
    #[arg(long)]
    pub per_line: bool,
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
