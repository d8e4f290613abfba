//! # Currency Formatting
//!
//! Renders [`Money`] the way a locale-aware number formatter would, without
//! pulling locale data into the pure core.
//!
//! ```text
//!   Money(116604) ──► CurrencyFormat::pln() ──► "1166,04 zł"
//!   Money(1234567) ─► CurrencyFormat::pln() ──► "12 345,67 zł"
//!   Money(116604) ──► CurrencyFormat::usd() ──► "$1,166.04"
//! ```
//!
//! Polish formatting groups thousands only from five integer digits on, and
//! uses a no-break space both as group separator and before the symbol.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// No-break space, as used by pl-PL number formatting.
const NBSP: char = '\u{a0}';

/// How to render an amount in one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyFormat {
    /// ISO 4217 code.
    pub code: String,
    /// Display symbol.
    pub symbol: String,
    pub decimal_separator: char,
    pub group_separator: char,
    /// `true` for "12,00 zł", `false` for "$12.00".
    pub symbol_after: bool,
    /// Digits required in the leading group before grouping kicks in.
    pub min_grouping_digits: u8,
}

impl CurrencyFormat {
    /// Polish złoty, pl-PL conventions.
    pub fn pln() -> Self {
        CurrencyFormat {
            code: "PLN".to_string(),
            symbol: "zł".to_string(),
            decimal_separator: ',',
            group_separator: NBSP,
            symbol_after: true,
            min_grouping_digits: 2,
        }
    }

    /// US dollar, en-US conventions.
    pub fn usd() -> Self {
        CurrencyFormat {
            code: "USD".to_string(),
            symbol: "$".to_string(),
            decimal_separator: '.',
            group_separator: ',',
            symbol_after: false,
            min_grouping_digits: 1,
        }
    }

    /// Preset for an ISO code, case-insensitive.
    pub fn for_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "PLN" => Some(Self::pln()),
            "USD" => Some(Self::usd()),
            _ => None,
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::pln()
    }
}

/// Renders `money` with `format`.
///
/// ## Example
/// ```rust
/// use b2b_core::format::{format_money, CurrencyFormat};
/// use b2b_core::money::Money;
///
/// assert_eq!(format_money(Money::from_cents(116604), &CurrencyFormat::usd()), "$1,166.04");
/// assert_eq!(format_money(Money::from_cents(-550), &CurrencyFormat::usd()), "-$5.50");
/// ```
pub fn format_money(money: Money, format: &CurrencyFormat) -> String {
    let sign = if money.is_negative() { "-" } else { "" };
    let number = format!(
        "{}{}{:02}",
        group_digits(money.major().unsigned_abs(), format),
        format.decimal_separator,
        money.minor_part()
    );

    if format.symbol_after {
        format!("{}{}{}{}", sign, number, NBSP, format.symbol)
    } else {
        format!("{}{}{}", sign, format.symbol, number)
    }
}

fn group_digits(value: u64, format: &CurrencyFormat) -> String {
    let digits = value.to_string();
    if digits.len() < 3 + format.min_grouping_digits as usize {
        return digits;
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(format.group_separator);
        }
        grouped.push(c);
    }
    grouped
}
