//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    10 × 89.99 + 4 × 24.5 = 997.9000000000001  ❌ WRONG!                 │
//! │                                                                         │
//! │  Summing a whole order book of such values drifts further with         │
//! │  every addition, and the dashboard total stops matching the invoice.   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer grosz (minor units)                              │
//! │    10 × 8999 + 4 × 2450 = 99790 grosz = 997.90 zł                      │
//! │    Every rounding happens in ONE place, explicitly, half-up            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use b2b_core::money::Money;
//!
//! // Create from grosz/cents (preferred)
//! let price = Money::from_cents(8999); // 89.99
//!
//! // Arithmetic operations
//! let line = price.multiply_quantity(10);    // 899.90
//! let total = line + Money::from_cents(9800); // 997.90
//! assert_eq!(total.cents(), 99790);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (grosz for PLN).
///
/// ## Design Decisions
/// - **i64 (signed)**: Intermediate differences (subtotal - discount) may dip
///   below zero before being floored
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Product.price_cents ──► OrderItem.unit_price_cents (snapshot)          │
/// │                                   │                                     │
/// │                                   ▼                                     │
/// │  subtotal ──► discount ──► net after discount ──► VAT ──► grand total   │
/// │                                                                         │
/// │  EVERY monetary value in the engine flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from grosz/cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use b2b_core::money::Money;
    ///
    /// let price = Money::from_cents(8999); // Represents 89.99
    /// assert_eq!(price.cents(), 8999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Narrows a wide intermediate back to `Money`, saturating at the `i64`
    /// bounds instead of wrapping.
    #[inline]
    pub(crate) fn from_i128_saturating(value: i128) -> Self {
        match i64::try_from(value) {
            Ok(cents) => Money(cents),
            Err(_) if value < 0 => Money(i64::MIN),
            Err(_) => Money(i64::MAX),
        }
    }

    /// Returns the value in grosz/cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (złoty) portion.
    ///
    /// ## Example
    /// ```rust
    /// use b2b_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(99790).major(), 997);
    /// assert_eq!(Money::from_cents(-550).major(), -5);
    /// ```
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (grosz) portion (always 0-99).
    ///
    /// ## Example
    /// ```rust
    /// use b2b_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(99790).minor_part(), 90);
    /// assert_eq!(Money::from_cents(-550).minor_part(), 50); // Absolute value
    /// ```
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Floors the value at zero.
    ///
    /// ## Example
    /// ```rust
    /// use b2b_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-500).non_negative(), Money::zero());
    /// assert_eq!(Money::from_cents(500).non_negative().cents(), 500);
    /// ```
    #[inline]
    pub const fn non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            Money(self.0)
        }
    }

    /// Returns `bps` basis points of this amount, rounded half-up.
    ///
    /// ## Example
    /// ```rust
    /// use b2b_core::money::Money;
    ///
    /// // 5% of 997.90 = 49.895 → 49.90
    /// let subtotal = Money::from_cents(99790);
    /// assert_eq!(subtotal.percentage(500).cents(), 4990);
    /// ```
    pub fn percentage(&self, bps: i64) -> Money {
        Money::from_i128_saturating(div_round_half_up(
            self.0 as i128 * bps as i128,
            BPS_SCALE,
        ))
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use b2b_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1590); // 15.90
    /// let line_total = unit_price.multiply_quantity(12);
    /// assert_eq!(line_total.cents(), 19080); // 190.80
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money::from_i128_saturating(self.0 as i128 * qty as i128)
    }
}

// =============================================================================
// Rounding
// =============================================================================

/// Basis points in one whole (100%).
pub(crate) const BPS_SCALE: i128 = 10_000;

/// Divides `num / den` rounding half-up (towards +∞ on exact halves).
///
/// `den` must be positive.
#[inline]
pub(crate) fn div_round_half_up(num: i128, den: i128) -> i128 {
    debug_assert!(den > 0, "divisor must be positive");
    num.saturating_mul(2)
        .saturating_add(den)
        .div_euclid(den.saturating_mul(2))
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering ("997.90"). Use [`crate::format`] for
/// locale-aware output with a currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().unsigned_abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(8999);
        assert_eq!(money.cents(), 8999);
        assert_eq!(money.major(), 89);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(99790).to_string(), "997.90");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let mut c = a;
        c += b;
        c -= Money::from_cents(250);
        assert_eq!(c.cents(), 1250);
    }

    #[test]
    fn test_sum() {
        let lines = [Money::from_cents(89990), Money::from_cents(9800)];
        let total: Money = lines.iter().sum();
        assert_eq!(total.cents(), 99790);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_addition_saturates() {
        let huge = Money::from_cents(i64::MAX - 1);
        assert_eq!((huge + huge).cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - huge).cents(), i64::MIN);

        let total: Money = [huge, huge, Money::from_cents(5)].iter().sum();
        assert_eq!(total.cents(), i64::MAX);

        let mut acc = huge;
        acc += huge;
        assert_eq!(acc.cents(), i64::MAX);
    }

    #[test]
    fn test_percentage_half_cent() {
        // 3% of 190.80 = 5.724 → 5.72
        assert_eq!(Money::from_cents(19080).percentage(300).cents(), 572);
        // 5% of 997.90 = 49.895 → 49.90
        assert_eq!(Money::from_cents(99790).percentage(500).cents(), 4990);
        assert!(Money::from_cents(99790).percentage(0).is_zero());
    }

    #[test]
    fn test_div_round_half_up() {
        assert_eq!(div_round_half_up(5, 10), 1);
        assert_eq!(div_round_half_up(4, 10), 0);
        assert_eq!(div_round_half_up(15, 10), 2);
        assert_eq!(div_round_half_up(25, 10), 3);
        assert_eq!(div_round_half_up(-4, 10), 0);
        assert_eq!(div_round_half_up(-6, 10), -1);
        assert_eq!(div_round_half_up(0, 7), 0);
    }

    #[test]
    fn test_non_negative_and_checks() {
        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert!(negative.non_negative().is_zero());
        assert_eq!(negative.abs().cents(), 100);

        let positive = Money::from_cents(100);
        assert!(positive.is_positive());
        assert_eq!(positive.non_negative(), positive);
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        assert_eq!(Money::from_cents(1590).multiply_quantity(12).cents(), 19080);
        assert_eq!(Money::from_cents(i64::MAX).multiply_quantity(2).cents(), i64::MAX);
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Money::from_cents(2450)).unwrap();
        assert_eq!(json, "2450");
    }
}
