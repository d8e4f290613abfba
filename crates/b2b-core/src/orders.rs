//! # Order Read Models
//!
//! Lookups and aggregations over a slice of orders, as the dashboard lists
//! and customer cards need them. Everything here is a pure function of its
//! inputs; the caller owns the order book.
//!
//! ```text
//!   &[Order] ──┬──► find_order_by_id ──────► Option<&Order>
//!              ├──► next_order_id ─────────► "ZAM-10242"
//!              ├──► orders_for_customer ───► Vec<&Order>
//!              ├──► customer_stats ────────► CustomerStats
//!              └──► stats_by_customer ─────► BTreeMap<id, CustomerStats>
//! ```
//!
//! Revenue figures use [`VatRounding::OnTotal`] unless the `_with` variant
//! is given another policy.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::{compute_grand_total_with, VatRounding};
use crate::types::{Customer, Order};
use crate::{ORDER_ID_BASELINE, ORDER_ID_PREFIX};

// =============================================================================
// Lookups
// =============================================================================

/// Finds an order by its order number.
pub fn find_order_by_id<'a>(orders: &'a [Order], id: &str) -> Option<&'a Order> {
    orders.iter().find(|o| o.id == id)
}

/// Finds a customer by id.
pub fn find_customer<'a>(customers: &'a [Customer], customer_id: &str) -> Option<&'a Customer> {
    customers.iter().find(|c| c.id == customer_id)
}

/// All orders of one customer, in slice order.
pub fn orders_for_customer<'a>(orders: &'a [Order], customer_id: &str) -> Vec<&'a Order> {
    orders.iter().filter(|o| o.customer_id == customer_id).collect()
}

// =============================================================================
// Order Numbering
// =============================================================================

/// Numbering scheme for new orders: `{prefix}{number}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderIdScheme {
    /// Text before the number ("ZAM-").
    pub prefix: String,
    /// Number assumed when no existing id carries one.
    pub baseline: u64,
}

impl Default for OrderIdScheme {
    fn default() -> Self {
        OrderIdScheme {
            prefix: ORDER_ID_PREFIX.to_string(),
            baseline: ORDER_ID_BASELINE,
        }
    }
}

impl OrderIdScheme {
    /// Suggests the next order number.
    ///
    /// ## Rules
    /// - The number of an id is its trailing run of ASCII digits
    /// - Ids without one (or with one too large for `u64`) are ignored
    /// - `next = max(numbers, or baseline if none) + 1`
    ///
    /// ## Example
    /// ```rust
    /// use b2b_core::orders::OrderIdScheme;
    ///
    /// let scheme = OrderIdScheme { prefix: "INV/".to_string(), baseline: 0 };
    /// assert_eq!(scheme.next_id(["INV/7", "INV/12", "draft"]), "INV/13");
    /// assert_eq!(scheme.next_id(Vec::<&str>::new()), "INV/1");
    /// ```
    pub fn next_id<I, S>(&self, ids: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let max = ids
            .into_iter()
            .filter_map(|id| numeric_suffix(id.as_ref()))
            .max()
            .unwrap_or(self.baseline);
        format!("{}{}", self.prefix, max.saturating_add(1))
    }
}

/// Trailing ASCII digits of `id` as a number.
fn numeric_suffix(id: &str) -> Option<u64> {
    let digits_start = id
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    id[digits_start..].parse().ok()
}

/// Suggests the next order number with the default `ZAM-` scheme.
///
/// ## Example
/// ```rust
/// use b2b_core::orders::next_order_id;
///
/// assert_eq!(next_order_id(&[]), "ZAM-10241");
/// ```
pub fn next_order_id(orders: &[Order]) -> String {
    OrderIdScheme::default().next_id(orders.iter().map(|o| o.id.as_str()))
}

// =============================================================================
// Customer Statistics
// =============================================================================

/// Aggregate figures for a set of orders (usually one customer's).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerStats {
    pub orders_count: usize,
    /// Σ grand totals.
    pub revenue: Money,
    /// Latest creation date, `None` without orders.
    #[ts(as = "Option<String>")]
    pub last_order_date: Option<NaiveDate>,
}

impl CustomerStats {
    /// Folds one more order into the figures.
    fn record(&mut self, order: &Order, rounding: VatRounding) {
        self.orders_count += 1;
        self.revenue += compute_grand_total_with(&order.items, order.discount_rate(), rounding);
        self.last_order_date = self.last_order_date.max(Some(order.created_at));
    }
}

/// Count, revenue and latest date over `orders`.
///
/// Pass the result of [`orders_for_customer`] for one customer's card.
pub fn customer_stats<'a, I>(orders: I) -> CustomerStats
where
    I: IntoIterator<Item = &'a Order>,
{
    customer_stats_with(orders, VatRounding::OnTotal)
}

/// [`customer_stats`] with an explicit VAT rounding policy for revenue.
pub fn customer_stats_with<'a, I>(orders: I, rounding: VatRounding) -> CustomerStats
where
    I: IntoIterator<Item = &'a Order>,
{
    orders.into_iter().fold(CustomerStats::default(), |mut stats, order| {
        stats.record(order, rounding);
        stats
    })
}

/// [`CustomerStats`] for every customer appearing in `orders`, keyed by id.
pub fn stats_by_customer(orders: &[Order]) -> BTreeMap<String, CustomerStats> {
    stats_by_customer_with(orders, VatRounding::OnTotal)
}

/// [`stats_by_customer`] with an explicit VAT rounding policy for revenue.
pub fn stats_by_customer_with<'a, I>(orders: I, rounding: VatRounding) -> BTreeMap<String, CustomerStats>
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut stats: BTreeMap<String, CustomerStats> = BTreeMap::new();
    for order in orders {
        stats
            .entry(order.customer_id.clone())
            .or_default()
            .record(order, rounding);
    }
    stats
}

// =============================================================================
// Unit Tests
// =============================================================================
