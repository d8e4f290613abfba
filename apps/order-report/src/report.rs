//! # Report
//!
//! Turns a validated [`OrderBook`] into printable rows. All figures come from
//! b2b-core; this module only selects, arranges and formats them.
//!
//! ```text
//! ORDER       CUSTOMER                  DATE        STATUS         SUBTOTAL     DISCOUNT          VAT        TOTAL
//! ZAM-10241   Firma ABC Sp. z o.o.      2026-01-05  Nowe           997,90 zł     49,90 zł    218,04 zł   1166,05 zł
//! ...
//! Customers
//!   c1  Firma ABC Sp. z o.o.   2 orders   revenue ...   last 2026-01-05
//! Next order id: ZAM-10242
//! ```

use std::fmt;

use b2b_core::orders::{
    find_customer, find_order_by_id, orders_for_customer, stats_by_customer_with,
};
use b2b_core::pricing::{line_breakdown, LineAllocation};
use b2b_core::{
    format_money, CoreError, CoreResult, CurrencyFormat, CustomerStats, Money, Order, OrderStatus,
    OrderTotals,
};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::book::OrderBook;
use crate::config::ReportConfig;

/// One priced order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub id: String,
    pub customer: String,
    pub created_at: NaiveDate,
    pub status: OrderStatus,
    pub totals: OrderTotals,
}

/// One customer's aggregate over the selected orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    pub customer_id: String,
    pub name: String,
    pub stats: CustomerStats,
}

/// A rendered-ready report.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub orders: Vec<OrderRow>,
    pub customers: Vec<CustomerRow>,
    /// Line breakdown, only when a single order was requested.
    pub lines: Vec<LineAllocation>,
    /// Σ grand totals of `orders`.
    pub revenue: Money,
    /// Suggested id for the next order in the whole book.
    pub next_order_id: String,
    pub currency: CurrencyFormat,
}

/// Builds the report for `book` as `config` selects it.
///
/// ## Selection
/// - `order_filter`: exactly that order, plus its line breakdown
/// - `customer_filter`: that customer's orders
/// - neither: the whole book
///
/// Unknown ids are [`CoreError::OrderNotFound`] / [`CoreError::CustomerNotFound`].
pub fn build_report(book: &OrderBook, config: &ReportConfig) -> CoreResult<Report> {
    let selected = select_orders(book, config)?;
    debug!(selected = selected.len(), rounding = ?config.vat_rounding, "Pricing orders");

    let orders: Vec<OrderRow> = selected
        .iter()
        .map(|order| OrderRow {
            id: order.id.clone(),
            customer: book.customer_name(&order.customer_id).to_string(),
            created_at: order.created_at,
            status: order.status,
            totals: OrderTotals::compute_with(&order.items, order.discount_rate(), config.vat_rounding),
        })
        .collect();

    let customers = stats_by_customer_with(selected.iter().copied(), config.vat_rounding)
        .into_iter()
        .map(|(customer_id, stats)| CustomerRow {
            name: book.customer_name(&customer_id).to_string(),
            customer_id,
            stats,
        })
        .collect();

    let lines = match (&config.order_filter, selected.as_slice()) {
        (Some(_), [order]) => line_breakdown(&order.items, order.discount_rate()),
        _ => Vec::new(),
    };

    let revenue: Money = orders.iter().map(|row| row.totals.grand_total).sum();
    let next_order_id = config
        .id_scheme
        .next_id(book.orders.iter().map(|o| o.id.as_str()));

    info!(orders = orders.len(), revenue = %revenue, next = %next_order_id, "Report built");

    Ok(Report {
        orders,
        customers,
        lines,
        revenue,
        next_order_id,
        currency: config.currency.clone(),
    })
}

fn select_orders<'a>(book: &'a OrderBook, config: &ReportConfig) -> CoreResult<Vec<&'a Order>> {
    if let Some(id) = &config.order_filter {
        let order = find_order_by_id(&book.orders, id)
            .ok_or_else(|| CoreError::OrderNotFound(id.clone()))?;
        return Ok(vec![order]);
    }

    if let Some(customer_id) = &config.customer_filter {
        find_customer(&book.customers, customer_id)
            .ok_or_else(|| CoreError::CustomerNotFound(customer_id.clone()))?;
        return Ok(orders_for_customer(&book.orders, customer_id));
    }

    Ok(book.orders.iter().collect())
}

// =============================================================================
// Rendering
// =============================================================================

impl Report {
    fn money(&self, value: Money) -> String {
        format_money(value, &self.currency)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<11} {:<25} {:<10}  {:<12} {:>14} {:>14} {:>14} {:>14}",
            "ORDER", "CUSTOMER", "DATE", "STATUS", "SUBTOTAL", "DISCOUNT", "VAT", "TOTAL"
        )?;
        for row in &self.orders {
            writeln!(
                f,
                "{:<11} {:<25} {:<10}  {:<12} {:>14} {:>14} {:>14} {:>14}",
                row.id,
                truncate(&row.customer, 25),
                row.created_at,
                row.status.label(),
                self.money(row.totals.subtotal),
                self.money(row.totals.discount),
                self.money(row.totals.vat),
                self.money(row.totals.grand_total),
            )?;
        }

        if !self.lines.is_empty() {
            writeln!(f)?;
            writeln!(f, "Lines")?;
            for line in &self.lines {
                writeln!(
                    f,
                    "  {:<12} gross {:>14}  net {:>14}  VAT {:>14}",
                    line.sku,
                    self.money(line.gross),
                    self.money(line.net),
                    self.money(line.vat),
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Customers")?;
        for customer in &self.customers {
            let last = customer
                .stats
                .last_order_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "  {:<6} {:<25} {:>3} orders  revenue {:>14}  last {}",
                customer.customer_id,
                truncate(&customer.name, 25),
                customer.stats.orders_count,
                self.money(customer.stats.revenue),
                last,
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Revenue: {}", self.money(self.revenue))?;
        write!(f, "Next order id: {}", self.next_order_id)
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}
