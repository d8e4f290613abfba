//! # Domain Types
//!
//! Core domain types of the B2B order back-office.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Order       │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (ZAM-xxxxx) │   │  id             │       │
//! │  │  sku            │   │  customer_id ───┼──►│  name, email    │       │
//! │  │  price_cents    │   │  discount_bps   │   │  tax_id (NIP)   │       │
//! │  │  vat_rate_bps   │   │  items[]        │   │  payment terms  │       │
//! │  └────────┬────────┘   └────────┬────────┘   └─────────────────┘       │
//! │           │ snapshot            │                                       │
//! │           ▼                     ▼                                       │
//! │  ┌─────────────────────────────────────┐   ┌─────────────────┐         │
//! │  │            OrderItem                │   │   OrderStatus   │         │
//! │  │  sku / name / unit price / VAT      │   │  New → Paid →   │         │
//! │  │  frozen at order time               │   │  Processing ... │         │
//! │  └─────────────────────────────────────┘   └─────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! An [`OrderItem`] copies the product's SKU, name, price and VAT rate at the
//! moment it is attached to an order. Catalog changes never rewrite history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::{self, OrderTotals};

// =============================================================================
// VAT Rate
// =============================================================================

/// VAT rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2300 bps = 23% (Polish standard rate), 800 bps = 8% (reduced rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VatRate(u32);

impl VatRate {
    /// Creates a VAT rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        VatRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero VAT rate.
    #[inline]
    pub const fn zero() -> Self {
        VatRate(0)
    }

}

impl Default for VatRate {
    fn default() -> Self {
        VatRate::zero()
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Order-level discount in basis points.
///
/// Signed, holding whatever the order carries. The engine
/// clamps it to zero when applying it ([`DiscountRate::effective_bps`]);
/// rejecting out-of-range values is the job of
/// [`crate::validation::validate_discount_bps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(i32);

impl DiscountRate {
    /// Creates a discount from basis points (500 = 5%).
    #[inline]
    pub const fn from_bps(bps: i32) -> Self {
        DiscountRate(bps)
    }

    /// Returns the raw basis points as stored on the order.
    #[inline]
    pub const fn bps(&self) -> i32 {
        self.0
    }

    /// Returns the basis points actually applied: negative values count as 0.
    ///
    /// ## Example
    /// ```rust
    /// use b2b_core::types::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::from_bps(-250).effective_bps(), 0);
    /// assert_eq!(DiscountRate::from_bps(300).effective_bps(), 300);
    /// ```
    #[inline]
    pub const fn effective_bps(&self) -> i64 {
        if self.0 < 0 {
            0
        } else {
            self.0 as i64
        }
    }

    /// Share of the value kept after the discount, in basis points.
    ///
    /// `10000 - effective_bps`, floored at zero, so a discount above 100%
    /// keeps nothing.
    ///
    /// ## Example
    /// ```rust
    /// use b2b_core::types::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::from_bps(500).retained_bps(), 9500);
    /// assert_eq!(DiscountRate::from_bps(-250).retained_bps(), 10000);
    /// assert_eq!(DiscountRate::from_bps(15000).retained_bps(), 0);
    /// ```
    #[inline]
    pub const fn retained_bps(&self) -> i64 {
        let retained = 10_000 - self.effective_bps();
        if retained < 0 {
            0
        } else {
            retained
        }
    }

    /// No discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Catalog identifier ("p1").
    pub id: String,

    /// Stock Keeping Unit - business identifier ("CER-001").
    pub sku: String,

    /// Display name.
    pub name: String,

    /// Unit net price in grosz.
    pub price_cents: i64,

    /// VAT rate in basis points (2300 = 23%).
    pub vat_rate_bps: u32,
}

impl Product {
    /// Returns the net price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the VAT rate.
    #[inline]
    pub fn vat_rate(&self) -> VatRate {
        VatRate::from_bps(self.vat_rate_bps)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item of an order.
/// Uses snapshot pattern to freeze product data at time of ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderItem {
    /// Catalog product this line was created from.
    pub product_id: String,
    /// SKU at time of ordering (frozen).
    pub sku: String,
    /// Product name at time of ordering (frozen).
    pub name: String,
    /// Ordered quantity.
    pub quantity: i64,
    /// Unit net price in grosz at time of ordering (frozen).
    pub unit_price_cents: i64,
    /// VAT rate in basis points at time of ordering (frozen).
    pub vat_rate_bps: u32,
}

impl OrderItem {
    /// Creates an order line from explicit snapshot values.
    pub fn new(
        product_id: impl Into<String>,
        sku: impl Into<String>,
        name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
        vat_rate: VatRate,
    ) -> Self {
        OrderItem {
            product_id: product_id.into(),
            sku: sku.into(),
            name: name.into(),
            quantity,
            unit_price_cents: unit_price.cents(),
            vat_rate_bps: vat_rate.bps(),
        }
    }

    /// Creates an order line from a catalog product and quantity.
    ///
    /// ## Price Freezing
    /// Price, VAT rate, SKU and name are captured at this moment. If the
    /// catalog changes later, this line keeps the values it was sold at.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        OrderItem {
            product_id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            quantity,
            unit_price_cents: product.price_cents,
            vat_rate_bps: product.vat_rate_bps,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the VAT rate.
    #[inline]
    pub fn vat_rate(&self) -> VatRate {
        VatRate::from_bps(self.vat_rate_bps)
    }

    /// Line value before discount and VAT (unit price × quantity).
    #[inline]
    pub fn line_gross(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Workflow status of an order.
///
/// The set is linear (new → paid → processing → shipped, or cancelled), but
/// this crate enforces no transitions; the external workflow owns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Just placed, awaiting payment.
    New,
    /// Payment received.
    Paid,
    /// Being picked and packed.
    Processing,
    /// Handed over to the carrier.
    Shipped,
    /// Cancelled by customer or back-office.
    Cancelled,
}

impl OrderStatus {
    /// All statuses in workflow order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::New,
        OrderStatus::Paid,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Cancelled,
    ];

    /// Wire name, identical to the serde representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Paid => "paid",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Polish label shown to back-office staff.
    pub const fn label(&self) -> &'static str {
        match self {
            OrderStatus::New => "Nowe",
            OrderStatus::Paid => "Opłacone",
            OrderStatus::Processing => "W realizacji",
            OrderStatus::Shipped => "Wysłane",
            OrderStatus::Cancelled => "Anulowane",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::New
    }
}

// =============================================================================
// Order
// =============================================================================

/// A B2B order.
///
/// ## No Stored Totals
/// An order carries no total fields. Every figure shown for an order comes
/// from [`Order::totals`] over its current items and discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    /// Human-readable order number ("ZAM-10241").
    pub id: String,
    /// Referenced customer.
    pub customer_id: String,
    /// Creation date, ISO `YYYY-MM-DD` on the wire.
    #[ts(as = "String")]
    pub created_at: NaiveDate,
    pub status: OrderStatus,
    /// Order-level discount in basis points (500 = 5%).
    #[serde(default)]
    pub discount_bps: i32,
    #[serde(default)]
    pub note: String,
    /// Lines in display order.
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Returns the order-level discount.
    #[inline]
    pub fn discount_rate(&self) -> DiscountRate {
        DiscountRate::from_bps(self.discount_bps)
    }

    /// Derives all monetary figures of this order.
    ///
    /// ## Example
    /// ```rust
    /// use b2b_core::types::{Order, OrderItem, OrderStatus, VatRate};
    /// use b2b_core::money::Money;
    /// use chrono::NaiveDate;
    ///
    /// let order = Order {
    ///     id: "ZAM-10240".to_string(),
    ///     customer_id: "c2".to_string(),
    ///     created_at: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
    ///     status: OrderStatus::Paid,
    ///     discount_bps: 0,
    ///     note: String::new(),
    ///     items: vec![OrderItem::new(
    ///         "p3", "CER-003", "Klej do płytek 25kg", 8,
    ///         Money::from_cents(3900), VatRate::from_bps(800),
    ///     )],
    /// };
    ///
    /// let totals = order.totals();
    /// assert_eq!(totals.subtotal.cents(), 31200);
    /// assert_eq!(totals.vat.cents(), 2496);
    /// assert_eq!(totals.grand_total.cents(), 33696);
    /// ```
    pub fn totals(&self) -> OrderTotals {
        OrderTotals::compute(&self.items, self.discount_rate())
    }

    /// Shortcut for `self.totals().grand_total`.
    pub fn grand_total(&self) -> Money {
        pricing::compute_grand_total(&self.items, self.discount_rate())
    }

    /// Total number of units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A B2B customer. Orders reference customers by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    pub id: String,
    /// Company name.
    pub name: String,
    /// Purchasing contact.
    pub email: String,
    /// Tax identification number (NIP).
    pub tax_id: String,
    /// Invoice payment terms.
    pub payment_terms_days: u32,
}

impl Customer {
    /// Payment due date for an invoice issued on `issued`.
    ///
    /// ## Example
    /// ```rust
    /// use b2b_core::types::Customer;
    /// use chrono::NaiveDate;
    ///
    /// let customer = Customer {
    ///     id: "c1".into(),
    ///     name: "Firma ABC Sp. z o.o.".into(),
    ///     email: "zakupy@abc.pl".into(),
    ///     tax_id: "1234567890".into(),
    ///     payment_terms_days: 14,
    /// };
    /// let issued = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    /// assert_eq!(customer.payment_due(issued), NaiveDate::from_ymd_opt(2026, 1, 19).unwrap());
    /// ```
    pub fn payment_due(&self, issued: NaiveDate) -> NaiveDate {
        issued
            .checked_add_days(chrono::Days::new(u64::from(self.payment_terms_days)))
            .unwrap_or(NaiveDate::MAX)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tile() -> Product {
        Product {
            id: "p1".to_string(),
            sku: "CER-001".to_string(),
            name: "Płytka gres 60x60".to_string(),
            price_cents: 8999,
            vat_rate_bps: 2300,
        }
    }

    #[test]
    fn test_discount_rate_clamping() {
        assert_eq!(DiscountRate::from_bps(300).effective_bps(), 300);
        assert_eq!(DiscountRate::from_bps(-300).effective_bps(), 0);
        assert_eq!(DiscountRate::from_bps(10000).retained_bps(), 0);
        assert_eq!(DiscountRate::from_bps(i32::MAX).retained_bps(), 0);
        assert_eq!(DiscountRate::from_bps(i32::MIN).retained_bps(), 10000);
    }

    #[test]
    fn test_order_item_snapshots_product() {
        let mut product = tile();
        let item = OrderItem::from_product(&product, 10);

        // Catalog price change after ordering
        product.price_cents = 9999;
        product.vat_rate_bps = 800;

        assert_eq!(item.unit_price_cents, 8999);
        assert_eq!(item.vat_rate_bps, 2300);
        assert_eq!(item.line_gross().cents(), 89990);
    }

    #[test]
    fn test_order_status_wire_names() {
        for status in OrderStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert_eq!(OrderStatus::default(), OrderStatus::New);
    }

    #[test]
    fn test_order_status_labels() {
        let labels: Vec<&str> = OrderStatus::ALL.iter().map(OrderStatus::label).collect();
        assert_eq!(labels, vec!["Nowe", "Opłacone", "W realizacji", "Wysłane", "Anulowane"]);
    }

    #[test]
    fn test_order_deserializes_from_dashboard_json() {
        let json = r#"{
            "id": "ZAM-10239",
            "customerId": "c3",
            "createdAt": "2026-01-04",
            "status": "processing",
            "discountBps": 300,
            "note": "Dostawa na rampę.",
            "items": [{
                "productId": "p4",
                "sku": "CER-004",
                "name": "Listwa wykończeniowa",
                "quantity": 12,
                "unitPriceCents": 1590,
                "vatRateBps": 2300
            }]
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.created_at, NaiveDate::from_ymd_opt(2026, 1, 4).unwrap());
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.total_quantity(), 12);
        // 185.076 net + 42.56844 VAT = 227.64444, rounded once
        assert_eq!(order.grand_total().cents(), 22764);
    }

    #[test]
    fn test_order_rejects_non_iso_date() {
        let json = r#"{"id":"ZAM-1","customerId":"c1","createdAt":"05.01.2026","status":"new","items":[]}"#;
        assert!(serde_json::from_str::<Order>(json).is_err());
    }
}
