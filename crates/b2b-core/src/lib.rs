//! # b2b-core: Pure Business Logic for the B2B Dashboard
//!
//! This crate is the **heart** of the order back-office. It contains the
//! order pricing engine and its read models as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      B2B Dashboard Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard Frontend                           │   │
//! │  │    Order list ──► Order detail ──► Customer card ──► Reports   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Order values in, totals out            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ b2b-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │ pricing │ │ orders  │ │validation│ │   │
//! │  │   │  Order  │ │  Money  │ │ VAT +   │ │ lookup  │ │  rules   │ │   │
//! │  │   │Customer │ │ Percent │ │discount │ │ stats   │ │  checks  │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              apps/order-report (I/O adapter)                    │   │
//! │  │           load JSON, validate, compute, print report            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, OrderItem, Customer, rates)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Subtotal, discount allocation, VAT and grand total
//! - [`orders`] - Read-model helpers (lookups, next id, customer stats)
//! - [`format`] - Locale-style currency rendering
//! - [`error`] - Domain error types
//! - [`validation`] - Ingestion-boundary validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **Derived Totals**: Orders never store totals; they are recomputed from items
//! 3. **Integer Money**: All monetary values are in grosz/cents (i64)
//! 4. **Explicit Errors**: Validation happens at ingestion; arithmetic never fails
//!
//! ## Example Usage
//!
//! ```rust
//! use b2b_core::money::Money;
//! use b2b_core::pricing::compute_grand_total;
//! use b2b_core::types::{DiscountRate, OrderItem, VatRate};
//!
//! let items = vec![
//!     OrderItem::new("p1", "CER-001", "Płytka gres 60x60", 10, Money::from_cents(8999), VatRate::from_bps(2300)),
//!     OrderItem::new("p2", "CER-002", "Fuga elastyczna 2kg", 4, Money::from_cents(2450), VatRate::from_bps(2300)),
//! ];
//!
//! // 997.90 - 5% = 948.005 net, + 218.04115 VAT = 1166.04615
//! let total = compute_grand_total(&items, DiscountRate::from_bps(500));
//! assert_eq!(total.cents(), 116605);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod format;
pub mod money;
pub mod orders;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use format::{format_money, CurrencyFormat};
pub use money::Money;
pub use orders::{CustomerStats, OrderIdScheme};
pub use pricing::{OrderTotals, VatRounding};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix of human-readable order numbers ("ZAM-10241").
pub const ORDER_ID_PREFIX: &str = "ZAM-";

/// Numeric order number assumed when no existing id carries a number.
///
/// The first generated order is therefore `ZAM-10241`.
pub const ORDER_ID_BASELINE: u64 = 10240;

/// Maximum quantity of a single order line.
///
/// ## Business Reason
/// B2B orders are pallet-sized, but a six-digit quantity is almost always a
/// typo. Keeps `quantity × price` far away from `i64` overflow.
pub const MAX_ITEM_QUANTITY: i64 = 99_999;

/// Maximum unit net price in grosz (1 000 000.00).
pub const MAX_UNIT_PRICE_CENTS: i64 = 100_000_000;

/// Maximum number of lines in a single order.
pub const MAX_ORDER_ITEMS: usize = 500;
