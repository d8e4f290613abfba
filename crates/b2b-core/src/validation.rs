//! # Validation Module
//!
//! Ingestion-boundary validation for orders, products and customers.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Shapes, types, ISO dates                                          │
//! │  └── Unknown status strings                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rules                                 │
//! │  ├── quantity ≥ 1, price ≥ 0, VAT 0-100%, discount 0-100%              │
//! │  └── unique order ids, at least one item per order                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: pricing (never fails)                                        │
//! │  └── total functions over already-valid data                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use b2b_core::validation::{validate_discount_bps, validate_quantity};
//!
//! assert!(validate_discount_bps(500).is_ok());
//! assert!(validate_discount_bps(15000).is_err());
//! assert!(validate_quantity(0).is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{Customer, Order, OrderItem, Product};
use crate::{MAX_ITEM_QUANTITY, MAX_ORDER_ITEMS, MAX_UNIT_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// 100% in basis points.
const FULL_BPS: i64 = 10_000;

// =============================================================================
// String Validators
// =============================================================================

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a SKU.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Letters, digits, hyphens and underscores only
///
/// ## Example
/// ```rust
/// use b2b_core::validation::validate_sku;
///
/// assert!(validate_sku("CER-001").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("CER 001").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();
    require("sku", sku)?;

    if sku.chars().count() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a customer email (shape only: `local@domain.tld`).
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    require("email", email)?;

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order line quantity.
///
/// ## Rules
/// - Must be positive (≥ 1)
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in grosz.
///
/// ## Rules
/// - Must be non-negative (free samples are allowed)
/// - Must not exceed MAX_UNIT_PRICE_CENTS
///
/// ## Example
/// ```rust
/// use b2b_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(8999).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_UNIT_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "unit price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a VAT rate in basis points (0% to 100%).
pub fn validate_vat_rate_bps(bps: u32) -> ValidationResult<()> {
    if i64::from(bps) > FULL_BPS {
        return Err(ValidationError::OutOfRange {
            field: "vat rate".to_string(),
            min: 0,
            max: FULL_BPS,
        });
    }

    Ok(())
}

/// Validates an order discount in basis points (0% to 100%).
///
/// The pricing engine would clamp a negative discount and happily compute a
/// discount above the subtotal for > 100%; both are rejected here instead.
pub fn validate_discount_bps(bps: i32) -> ValidationResult<()> {
    if !(0..=FULL_BPS).contains(&i64::from(bps)) {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: FULL_BPS,
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a catalog product.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    require("id", &product.id)
        .and_then(|_| validate_sku(&product.sku))
        .and_then(|_| require("name", &product.name))
        .and_then(|_| validate_price_cents(product.price_cents))
        .and_then(|_| validate_vat_rate_bps(product.vat_rate_bps))
        .map_err(|e| e.within(format!("product {}", product.id)))
}

/// Validates one order line.
pub fn validate_order_item(item: &OrderItem) -> ValidationResult<()> {
    require("product id", &item.product_id)
        .and_then(|_| validate_sku(&item.sku))
        .and_then(|_| validate_quantity(item.quantity))
        .and_then(|_| validate_price_cents(item.unit_price_cents))
        .and_then(|_| validate_vat_rate_bps(item.vat_rate_bps))
        .map_err(|e| e.within(format!("item {}", item.sku)))
}

/// Validates an order and all of its lines.
///
/// ## Rules
/// - Order id and customer id must be present
/// - Discount within 0-100%
/// - At least one line, at most MAX_ORDER_ITEMS
/// - Every line valid (see [`validate_order_item`])
pub fn validate_order(order: &Order) -> ValidationResult<()> {
    let context = || format!("order {}", order.id);

    require("id", &order.id).map_err(|e| e.within(context()))?;
    require("customer id", &order.customer_id).map_err(|e| e.within(context()))?;
    validate_discount_bps(order.discount_bps).map_err(|e| e.within(context()))?;

    if order.items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        }
        .within(context()));
    }

    if order.items.len() > MAX_ORDER_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_ORDER_ITEMS as i64,
        }
        .within(context()));
    }

    for item in &order.items {
        validate_order_item(item).map_err(|e| e.within(context()))?;
    }

    Ok(())
}

/// Validates a customer record.
pub fn validate_customer(customer: &Customer) -> ValidationResult<()> {
    require("id", &customer.id)
        .and_then(|_| require("name", &customer.name))
        .and_then(|_| validate_email(&customer.email))
        .and_then(|_| require("tax id", &customer.tax_id))
        .map_err(|e| e.within(format!("customer {}", customer.id)))
}

/// Validates a whole order book: every order, plus unique order ids.
pub fn validate_orders(orders: &[Order]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(orders.len());
    for order in orders {
        validate_order(order)?;
        if !seen.insert(order.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "order id".to_string(),
                value: order.id.clone(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
