//! # Order Book
//!
//! Loads customers, products and orders from a JSON file and validates them
//! before anything is priced.
//!
//! ## Ingestion Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  orders.json ──► read ──► serde_json ──► OrderBook::validate ──► Ok    │
//! │                   │           │                 │                       │
//! │                   ▼           ▼                 ▼                       │
//! │               BookError   BookError         BookError                   │
//! │                 ::Io       ::Parse          ::Invalid                   │
//! │                                                                         │
//! │  Nothing downstream ever sees a half-valid book.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use b2b_core::orders::find_customer;
use b2b_core::validation::{validate_customer, validate_orders, validate_product};
use b2b_core::{CoreError, Customer, Order, Product};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Errors raised while loading an order book.
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed order book: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

/// Everything the report needs, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl OrderBook {
    /// Reads, parses and validates the book at `path`.
    pub fn load(path: &Path) -> Result<Self, BookError> {
        debug!(path = %path.display(), "Reading order book");
        let raw = fs::read_to_string(path).map_err(|source| BookError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let book = Self::from_json(&raw)?;
        info!(
            customers = book.customers.len(),
            products = book.products.len(),
            orders = book.orders.len(),
            "Order book loaded"
        );
        Ok(book)
    }

    /// Parses and validates a book from JSON text.
    pub fn from_json(raw: &str) -> Result<Self, BookError> {
        let book: OrderBook = serde_json::from_str(raw)?;
        book.validate()?;
        Ok(book)
    }

    /// Checks every record and that each order points at a known customer.
    ///
    /// ## Rules
    /// - Customers and products pass their field validators
    /// - Orders pass [`validate_orders`] (lines, discount, unique ids)
    /// - Each order's customer exists in `customers`
    pub fn validate(&self) -> Result<(), CoreError> {
        for customer in &self.customers {
            validate_customer(customer)?;
        }
        for product in &self.products {
            validate_product(product)?;
        }
        validate_orders(&self.orders)?;

        for order in &self.orders {
            if find_customer(&self.customers, &order.customer_id).is_none() {
                warn!(order = %order.id, customer = %order.customer_id, "Order references unknown customer");
                return Err(CoreError::CustomerNotFound(order.customer_id.clone()));
            }
        }

        Ok(())
    }

    /// Customer display name, falling back to the raw id.
    pub fn customer_name<'a>(&'a self, customer_id: &'a str) -> &'a str {
        find_customer(&self.customers, customer_id)
            .map(|c| c.name.as_str())
            .unwrap_or(customer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use b2b_core::ValidationError;

    const BOOK: &str = r#"{
        "customers": [
            { "id": "c1", "name": "Firma ABC Sp. z o.o.", "email": "zakupy@abc.pl", "taxId": "1234567890", "paymentTermsDays": 14 }
        ],
        "products": [
            { "id": "p1", "sku": "CER-001", "name": "Płytka gres 60x60", "priceCents": 8999, "vatRateBps": 2300 }
        ],
        "orders": [
            {
                "id": "ZAM-10241", "customerId": "c1", "createdAt": "2026-01-05", "status": "new",
                "discountBps": 500, "note": "",
                "items": [
                    { "productId": "p1", "sku": "CER-001", "name": "Płytka gres 60x60", "quantity": 10, "unitPriceCents": 8999, "vatRateBps": 2300 }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let book = OrderBook::from_json(BOOK).unwrap();
        assert_eq!(book.orders.len(), 1);
        assert_eq!(book.customer_name("c1"), "Firma ABC Sp. z o.o.");
        assert_eq!(book.customer_name("c9"), "c9");
    }

    #[test]
    fn test_empty_book_is_valid() {
        let book = OrderBook::from_json("{}").unwrap();
        assert_eq!(book, OrderBook::default());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(OrderBook::from_json("{ \"orders\": 5 }"), Err(BookError::Parse(_))));
    }

    #[test]
    fn test_unknown_customer_is_rejected() {
        let raw = BOOK.replace("\"customerId\": \"c1\"", "\"customerId\": \"c7\"");
        let err = OrderBook::from_json(&raw).unwrap_err();
        assert!(matches!(err, BookError::Invalid(CoreError::CustomerNotFound(ref id)) if id == "c7"));
    }

    #[test]
    fn test_invalid_line_is_rejected() {
        let raw = BOOK.replace("\"quantity\": 10", "\"quantity\": -2");
        match OrderBook::from_json(&raw) {
            Err(BookError::Invalid(CoreError::Validation(err))) => {
                assert!(matches!(err.root(), ValidationError::MustBePositive { .. }));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = OrderBook::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, BookError::Io { .. }));
        assert!(err.to_string().starts_with("Failed to read /definitely/not/here.json"));
    }
}
