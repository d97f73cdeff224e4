//! # Domain Types
//!
//! Core domain types used throughout Kirana.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────┐   ┌─────────────────┐   ┌───────────────────┐
//! │    Product      │   │      Sale       │   │  SaleWithProduct  │
//! │  ─────────────  │   │  ─────────────  │   │  ───────────────  │
//! │  product_id     │   │  sales_id       │   │  Sale fields +    │
//! │  name           │   │  product_id     │   │  product_name     │
//! │  price_paise    │   │  quantity       │   │  (None if the     │
//! │  stock          │   │  total_amount   │   │   product was     │
//! └─────────────────┘   │  sale_date      │   │   removed)        │
//!                       │  payment_mode   │   └───────────────────┘
//!                       └─────────────────┘
//! ```
//!
//! Identifiers are system-generated integer primary keys; monetary columns
//! carry paise (see [`crate::money`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the shop inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (AUTOINCREMENT primary key).
    pub product_id: i64,

    /// Display name shown in the inventory and on receipts.
    pub name: String,

    /// Unit price in paise.
    pub price_paise: i64,

    /// Current stock level.
    pub stock: i64,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }

    /// Checks whether `quantity` units can be sold from current stock.
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity > 0 && self.stock >= quantity
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One recorded sale line: a quantity of a single product.
///
/// Uses the snapshot pattern: `total_amount_paise` is price × quantity at
/// the time of sale and is never recomputed, so later price changes or
/// product removal do not rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    /// Unique identifier (AUTOINCREMENT primary key).
    pub sales_id: i64,

    /// The product sold. May dangle if the product was removed later.
    pub product_id: i64,

    /// Units sold. Always positive.
    pub quantity: i64,

    /// Line total in paise, frozen at sale time.
    pub total_amount_paise: i64,

    /// When the sale was recorded.
    pub sale_date: DateTime<Utc>,

    /// Free-text payment label ("Cash", "Card"). Optional.
    pub payment_mode: Option<String>,
}

impl Sale {
    /// Returns the frozen line total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_paise(self.total_amount_paise)
    }

    /// Derives the unit price from the frozen total.
    ///
    /// Used when the product row is gone and its live price is unavailable.
    pub fn unit_price(&self) -> Money {
        if self.quantity > 0 {
            Money::from_paise(self.total_amount_paise / self.quantity)
        } else {
            Money::zero()
        }
    }
}

// =============================================================================
// SaleWithProduct
// =============================================================================

/// A sale joined with the referenced product's current display name.
///
/// Read model for the sales report: the LEFT JOIN leaves `product_name`
/// as `None` when the product has since been removed, and callers render a
/// fallback label instead of failing the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleWithProduct {
    pub sales_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub total_amount_paise: i64,
    pub sale_date: DateTime<Utc>,
    pub payment_mode: Option<String>,
    /// Current product name, `None` if the product row no longer exists.
    pub product_name: Option<String>,
}

impl SaleWithProduct {
    /// Returns the frozen line total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_paise(self.total_amount_paise)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i64) -> Product {
        Product {
            product_id: 1,
            name: "Pen".to_string(),
            price_paise: 1000,
            stock,
        }
    }

    #[test]
    fn test_product_price_helper() {
        assert_eq!(product(5).price(), Money::from_paise(1000));
    }

    #[test]
    fn test_can_sell() {
        assert!(product(5).can_sell(5));
        assert!(product(5).can_sell(1));
        assert!(!product(5).can_sell(6));
        assert!(!product(5).can_sell(0));
        assert!(!product(0).can_sell(1));
    }

    #[test]
    fn test_sale_unit_price_derived_from_total() {
        let sale = Sale {
            sales_id: 1,
            product_id: 7,
            quantity: 3,
            total_amount_paise: 3000,
            sale_date: Utc::now(),
            payment_mode: Some("Cash".to_string()),
        };
        assert_eq!(sale.unit_price(), Money::from_paise(1000));
        assert_eq!(sale.total_amount(), Money::from_paise(3000));
    }
}
