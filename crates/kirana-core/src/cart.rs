//! # Cart
//!
//! The transient purchase cart: an in-memory list of (product snapshot,
//! quantity) lines accumulated during one purchase session and discarded
//! after finalization.
//!
//! ## Invariants
//! - Lines are unique by `product_id` (adding the same product merges
//!   quantities)
//! - Quantity per line is positive and at most [`crate::MAX_ITEM_QUANTITY`]
//! - At most [`crate::MAX_CART_ITEMS`] distinct lines

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Item
// =============================================================================

/// An item in the purchase cart.
///
/// `name` and `unit_price_paise` are frozen copies of the product data at
/// the time of adding: the cart keeps displaying consistent lines even if
/// the product row changes underneath it before finalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Product ID (for the database write at finalization).
    pub product_id: i64,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Price in paise at time of adding (frozen).
    pub unit_price_paise: i64,

    /// Quantity in cart.
    pub quantity: i64,

    /// When this item was added to the cart.
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new cart item from a product and quantity.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            product_id: product.product_id,
            name: product.name.clone(),
            unit_price_paise: product.price_paise,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Calculates the line total (unit price × quantity) in paise.
    pub fn line_total_paise(&self) -> i64 {
        self.unit_price_paise * self.quantity
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_paise(self.line_total_paise())
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The purchase cart.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Cart {
    /// Line items, in the order they were first added.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a product to the cart, merging with an existing line.
    ///
    /// If the product is already in the cart the quantities are combined;
    /// otherwise a new line is appended.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product.product_id)
        {
            let new_qty = item.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = new_qty;
            return Ok(());
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(CartItem::from_product(product, quantity));
        Ok(())
    }

    /// Updates the quantity of a line. Quantity 0 removes the line.
    pub fn update_quantity(&mut self, product_id: i64, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::ProductNotInCart(product_id)),
        }
    }

    /// Removes a line from the cart by product ID.
    pub fn remove_item(&mut self, product_id: i64) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == initial_len {
            Err(CoreError::ProductNotInCart(product_id))
        } else {
            Ok(())
        }
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of distinct lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calculates the cart total in paise.
    pub fn total_paise(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_paise()).sum()
    }

    /// Returns the cart total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise())
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
