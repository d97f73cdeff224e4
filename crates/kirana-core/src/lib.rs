//! # kirana-core: Pure Business Logic for Kirana
//!
//! This crate is the heart of the shop tool. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! apps/terminal (menu loop, prompts, presentation)
//!        │
//!        ▼
//! kirana-core (THIS CRATE)
//!   types • money • cart • receipt • validation
//!   NO I/O • NO DATABASE • PURE FUNCTIONS
//!        │
//!        ▼
//! kirana-db (SQLite pool, migrations, repositories)
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, SaleWithProduct)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The transient purchase cart
//! - [`receipt`] - Pure receipt/report rendering
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic - same input = same output
//! 2. **No I/O**: database, network and file system access are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use kirana_core::money::Money;
//!
//! // Create money from paise (never from floats!)
//! let price = Money::from_paise(1099); // ₹10.99
//! assert_eq!(price.to_string(), "₹10.99");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kirana_core::Money` instead of
// `use kirana_core::money::Money`

pub use cart::{Cart, CartItem};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct line items allowed in a single cart.
///
/// Prevents runaway carts and keeps receipts to a sane length.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single item in the cart.
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
