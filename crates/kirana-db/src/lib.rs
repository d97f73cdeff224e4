//! # kirana-db: Database Layer for Kirana
//!
//! This crate provides database access for the shop tool. It uses SQLite
//! for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! Menu Controller (apps/terminal)
//!      │
//!      ▼
//! kirana-db (THIS CRATE)
//!   ┌───────────────┐   ┌────────────────┐   ┌──────────────┐
//!   │   Database    │   │  Repositories  │   │  Migrations  │
//!   │   (pool.rs)   │◄──│ product / sale │   │  (embedded)  │
//!   └───────────────┘   └────────────────┘   └──────────────┘
//!      │
//!      ▼
//! SQLite database file (WAL mode)
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - The inventory and sales ledgers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kirana_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/kirana.db")).await?;
//!
//! let products = db.products().search_by_name("pen").await?;
//! let sales = db.sales().list_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
