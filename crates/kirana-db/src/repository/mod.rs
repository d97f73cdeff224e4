//! # Repository Module
//!
//! Database repository implementations: the two ledgers of the shop.
//!
//! ## Repository Pattern
//! ```text
//! Menu Controller
//!      │  db.products().search_by_name("pen")
//!      ▼
//! ProductRepository / SaleRepository
//!      │  parameterized SQL
//!      ▼
//! SQLite Database
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Inventory ledger: product CRUD and search
//! - [`sale::SaleRepository`] - Sales ledger: atomic sale recording and reads

pub mod product;
pub mod sale;
