//! # Product Repository
//!
//! Database operations for the inventory ledger.
//!
//! ## Key Operations
//! - CRUD over the `products` table
//! - Substring search (parameterized `LIKE`)
//! - Stock adjustments (restock and sale decrements)
//!
//! All statements are parameterized; user-supplied values never reach the
//! SQL text.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use kirana_core::validation::{validate_price_paise, validate_product_name, validate_quantity,
    validate_search_query, validate_stock};
use kirana_core::{Money, Product};

const SELECT_PRODUCT: &str =
    "SELECT product_id, name, price_paise, stock FROM products WHERE product_id = ?1";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let pen = repo.insert("Pen", Money::from_paise(1000), 50).await?;
/// let found = repo.search_by_name("pen").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product and returns it with its generated id.
    ///
    /// Validates the name (non-empty), price (non-negative) and initial
    /// stock (non-negative) before writing. There is no duplicate-name
    /// check: two products may share a name.
    pub async fn insert(&self, name: &str, price: Money, stock: i64) -> DbResult<Product> {
        let name = validate_product_name(name)?;
        validate_price_paise(price.paise())?;
        validate_stock(stock)?;

        debug!(name = %name, price = %price, stock = %stock, "Inserting product");

        let result = sqlx::query(
            "INSERT INTO products (name, price_paise, stock) VALUES (?1, ?2, ?3)",
        )
        .bind(&name)
        .bind(price.paise())
        .bind(stock)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            product_id: result.last_insert_rowid(),
            name,
            price_paise: price.paise(),
            stock,
        })
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(SELECT_PRODUCT)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Searches products whose name contains `query`.
    ///
    /// Uses a parameterized `LIKE '%query%'`; matching follows SQLite's
    /// default collation (ASCII case-insensitive). An empty result set is
    /// not an error.
    pub async fn search_by_name(&self, query: &str) -> DbResult<Vec<Product>> {
        let query = validate_search_query(query)?;

        debug!(query = %query, "Searching products");

        let pattern = format!("%{}%", query);
        let products = sqlx::query_as::<_, Product>(
            "SELECT product_id, name, price_paise, stock \
             FROM products WHERE name LIKE ?1 ORDER BY product_id",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Lists all products in id order.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT product_id, name, price_paise, stock FROM products ORDER BY product_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Restocks a product: `stock = stock + quantity`.
    ///
    /// The quantity must be positive. The delta-style update avoids a
    /// read-modify-write race on the stock column.
    ///
    /// ## Returns
    /// The updated product.
    pub async fn restock(&self, id: i64, quantity: i64) -> DbResult<Product> {
        validate_quantity(quantity)?;

        debug!(id = %id, quantity = %quantity, "Restocking product");

        let result = sqlx::query("UPDATE products SET stock = stock + ?2 WHERE product_id = ?1")
            .bind(id)
            .bind(quantity)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product row.
    ///
    /// Hard delete: sales history referencing the product is left in place
    /// and every sale read path tolerates the dangling reference.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE product_id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use kirana_core::ValidationError;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_then_get_roundtrip() {
        let db = test_db().await;
        let repo = db.products();

        let pen = repo.insert("Pen", Money::from_paise(1000), 50).await.unwrap();
        assert!(pen.product_id > 0);

        let fetched = repo.get_by_id(pen.product_id).await.unwrap().unwrap();
        assert_eq!(fetched, pen);
        assert_eq!(fetched.name, "Pen");
        assert_eq!(fetched.price_paise, 1000);
        assert_eq!(fetched.stock, 50);
    }

    #[tokio::test]
    async fn test_insert_generates_fresh_ids() {
        let db = test_db().await;
        let repo = db.products();

        let a = repo.insert("Pen", Money::from_paise(1000), 1).await.unwrap();
        let b = repo.insert("Book", Money::from_paise(25000), 1).await.unwrap();
        assert_ne!(a.product_id, b.product_id);
    }

    #[tokio::test]
    async fn test_insert_rejects_bad_input() {
        let db = test_db().await;
        let repo = db.products();

        assert!(matches!(
            repo.insert("  ", Money::from_paise(100), 1).await,
            Err(DbError::Validation(ValidationError::Required { .. }))
        ));
        assert!(matches!(
            repo.insert("Pen", Money::from_paise(-100), 1).await,
            Err(DbError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(matches!(
            repo.insert("Pen", Money::from_paise(100), -1).await,
            Err(DbError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }

    #[tokio::test]
    async fn test_search_by_name_substring() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert("Ball Pen", Money::from_paise(1000), 5).await.unwrap();
        repo.insert("Gel Pen", Money::from_paise(1500), 5).await.unwrap();
        repo.insert("Notebook", Money::from_paise(4000), 5).await.unwrap();

        let pens = repo.search_by_name("Pen").await.unwrap();
        assert_eq!(pens.len(), 2);

        // SQLite LIKE is ASCII case-insensitive by default.
        let pens_lower = repo.search_by_name("pen").await.unwrap();
        assert_eq!(pens_lower.len(), 2);
    }

    #[tokio::test]
    async fn test_search_no_match_is_empty_not_error() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert("Pen", Money::from_paise(1000), 5).await.unwrap();

        let none = repo.search_by_name("xyzzy").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_list_all_in_id_order() {
        let db = test_db().await;
        let repo = db.products();

        assert!(repo.list_all().await.unwrap().is_empty());

        repo.insert("Pen", Money::from_paise(1000), 5).await.unwrap();
        repo.insert("Book", Money::from_paise(25000), 2).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].product_id < all[1].product_id);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_restock_adds_quantity() {
        let db = test_db().await;
        let repo = db.products();

        let pen = repo.insert("Pen", Money::from_paise(1000), 10).await.unwrap();
        let restocked = repo.restock(pen.product_id, 15).await.unwrap();
        assert_eq!(restocked.stock, 25);

        let fetched = repo.get_by_id(pen.product_id).await.unwrap().unwrap();
        assert_eq!(fetched.stock, 25);
    }

    #[tokio::test]
    async fn test_restock_requires_positive_quantity() {
        let db = test_db().await;
        let repo = db.products();

        let pen = repo.insert("Pen", Money::from_paise(1000), 10).await.unwrap();

        assert!(matches!(
            repo.restock(pen.product_id, 0).await,
            Err(DbError::Validation(_))
        ));
        assert!(matches!(
            repo.restock(pen.product_id, -5).await,
            Err(DbError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_restock_missing_product_is_not_found() {
        let db = test_db().await;

        assert!(matches!(
            db.products().restock(9999, 5).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_none() {
        let db = test_db().await;
        let repo = db.products();

        let pen = repo.insert("Pen", Money::from_paise(1000), 10).await.unwrap();
        repo.delete(pen.product_id).await.unwrap();

        assert!(repo.get_by_id(pen.product_id).await.unwrap().is_none());

        assert!(matches!(
            repo.delete(pen.product_id).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
