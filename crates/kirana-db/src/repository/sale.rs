//! # Sale Repository
//!
//! Database operations for the sales ledger.
//!
//! ## Sale Recording
//! ```text
//! record_sale(cart, payment_mode)
//!   │
//!   ├── BEGIN TRANSACTION
//!   │     for each cart line:
//!   │       ├── re-read product row        (NotFound if gone)
//!   │       ├── verify stock >= quantity   (InsufficientStock otherwise)
//!   │       ├── UPDATE stock = stock - qty
//!   │       └── INSERT sale row (snapshot total, shared timestamp)
//!   └── COMMIT (any error rolls the whole batch back)
//! ```
//!
//! Sales are append-only: rows are never updated or deleted, and they
//! survive removal of the product they reference.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use kirana_core::validation::validate_quantity;
use kirana_core::{Cart, Product, Sale, SaleWithProduct};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a finalized cart as sales, all-or-nothing.
    ///
    /// For each cart line this decrements the product's stock and appends
    /// one sale row with the frozen line total (cart snapshot price ×
    /// quantity), a timestamp shared by the whole batch, and the supplied
    /// payment mode. Every write happens inside a single transaction: if
    /// any line fails - product vanished, insufficient stock, store error -
    /// nothing is committed.
    ///
    /// ## Returns
    /// The recorded sales, one per cart line, with their generated ids.
    pub async fn record_sale(
        &self,
        cart: &Cart,
        payment_mode: Option<&str>,
    ) -> DbResult<Vec<Sale>> {
        if cart.is_empty() {
            return Err(DbError::EmptySale);
        }

        debug!(
            lines = cart.item_count(),
            total = %cart.total(),
            "Recording sale"
        );

        // Dropping the transaction on an early return rolls everything back.
        let mut tx = self.pool.begin().await?;

        let now = Utc::now();
        let mut recorded = Vec::with_capacity(cart.item_count());

        for item in &cart.items {
            validate_quantity(item.quantity)?;

            let product = sqlx::query_as::<_, Product>(
                "SELECT product_id, name, price_paise, stock FROM products WHERE product_id = ?1",
            )
            .bind(item.product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("Product", item.product_id))?;

            if product.stock < item.quantity {
                return Err(DbError::InsufficientStock {
                    name: product.name,
                    available: product.stock,
                    requested: item.quantity,
                });
            }

            sqlx::query("UPDATE products SET stock = stock - ?2 WHERE product_id = ?1")
                .bind(item.product_id)
                .bind(item.quantity)
                .execute(&mut *tx)
                .await?;

            // Line total is frozen from the cart snapshot, not the live
            // price: what the customer saw is what gets recorded.
            let total_amount_paise = item.line_total_paise();

            let result = sqlx::query(
                "INSERT INTO sales (product_id, quantity, total_amount_paise, sale_date, payment_mode) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(total_amount_paise)
            .bind(now)
            .bind(payment_mode)
            .execute(&mut *tx)
            .await?;

            recorded.push(Sale {
                sales_id: result.last_insert_rowid(),
                product_id: item.product_id,
                quantity: item.quantity,
                total_amount_paise,
                sale_date: now,
                payment_mode: payment_mode.map(str::to_string),
            });
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            lines = recorded.len(),
            total = %cart.total(),
            "Sale recorded"
        );

        Ok(recorded)
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, sales_id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            "SELECT sales_id, product_id, quantity, total_amount_paise, sale_date, payment_mode \
             FROM sales WHERE sales_id = ?1",
        )
        .bind(sales_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets a sale together with the product it references, if that product
    /// still exists.
    ///
    /// The input to receipt regeneration: the sale carries the frozen date,
    /// total and payment mode; the product (when present) supplies the
    /// display name and current unit price.
    pub async fn get_with_product(
        &self,
        sales_id: i64,
    ) -> DbResult<Option<(Sale, Option<Product>)>> {
        let sale = match self.get_by_id(sales_id).await? {
            Some(sale) => sale,
            None => return Ok(None),
        };

        let product = sqlx::query_as::<_, Product>(
            "SELECT product_id, name, price_paise, stock FROM products WHERE product_id = ?1",
        )
        .bind(sale.product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(Some((sale, product)))
    }

    /// Lists all sales joined with their product's current name.
    ///
    /// LEFT JOIN: sales whose product was removed are still listed, with
    /// `product_name` as `None`, never an error.
    pub async fn list_all(&self) -> DbResult<Vec<SaleWithProduct>> {
        let sales = sqlx::query_as::<_, SaleWithProduct>(
            "SELECT s.sales_id, s.product_id, s.quantity, s.total_amount_paise, \
                    s.sale_date, s.payment_mode, p.name AS product_name \
             FROM sales s \
             LEFT JOIN products p ON p.product_id = s.product_id \
             ORDER BY s.sales_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Counts sales (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
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
    use kirana_core::Money;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, name: &str, price_paise: i64, stock: i64) -> Product {
        db.products()
            .insert(name, Money::from_paise(price_paise), stock)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_record_sale_decrements_stock_and_appends_rows() {
        let db = test_db().await;
        let pen = seed_product(&db, "Pen", 1000, 10).await;
        let book = seed_product(&db, "Book", 25000, 4).await;

        let mut cart = Cart::new();
        cart.add_item(&pen, 3).unwrap();
        cart.add_item(&book, 1).unwrap();

        let recorded = db.sales().record_sale(&cart, Some("Cash")).await.unwrap();

        // Exactly one sale row per cart line, totals frozen at price × qty.
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].total_amount_paise, 3000);
        assert_eq!(recorded[1].total_amount_paise, 25000);
        assert_eq!(recorded[0].payment_mode.as_deref(), Some("Cash"));

        let pen_after = db.products().get_by_id(pen.product_id).await.unwrap().unwrap();
        let book_after = db.products().get_by_id(book.product_id).await.unwrap().unwrap();
        assert_eq!(pen_after.stock, 7);
        assert_eq!(book_after.stock, 3);

        assert_eq!(db.sales().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_record_sale_is_atomic_on_insufficient_stock() {
        let db = test_db().await;
        let pen = seed_product(&db, "Pen", 1000, 10).await;
        let book = seed_product(&db, "Book", 25000, 2).await;

        let mut cart = Cart::new();
        cart.add_item(&pen, 3).unwrap();
        cart.add_item(&book, 5).unwrap(); // only 2 in stock

        let err = db.sales().record_sale(&cart, Some("Cash")).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::InsufficientStock {
                available: 2,
                requested: 5,
                ..
            }
        ));

        // The pen line must have been rolled back along with the batch.
        let pen_after = db.products().get_by_id(pen.product_id).await.unwrap().unwrap();
        assert_eq!(pen_after.stock, 10);
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_record_sale_missing_product_rolls_back() {
        let db = test_db().await;
        let pen = seed_product(&db, "Pen", 1000, 10).await;

        let mut cart = Cart::new();
        cart.add_item(&pen, 2).unwrap();

        // Product removed between carting and finalization.
        db.products().delete(pen.product_id).await.unwrap();

        let err = db.sales().record_sale(&cart, None).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_record_sale_rejects_empty_cart() {
        let db = test_db().await;

        let err = db.sales().record_sale(&Cart::new(), Some("Cash")).await.unwrap_err();
        assert!(matches!(err, DbError::EmptySale));
    }

    #[tokio::test]
    async fn test_record_sale_rejects_non_positive_quantity() {
        let db = test_db().await;
        let pen = seed_product(&db, "Pen", 1000, 10).await;

        let mut cart = Cart::new();
        cart.add_item(&pen, 0).unwrap();

        let err = db.sales().record_sale(&cart, Some("Cash")).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_record_sale_uses_cart_snapshot_price() {
        let db = test_db().await;
        let pen = seed_product(&db, "Pen", 1000, 10).await;

        let mut cart = Cart::new();
        cart.add_item(&pen, 2).unwrap();

        // Price change after carting must not affect the recorded total.
        sqlx::query("UPDATE products SET price_paise = 9999 WHERE product_id = ?1")
            .bind(pen.product_id)
            .execute(db.pool())
            .await
            .unwrap();

        let recorded = db.sales().record_sale(&cart, Some("Card")).await.unwrap();
        assert_eq!(recorded[0].total_amount_paise, 2000);
    }

    #[tokio::test]
    async fn test_get_by_id_roundtrip() {
        let db = test_db().await;
        let pen = seed_product(&db, "Pen", 1000, 10).await;

        let mut cart = Cart::new();
        cart.add_item(&pen, 3).unwrap();
        let recorded = db.sales().record_sale(&cart, Some("Cash")).await.unwrap();

        let fetched = db.sales().get_by_id(recorded[0].sales_id).await.unwrap().unwrap();
        assert_eq!(fetched.sales_id, recorded[0].sales_id);
        assert_eq!(fetched.product_id, pen.product_id);
        assert_eq!(fetched.quantity, 3);
        assert_eq!(fetched.total_amount_paise, 3000);
        assert_eq!(fetched.payment_mode.as_deref(), Some("Cash"));

        assert!(db.sales().get_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_with_product_tolerates_removed_product() {
        let db = test_db().await;
        let pen = seed_product(&db, "Pen", 1000, 10).await;

        let mut cart = Cart::new();
        cart.add_item(&pen, 1).unwrap();
        let recorded = db.sales().record_sale(&cart, Some("Cash")).await.unwrap();
        let sales_id = recorded[0].sales_id;

        let (_, product) = db.sales().get_with_product(sales_id).await.unwrap().unwrap();
        assert_eq!(product.unwrap().name, "Pen");

        db.products().delete(pen.product_id).await.unwrap();

        let (sale, product) = db.sales().get_with_product(sales_id).await.unwrap().unwrap();
        assert!(product.is_none());
        // The frozen sale row is untouched by the removal.
        assert_eq!(sale.total_amount_paise, 1000);

        assert!(db.sales().get_with_product(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_joins_and_degrades() {
        let db = test_db().await;
        let pen = seed_product(&db, "Pen", 1000, 10).await;
        let book = seed_product(&db, "Book", 25000, 5).await;

        let mut cart = Cart::new();
        cart.add_item(&pen, 2).unwrap();
        cart.add_item(&book, 1).unwrap();
        db.sales().record_sale(&cart, Some("Cash")).await.unwrap();

        db.products().delete(book.product_id).await.unwrap();

        let rows = db.sales().list_all().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_name.as_deref(), Some("Pen"));
        assert_eq!(rows[1].product_name, None);
        assert_eq!(rows[1].total_amount_paise, 25000);
    }

    #[tokio::test]
    async fn test_list_all_empty() {
        let db = test_db().await;
        assert!(db.sales().list_all().await.unwrap().is_empty());
    }
}
