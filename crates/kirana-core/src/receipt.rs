//! # Receipt Rendering
//!
//! Pure text rendering for receipts and the sales report. No I/O and no
//! clock access: timestamps come in as parameters, so every function here
//! is deterministic and directly testable.
//!
//! Two receipt shapes share one layout:
//! - [`render`] builds a fresh receipt from the cart at finalization time
//! - [`render_from_sale`] reconstructs the same layout from a persisted
//!   sale, using its stored date, total and payment mode

use chrono::{DateTime, Utc};

use crate::cart::Cart;
use crate::money::Money;
use crate::types::{Product, Sale, SaleWithProduct};

/// Horizontal rule used throughout the receipt.
const RULE: &str = "--------------------------------------------------";

/// Label printed when a sale has no payment mode recorded.
const NO_PAYMENT_MODE: &str = "Not Available";

/// Label printed when the sold product no longer exists.
const PRODUCT_UNAVAILABLE: &str = "(product unavailable)";

/// Timestamp format shown on receipts and reports.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Receipts
// =============================================================================

/// Renders a receipt for a finalized cart.
///
/// One line per cart entry (name, quantity, unit price, line total), then
/// the grand total (sum of line totals) and the payment mode footer.
pub fn render(cart: &Cart, payment_mode: Option<&str>, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    push_header(&mut out, "Receipt", now);

    for item in &cart.items {
        push_line_item(
            &mut out,
            &item.name,
            item.quantity,
            item.unit_price(),
            item.line_total(),
        );
    }

    push_footer(&mut out, cart.total(), payment_mode);
    out
}

/// Reconstructs a receipt from a persisted sale.
///
/// Uses the sale's stored `sale_date`, `total_amount` and `payment_mode`
/// rather than recomputing them. When the referenced product has since been
/// removed, the line degrades to a placeholder name and a unit price derived
/// from the frozen total.
pub fn render_from_sale(sale: &Sale, product: Option<&Product>) -> String {
    let mut out = String::new();

    push_header(&mut out, "Regenerated Receipt", sale.sale_date);

    let (name, unit_price) = match product {
        Some(p) => (p.name.as_str(), p.price()),
        None => (PRODUCT_UNAVAILABLE, sale.unit_price()),
    };
    push_line_item(&mut out, name, sale.quantity, unit_price, sale.total_amount());

    push_footer(&mut out, sale.total_amount(), sale.payment_mode.as_deref());
    out
}

fn push_header(out: &mut String, title: &str, date: DateTime<Utc>) {
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("{:^50}\n", title));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("Date:                {}\n", date.format(DATE_FORMAT)));
    out.push_str(RULE);
    out.push('\n');
    out.push_str("Product Name          Quantity    Price        Total\n");
    out.push_str(RULE);
    out.push('\n');
}

fn push_line_item(out: &mut String, name: &str, quantity: i64, unit_price: Money, total: Money) {
    out.push_str(&format!(
        " {:<21}{:<12}{:<13}{}\n",
        name, quantity, unit_price, total
    ));
}

fn push_footer(out: &mut String, total: Money, payment_mode: Option<&str>) {
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("Total Amount:{:>37}\n", total.to_string()));
    out.push_str(&format!(
        "Payment Mode:{:>37}\n",
        payment_mode.unwrap_or(NO_PAYMENT_MODE)
    ));
    out.push_str(RULE);
    out.push('\n');
    out.push_str("           Thank you for your purchase!\n");
    out.push_str(RULE);
    out.push('\n');
}

// =============================================================================
// Sales Report
// =============================================================================

/// Renders the sales report: one line per recorded sale.
///
/// Sales whose product was removed keep their line with a fallback label;
/// a missing payment mode prints as "Not Available".
pub fn render_sales_report(rows: &[SaleWithProduct]) -> String {
    let mut out = String::new();
    out.push_str("\n--- Sales Report ---\n");

    if rows.is_empty() {
        out.push_str("No sales recorded.\n");
    } else {
        for row in rows {
            out.push_str(&format!(
                "Sale ID: {} | Product: {} | Quantity: {} | Total: {} | Date: {} | Payment Mode: {}\n",
                row.sales_id,
                row.product_name.as_deref().unwrap_or(PRODUCT_UNAVAILABLE),
                row.quantity,
                row.total_amount(),
                row.sale_date.format(DATE_FORMAT),
                row.payment_mode.as_deref().unwrap_or(NO_PAYMENT_MODE),
            ));
        }
    }

    out.push_str("----------------\n");
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;
    use chrono::TimeZone;

    fn product(id: i64, name: &str, price_paise: i64) -> Product {
        Product {
            product_id: id,
            name: name.to_string(),
            price_paise,
            stock: 100,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_render_totals_cart() {
        // Pen ₹10 × 3 + Book ₹250 × 1 = ₹280
        let mut cart = Cart::new();
        cart.add_item(&product(1, "Pen", 1000), 3).unwrap();
        cart.add_item(&product(2, "Book", 25000), 1).unwrap();

        let text = render(&cart, Some("Cash"), fixed_now());

        assert!(text.contains("Receipt"));
        assert!(text.contains("Date:                2026-08-07 12:30:00"));
        assert!(text.contains("Pen"));
        assert!(text.contains("Book"));
        assert!(text.contains("₹280.00"));
        assert!(text.contains("Payment Mode:"));
        assert!(text.contains("Cash"));
        assert!(text.contains("Thank you for your purchase!"));
    }

    #[test]
    fn test_render_without_payment_mode() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "Pen", 1000), 1).unwrap();

        let text = render(&cart, None, fixed_now());
        assert!(text.contains(NO_PAYMENT_MODE));
    }

    fn sale() -> Sale {
        Sale {
            sales_id: 42,
            product_id: 1,
            quantity: 3,
            total_amount_paise: 3000,
            sale_date: fixed_now(),
            payment_mode: Some("Card".to_string()),
        }
    }

    #[test]
    fn test_render_from_sale_uses_stored_fields() {
        let text = render_from_sale(&sale(), Some(&product(1, "Pen", 1000)));

        assert!(text.contains("Regenerated Receipt"));
        assert!(text.contains("2026-08-07 12:30:00"));
        assert!(text.contains("Pen"));
        assert!(text.contains("₹30.00"));
        assert!(text.contains("Card"));
    }

    #[test]
    fn test_render_from_sale_without_product() {
        let text = render_from_sale(&sale(), None);

        assert!(text.contains(PRODUCT_UNAVAILABLE));
        // Unit price falls back to total ÷ quantity.
        assert!(text.contains("₹10.00"));
        assert!(text.contains("₹30.00"));
    }

    #[test]
    fn test_regenerated_receipt_matches_fresh_total() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, "Pen", 1000), 3).unwrap();

        let fresh = render(&cart, Some("Card"), fixed_now());
        let regenerated = render_from_sale(&sale(), Some(&product(1, "Pen", 1000)));

        for needle in ["₹30.00", "Card"] {
            assert!(fresh.contains(needle));
            assert!(regenerated.contains(needle));
        }
    }

    #[test]
    fn test_sales_report_fallbacks() {
        let rows = vec![
            SaleWithProduct {
                sales_id: 1,
                product_id: 1,
                quantity: 2,
                total_amount_paise: 2000,
                sale_date: fixed_now(),
                payment_mode: Some("Cash".to_string()),
                product_name: Some("Pen".to_string()),
            },
            SaleWithProduct {
                sales_id: 2,
                product_id: 99,
                quantity: 1,
                total_amount_paise: 500,
                sale_date: fixed_now(),
                payment_mode: None,
                product_name: None,
            },
        ];

        let text = render_sales_report(&rows);
        assert!(text.contains("Sale ID: 1 | Product: Pen"));
        assert!(text.contains(PRODUCT_UNAVAILABLE));
        assert!(text.contains(NO_PAYMENT_MODE));
    }

    #[test]
    fn test_sales_report_empty() {
        let text = render_sales_report(&[]);
        assert!(text.contains("No sales recorded."));
    }
}
