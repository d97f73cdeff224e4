//! # Menu Controller
//!
//! The hierarchical text menu driving the ledgers.
//!
//! ## Menu Tree
//! ```text
//! Main Menu
//! ├── 1 Product Management
//! │     ├── 1 Add Product
//! │     ├── 2 Search Product
//! │     ├── 3 View Inventory
//! │     ├── 4 Restock Product
//! │     ├── 5 Remove Product
//! │     └── 6 Back
//! ├── 2 Purchase
//! │     ├── 1 Add Product to Cart
//! │     ├── 2 Finalize Bill and Generate Receipt
//! │     ├── 3 Generate Bill Manually
//! │     ├── 4 Regenerate Bill
//! │     └── 5 Back
//! ├── 3 Sales Report
//! └── 4 Exit
//! ```
//!
//! Every ledger error is printed as one line and the loop continues;
//! nothing here is fatal except an explicit Exit.

use std::io;

use chrono::Utc;
use tracing::debug;

use kirana_core::{receipt, Cart};
use kirana_db::Database;

use crate::error::AppError;
use crate::input;

/// Prints a ledger error the way the menus present all failures.
fn print_error(err: impl Into<AppError>) {
    println!("\nError: {}", err.into());
}

// =============================================================================
// Main Menu
// =============================================================================

/// Runs the main menu loop until the user exits.
pub async fn main_menu(db: &Database) -> io::Result<()> {
    loop {
        println!("\n--- Main Menu ---");
        println!("1. Product Management");
        println!("2. Purchase");
        println!("3. Sales Report");
        println!("4. Exit");

        let choice = input::read_line("\nEnter your choice (1-4): ")?;
        match choice.as_str() {
            "1" => product_management(db).await?,
            "2" => purchase_section(db).await?,
            "3" => sales_report(db).await,
            "4" => {
                println!("\nExiting... Thank you for using the system!");
                return Ok(());
            }
            _ => println!("\nInvalid choice. Please try again.\n"),
        }
    }
}

// =============================================================================
// Product Management
// =============================================================================

/// The product management sub-menu: add, search, view, restock, remove.
async fn product_management(db: &Database) -> io::Result<()> {
    loop {
        println!("\n--- Product Management ---");
        println!("1. Add Product");
        println!("2. Search Product");
        println!("3. View Inventory");
        println!("4. Restock Product");
        println!("5. Remove Product");
        println!("6. Back to Main Menu");

        let choice = input::read_line("\nEnter your choice (1-6): ")?;
        match choice.as_str() {
            "1" => add_product(db).await?,
            "2" => search_product(db).await?,
            "3" => view_inventory(db).await,
            "4" => restock_product(db).await?,
            "5" => remove_product(db).await?,
            "6" => return Ok(()),
            _ => println!("\nInvalid choice. Please try again."),
        }
    }
}

async fn add_product(db: &Database) -> io::Result<()> {
    let name = input::read_line("\nEnter product name: ")?;
    let price = input::prompt_money("Enter product price: ₹")?;
    let stock = input::prompt_parsed::<i64>("Enter initial stock: ")?;

    match db.products().insert(&name, price, stock).await {
        Ok(product) => println!(
            "\nProduct '{}' added successfully! (id {})\n",
            product.name, product.product_id
        ),
        Err(err) => print_error(err),
    }
    Ok(())
}

async fn search_product(db: &Database) -> io::Result<()> {
    let query = input::read_line("\nEnter product name to search: ")?;

    match db.products().search_by_name(&query).await {
        Ok(products) => {
            println!("\n--- Product Search Result ---");
            if products.is_empty() {
                println!("No product found with that name.");
            } else {
                for product in &products {
                    print_product_line(product);
                }
            }
            println!("----------------");
        }
        Err(err) => print_error(err),
    }
    Ok(())
}

async fn view_inventory(db: &Database) {
    match db.products().list_all().await {
        Ok(products) => {
            println!("\n--- Inventory ---");
            if products.is_empty() {
                println!("No products in inventory.");
            } else {
                for product in &products {
                    print_product_line(product);
                }
            }
            println!("----------------");
        }
        Err(err) => print_error(err),
    }
}

fn print_product_line(product: &kirana_core::Product) {
    println!(
        "ID: {} | Name: {} | Price: {} | Stock: {}",
        product.product_id,
        product.name,
        product.price(),
        product.stock
    );
}

async fn restock_product(db: &Database) -> io::Result<()> {
    let product_id = input::prompt_parsed::<i64>("\nEnter product ID to restock: ")?;
    let quantity = input::prompt_parsed::<i64>("Enter quantity to restock: ")?;

    match db.products().restock(product_id, quantity).await {
        Ok(product) => println!(
            "\nProduct '{}' restocked successfully! New stock: {}",
            product.name, product.stock
        ),
        Err(err) => print_error(err),
    }
    Ok(())
}

async fn remove_product(db: &Database) -> io::Result<()> {
    let product_id = input::prompt_parsed::<i64>("\nEnter product ID to remove: ")?;

    match db.products().get_by_id(product_id).await {
        Ok(Some(product)) => match db.products().delete(product_id).await {
            Ok(()) => println!("\nProduct '{}' removed successfully!", product.name),
            Err(err) => print_error(err),
        },
        Ok(None) => println!("\nError: Product not found."),
        Err(err) => print_error(err),
    }
    Ok(())
}

// =============================================================================
// Purchase
// =============================================================================

/// The purchase sub-menu: build a cart, finalize it, or work with past bills.
async fn purchase_section(db: &Database) -> io::Result<()> {
    let mut cart = Cart::new();

    loop {
        println!("\n--- Purchase Section ---");
        println!("1. Add Product to Cart");
        println!("2. Finalize Bill and Generate Receipt");
        println!("3. Generate Bill Manually");
        println!("4. Regenerate Bill");
        println!("5. Back to Main Menu");

        let choice = input::read_line("\nEnter your choice (1-5): ")?;
        match choice.as_str() {
            "1" => add_to_cart(db, &mut cart).await?,
            "2" => {
                if cart.is_empty() {
                    println!("\nCart is empty. Cannot finalize bill.");
                } else if finalize_bill(db, &cart).await? {
                    // Cart is spent once the sale is on the ledger.
                    return Ok(());
                }
            }
            "3" => {
                generate_bill_manually(db).await?;
                return Ok(());
            }
            "4" => regenerate_bill(db).await?,
            "5" => return Ok(()),
            _ => println!("\nInvalid choice. Please try again."),
        }
    }
}

async fn add_to_cart(db: &Database, cart: &mut Cart) -> io::Result<()> {
    let product_id = input::prompt_parsed::<i64>("\nEnter product ID: ")?;
    let quantity = input::prompt_parsed::<i64>("Enter quantity to sell: ")?;

    match db.products().get_by_id(product_id).await {
        Ok(Some(product)) => {
            if !product.can_sell(quantity) {
                println!(
                    "\nError: Insufficient stock for '{}': {} available, {} requested.",
                    product.name, product.stock, quantity
                );
                return Ok(());
            }
            match cart.add_item(&product, quantity) {
                Ok(()) => {
                    debug!(product_id, quantity, "Added to cart");
                    println!(
                        "\nAdded {} x '{}' to cart. Cart total: {}",
                        quantity,
                        product.name,
                        cart.total()
                    );
                }
                Err(err) => print_error(err),
            }
        }
        Ok(None) => println!("\nError: Product not found."),
        Err(err) => print_error(err),
    }
    Ok(())
}

/// Records the cart and prints the receipt. Returns whether the sale went
/// through (a failed sale leaves the cart intact for another attempt).
async fn finalize_bill(db: &Database, cart: &Cart) -> io::Result<bool> {
    let payment_mode = input::prompt_payment_mode("Enter payment mode (Cash/Card): ")?;

    match db.sales().record_sale(cart, payment_mode.as_deref()).await {
        Ok(_) => {
            println!("{}", receipt::render(cart, payment_mode.as_deref(), Utc::now()));
            Ok(true)
        }
        Err(err) => {
            print_error(err);
            Ok(false)
        }
    }
}

/// Builds a cart directly from product ids (0 to stop) and finalizes it.
async fn generate_bill_manually(db: &Database) -> io::Result<()> {
    let mut cart = Cart::new();

    loop {
        let product_id = input::prompt_parsed::<i64>("\nEnter product ID (0 to stop): ")?;
        if product_id == 0 {
            break;
        }

        let quantity = input::prompt_parsed::<i64>("Enter quantity to sell: ")?;

        match db.products().get_by_id(product_id).await {
            Ok(Some(product)) => {
                if !product.can_sell(quantity) {
                    println!(
                        "\nError: Insufficient stock for '{}': {} available, {} requested.",
                        product.name, product.stock, quantity
                    );
                } else if let Err(err) = cart.add_item(&product, quantity) {
                    print_error(err);
                }
            }
            Ok(None) => println!("\nError: Product not found."),
            Err(err) => print_error(err),
        }
    }

    if cart.is_empty() {
        println!("\nNo products selected for purchase.");
        return Ok(());
    }

    finalize_bill(db, &cart).await?;
    Ok(())
}

/// Reprints the receipt of a past sale from its stored record.
async fn regenerate_bill(db: &Database) -> io::Result<()> {
    let sales_id = input::prompt_parsed::<i64>("\nEnter sales ID to regenerate bill: ")?;

    match db.sales().get_with_product(sales_id).await {
        Ok(Some((sale, product))) => {
            println!("{}", receipt::render_from_sale(&sale, product.as_ref()));
        }
        Ok(None) => println!("\nError: Sale not found for the given sales ID."),
        Err(err) => print_error(err),
    }
    Ok(())
}

// =============================================================================
// Sales Report
// =============================================================================

async fn sales_report(db: &Database) {
    match db.sales().list_all().await {
        Ok(rows) => print!("{}", receipt::render_sales_report(&rows)),
        Err(err) => print_error(err),
    }
}
