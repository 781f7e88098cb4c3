//! Terminal rendering for the cart table and the checkout totals.

use cart_core::currency::format_php;
use cart_core::models::CartItem;
use cart_core::totals::CheckoutSummary;
use console::style;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Style},
};

#[derive(Tabled)]
struct CartRow {
    #[tabled(rename = "#")]
    row: usize,
    #[tabled(rename = "Item")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Total")]
    total: String,
}

/// Renders the cart as a table. Row numbers are 1-based and double as the
/// handle for edit and delete, so they shift when an earlier row goes away.
pub fn cart_table(items: &[CartItem]) -> String {
    let rows: Vec<CartRow> = items
        .iter()
        .enumerate()
        .map(|(i, item)| CartRow {
            row: i + 1,
            name: item.name.clone(),
            price: format_php(item.price),
            quantity: item.quantity,
            total: format_php(item.line_total()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());

    table.to_string()
}

/// The checkout block shown under a non-empty cart.
pub fn totals_block(summary: &CheckoutSummary) -> String {
    format!(
        "{} {}\n{} {}\n{} {}",
        style(format!("{:>13}", "Subtotal:")).bold(),
        format_php(summary.subtotal),
        style(format!("{:>13}", "Shipping Fee:")).bold(),
        format_php(summary.shipping_fee),
        style(format!("{:>13}", "Grand Total:")).bold().green(),
        format_php(summary.grand_total),
    )
}
