//! Cart rendering for the terminal.
//!
//! # Usage
//!
//! ```bash
//! rocketshoes show
//! ```
//!
//! ```text
//!    #1  Tênis de Caminhada Leve Confortável  2 x $179.90  $359.80
//!
//! 2 items, subtotal $359.80
//! ```

use std::io::{self, Write};

use rocketshoes_storefront::CartView;

/// Write the cart as a plain-text table.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render(view: &CartView, out: &mut impl Write) -> io::Result<()> {
    if view.items.is_empty() {
        return writeln!(out, "Cart is empty");
    }

    let title_width = view
        .items
        .iter()
        .map(|item| item.title.chars().count())
        .max()
        .unwrap_or(0);

    for item in &view.items {
        writeln!(
            out,
            "{:>5}  {:<title_width$}  {} x {}  {}",
            format!("#{}", item.id),
            item.title,
            item.amount,
            item.price,
            item.line_price,
        )?;
    }

    let noun = if view.item_count == 1 { "item" } else { "items" };
    writeln!(out)?;
    writeln!(out, "{} {noun}, subtotal {}", view.item_count, view.subtotal)
}
