//! CSV export of the item list.

use std::fmt::Write;

use crate::store::Item;

use super::money::format_currency;

/// Wraps the value in quotes, doubling any embedded quote.
pub fn escape_csv(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '"' {
            out.push_str("\"\"");
        } else {
            out.push(ch);
        }
    }
    out.push('"');
    out
}

/// CRLF-terminated rows with a header line and a trailing grand-total row.
pub fn render_items_csv(items: &[Item]) -> String {
    let mut csv = String::from("Nombre,Cantidad,Costo Unitario,Total\r\n");
    let mut total_cost = 0.0;
    for item in items {
        let item_total = item.total_cost();
        let _ = write!(
            csv,
            "{},{},{},{}\r\n",
            escape_csv(&item.name),
            item.quantity,
            escape_csv(&format_currency(item.unit_cost)),
            escape_csv(&format_currency(item_total)),
        );
        total_cost += item_total;
    }
    let _ = write!(
        csv,
        "{},,,{}\r\n",
        escape_csv("Total"),
        escape_csv(&format_currency(total_cost))
    );
    csv
}
