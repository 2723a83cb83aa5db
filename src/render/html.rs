//! HTML page rendering: placeholder substitution over the disk templates
//! plus the fixed error pages.

use std::fmt::Write;

use crate::store::Item;

use super::money::{format_currency, format_currency_grouped};
use super::Assets;

pub const NOT_FOUND_PAGE: &str = "<html><body><h1>404 - Recurso no encontrado</h1></body></html>";

pub fn escape_html(value: &str) -> String {
    let mut sanitized = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => sanitized.push_str("&amp;"),
            '<' => sanitized.push_str("&lt;"),
            '>' => sanitized.push_str("&gt;"),
            '"' => sanitized.push_str("&quot;"),
            '\'' => sanitized.push_str("&#39;"),
            _ => sanitized.push(ch),
        }
    }
    sanitized
}

/// The listing: one table row per item plus the grand total.
pub fn render_items_page(assets: &Assets, items: &[Item]) -> String {
    let mut rows = String::new();
    let mut total_cost = 0.0;
    for (index, item) in items.iter().enumerate() {
        let item_total = item.total_cost();
        let _ = write!(
            rows,
            "      <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td class=\"actions\"><form class=\"action-form\" method=\"GET\" action=\"/edit\">\
             <input type=\"hidden\" name=\"index\" value=\"{}\">\
             <button class=\"action-button\" type=\"submit\">Editar</button></form></td></tr>\n",
            index + 1,
            escape_html(&item.name),
            item.quantity,
            format_currency_grouped(item.unit_cost),
            format_currency_grouped(item_total),
            index,
        );
        total_cost += item_total;
    }

    assets
        .index_template
        .replace("{{items_rows}}", &rows)
        .replace("{{total_cost}}", &format_currency_grouped(total_cost))
}

/// The edit form, prefilled with the item at `index`.
pub fn render_edit_page(assets: &Assets, index: usize, item: &Item) -> String {
    assets
        .edit_template
        .replace("{{item_index}}", &index.to_string())
        .replace("{{item_name}}", &escape_html(&item.name))
        .replace("{{item_quantity}}", &item.quantity.to_string())
        .replace("{{item_cost}}", &format_currency(item.unit_cost))
}
