//! Everything that turns store data into response bodies: HTML pages, the
//! CSV export, currency formatting and the on-disk templates/assets.

pub use assets::Assets;
pub use csv::{escape_csv, render_items_csv};
pub use html::{escape_html, render_edit_page, render_items_page, NOT_FOUND_PAGE};
pub use money::{format_currency, format_currency_grouped, normalize_cost_input};

mod assets;
mod csv;
mod html;
mod money;
