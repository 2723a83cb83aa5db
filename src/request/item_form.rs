//! Field validation shared by the create and update forms.

use std::collections::HashMap;

use crate::render::normalize_cost_input;
use crate::store::Item;

/// Dropdown value that defers to the free-text name field.
const CUSTOM_NAME_SENTINEL: &str = "Otro...";

/// Validation failures, each carrying its client-facing 400 text.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemFormError {
    #[error("Faltan campos requeridos.")]
    MissingFields,

    #[error("Cantidad inválida. Debe ser un número entero positivo.")]
    InvalidQuantity,

    #[error("Costo inválido. Usa un número positivo.")]
    InvalidCost,

    #[error("Índice de item inválido.")]
    InvalidIndex,
}

/// Builds the item a `/submit` body describes.
pub(crate) fn item_from_form(form_values: &HashMap<String, String>) -> Result<Item, ItemFormError> {
    let name = resolve_item_name(form_values);
    if name.is_empty() || !form_values.contains_key("itemCost") {
        return Err(ItemFormError::MissingFields);
    }
    build_item(name, form_values)
}

/// Builds the (index, item) pair an `/update` body describes. Presence of
/// every required field is checked before the index is parsed, so a body
/// that is missing fields reports that rather than a bad index.
pub(crate) fn update_from_form(
    form_values: &HashMap<String, String>,
) -> Result<(usize, Item), ItemFormError> {
    let raw_index = form_values
        .get("itemIndex")
        .ok_or(ItemFormError::MissingFields)?;
    let name = resolve_item_name(form_values);
    if name.is_empty() || !form_values.contains_key("itemCost") {
        return Err(ItemFormError::MissingFields);
    }
    let index = raw_index
        .parse::<usize>()
        .map_err(|_| ItemFormError::InvalidIndex)?;
    let item = build_item(name, form_values)?;
    Ok((index, item))
}

fn build_item(name: String, form_values: &HashMap<String, String>) -> Result<Item, ItemFormError> {
    let quantity = match form_values.get("itemQuantity") {
        Some(raw) => match raw.parse::<u32>() {
            Ok(quantity) if quantity >= 1 => quantity,
            _ => return Err(ItemFormError::InvalidQuantity),
        },
        // the quick-add form may omit the field entirely
        None => 1,
    };

    let normalized = normalize_cost_input(
        form_values
            .get("itemCost")
            .ok_or(ItemFormError::MissingFields)?,
    );
    if normalized.is_empty() {
        return Err(ItemFormError::InvalidCost);
    }
    let unit_cost = normalized
        .parse::<f64>()
        .map_err(|_| ItemFormError::InvalidCost)?;
    if unit_cost < 0.0 || !unit_cost.is_finite() {
        return Err(ItemFormError::InvalidCost);
    }

    Ok(Item {
        name,
        quantity,
        unit_cost,
    })
}

/// The dropdown wins when it carries a real value; the sentinel and an
/// absent dropdown both fall back to the free-text field.
fn resolve_item_name(form_values: &HashMap<String, String>) -> String {
    match form_values.get("itemNameSelect") {
        Some(selected) if !selected.is_empty() && selected != CUSTOM_NAME_SENTINEL => {
            selected.clone()
        }
        _ => form_values
            .get("itemName")
            .cloned()
            .unwrap_or_default(),
    }
}
