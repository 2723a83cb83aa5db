//! Currency formatting and cost-input normalization.

/// Two decimal places, no grouping. Used for CSV export and form values.
pub fn format_currency(value: f64) -> String {
    format!("{:.2}", value)
}

/// Two decimal places with digit grouping as the pages display it: the
/// separator after the leading group is an apostrophe when there are three
/// or more groups, a comma otherwise (`1'234,567.89`, `1,234.50`).
pub fn format_currency_grouped(value: f64) -> String {
    let number = format!("{:.2}", value);
    let (integer_part, decimal_part) = match number.find('.') {
        Some(dot) => (&number[..dot], &number[dot..]),
        None => (number.as_str(), ""),
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = integer_part.len();
    while end > 0 {
        let start = end.saturating_sub(3);
        groups.push(&integer_part[start..end]);
        end = start;
    }
    groups.reverse();
    if groups.is_empty() {
        groups.push("0");
    }

    let mut grouped = groups[0].to_string();
    for (index, group) in groups.iter().enumerate().skip(1) {
        grouped.push(if index == 1 && groups.len() > 2 { '\'' } else { ',' });
        grouped.push_str(group);
    }
    grouped + decimal_part
}

/// Strips the grouping characters the cost inputs may carry (apostrophes,
/// commas, whitespace) ahead of the numeric parse.
pub fn normalize_cost_input(raw: &str) -> String {
    raw.chars()
        .filter(|ch| *ch != '\'' && *ch != ',' && !ch.is_whitespace())
        .collect()
}
