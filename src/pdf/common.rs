//! Formatting helpers shared by the field mapping and the confirmation view.

use chrono::NaiveDate;

/// Format a stored date the way the pass template prints it (DD/MM/YYYY).
pub fn format_pass_date(date: &NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Decimal string form of a stored quantity. Whole values drop the
/// fractional part, so `12.0` prints as `12` and `12.5` as `12.5`.
pub fn format_quantity(quantity: f64) -> String {
    if quantity.is_finite() && quantity.fract() == 0.0 {
        format!("{quantity:.0}")
    } else {
        quantity.to_string()
    }
}
