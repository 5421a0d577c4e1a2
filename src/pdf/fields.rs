//! Declared mapping from stored record attributes to the template's named
//! form fields.
//!
//! The pass template renders a fixed subset of the stored attributes.
//! Keeping the mapping as data lets the renderer verify it against the
//! template once at startup, so a mismatched deployment fails at boot
//! instead of on the first request.

use chrono::NaiveDate;

use crate::permit::models::PermitTransit;

use super::common::{format_pass_date, format_quantity};

/// One fillable text field of the pass template.
pub struct FieldMapping {
    /// Form field name inside the template.
    pub field: &'static str,
    /// Produces the string written into the field.
    pub value: fn(&PermitTransit) -> String,
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn date(value: &Option<NaiveDate>) -> String {
    value.as_ref().map(format_pass_date).unwrap_or_default()
}

fn number(value: Option<f64>) -> String {
    value.map(format_quantity).unwrap_or_default()
}

/// The attributes the template renders, in fill order.
///
/// Stored attributes outside this list (destination, division, mobile,
/// mmca_name, the transit_* family and the valid_*_date/time pairs) have no
/// counterpart field in the template and are never written to it.
pub const FIELD_MAP: &[FieldMapping] = &[
    FieldMapping { field: "permit_number", value: |p| text(&p.permit_number) },
    FieldMapping { field: "module", value: |p| text(&p.module) },
    FieldMapping { field: "validity_from", value: |p| date(&p.validity_from) },
    FieldMapping { field: "validity_till", value: |p| date(&p.validity_till) },
    FieldMapping { field: "time_from", value: |p| text(&p.time_from) },
    FieldMapping { field: "time_till", value: |p| text(&p.time_till) },
    FieldMapping { field: "items", value: |p| text(&p.items) },
    FieldMapping { field: "quantity", value: |p| number(p.quantity) },
    FieldMapping { field: "value", value: |p| text(&p.value) },
    FieldMapping { field: "name", value: |p| text(&p.name) },
    FieldMapping { field: "driver_info", value: |p| text(&p.driver_info) },
    FieldMapping { field: "address", value: |p| text(&p.address) },
    FieldMapping { field: "range", value: |p| text(&p.range) },
    FieldMapping { field: "kist", value: |p| text(&p.kist) },
    FieldMapping { field: "etp_number", value: |p| text(&p.etp_number) },
    FieldMapping { field: "mahal", value: |p| text(&p.mahal) },
    FieldMapping { field: "vehicle_number", value: |p| text(&p.vehicle_number) },
];

/// Evaluate the mapping against a record.
pub fn field_values(permit: &PermitTransit) -> Vec<(&'static str, String)> {
    FIELD_MAP
        .iter()
        .map(|mapping| (mapping.field, (mapping.value)(permit)))
        .collect()
}
