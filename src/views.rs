//! Confirmation page rendering.
//!
//! The page echoes the saved record back to the applicant together with the
//! link to the filled pass. Rendered as a string template, values escaped.

use crate::pdf::common::{format_pass_date, format_quantity};
use crate::permit::models::PermitTransit;

/// Escape a value for interpolation into HTML text content.
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the confirmation page for a freshly stored submission.
pub fn confirmation_page(permit: &PermitTransit, pdf_url: &str) -> String {
    let mut rows = String::new();
    for (label, value) in display_rows(permit) {
        rows.push_str(&format!(
            "        <tr><th>{}</th><td>{}</td></tr>\n",
            escape_html(label),
            escape_html(&value)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Permit Transit Submitted</title>
  <link rel="stylesheet" href="/style.css">
</head>
<body>
  <main class="confirmation">
    <h1>Submission received</h1>
    <p>Reference: <code>{id}</code> &middot; Status: {status}</p>
    <table>
      <tbody>
{rows}      </tbody>
    </table>
    <p><a class="pass-link" href="{pdf_url}">Open the filled permit pass (PDF)</a></p>
  </main>
</body>
</html>
"#,
        id = permit.id,
        status = escape_html(&permit.status),
        rows = rows,
        pdf_url = escape_html(pdf_url),
    )
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Every stored attribute, including the ones the pass template does not
/// render, in form order.
fn display_rows(permit: &PermitTransit) -> Vec<(&'static str, String)> {
    let date = |d: &Option<chrono::NaiveDate>| d.as_ref().map(format_pass_date).unwrap_or_default();
    let number = |n: Option<f64>| n.map(format_quantity).unwrap_or_default();

    vec![
        ("Permit number", opt(&permit.permit_number)),
        ("Module", opt(&permit.module)),
        ("Validity from", date(&permit.validity_from)),
        ("Validity till", date(&permit.validity_till)),
        ("Time from", opt(&permit.time_from)),
        ("Time till", opt(&permit.time_till)),
        ("Items", opt(&permit.items)),
        ("Quantity", number(permit.quantity)),
        ("Value", opt(&permit.value)),
        ("MMCA name", opt(&permit.mmca_name)),
        ("Applicant name", opt(&permit.name)),
        ("Address", opt(&permit.address)),
        ("Mobile", opt(&permit.mobile)),
        ("Division", opt(&permit.division)),
        ("Range", opt(&permit.range)),
        ("Kist", opt(&permit.kist)),
        ("ETP number", opt(&permit.etp_number)),
        ("Transit module", opt(&permit.transit_module)),
        ("Transit item", opt(&permit.transit_item)),
        ("Transit quantity", number(permit.transit_quantity)),
        ("Mahal", opt(&permit.mahal)),
        ("Destination", opt(&permit.destination)),
        ("Valid from date", date(&permit.valid_from_date)),
        ("Valid from time", opt(&permit.valid_from_time)),
        ("Valid to date", date(&permit.valid_to_date)),
        ("Valid to time", opt(&permit.valid_to_time)),
        ("Vehicle number", opt(&permit.vehicle_number)),
        ("Driver info", opt(&permit.driver_info)),
        ("Transit division", opt(&permit.transit_division)),
        ("Transit range", opt(&permit.transit_range)),
        ("Transit permit number", opt(&permit.transit_permit_number)),
    ]
}
