use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Status written into every new record. The field exists for the approval
/// workflow downstream of this service; nothing here ever transitions it.
pub const STATUS_SUBMITTED: &str = "Submitted";

/// A stored permit-transit submission.
///
/// Every attribute except `id` and `status` comes verbatim from the form;
/// absent or blank inputs are stored as `None`.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema, sqlx::FromRow)]
pub struct PermitTransit {
    #[schema(example = "f1e2d3c4-b5a6-7890-1234-567890abcdef")]
    pub id: Uuid,
    #[schema(example = "PT/2026/0042")]
    pub permit_number: Option<String>,
    pub module: Option<String>,
    #[schema(example = "2026-08-01")]
    pub validity_from: Option<NaiveDate>,
    #[schema(example = "2026-08-31")]
    pub validity_till: Option<NaiveDate>,
    pub time_from: Option<String>,
    pub time_till: Option<String>,
    #[schema(example = "Sand")]
    pub items: Option<String>,
    #[schema(example = 120.5)]
    pub quantity: Option<f64>,
    pub value: Option<String>,
    pub mmca_name: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub mobile: Option<String>,
    pub division: Option<String>,
    pub range: Option<String>,
    pub kist: Option<String>,
    pub etp_number: Option<String>,
    pub transit_module: Option<String>,
    pub transit_item: Option<String>,
    pub transit_quantity: Option<f64>,
    pub mahal: Option<String>,
    pub destination: Option<String>,
    pub valid_from_date: Option<NaiveDate>,
    pub valid_from_time: Option<String>,
    pub valid_to_date: Option<NaiveDate>,
    pub valid_to_time: Option<String>,
    pub vehicle_number: Option<String>,
    pub driver_info: Option<String>,
    pub transit_division: Option<String>,
    pub transit_range: Option<String>,
    pub transit_permit_number: Option<String>,
    #[schema(example = "Submitted")]
    pub status: String,
}

/// Raw form body of `POST /submit_form`. Every field is an optional string;
/// typing happens when the store builds the record.
#[derive(Debug, Serialize, Deserialize, Default, ToSchema)]
pub struct SubmitPermitForm {
    pub permit_number: Option<String>,
    pub module: Option<String>,
    pub validity_from: Option<String>,
    pub validity_till: Option<String>,
    pub time_from: Option<String>,
    pub time_till: Option<String>,
    pub items: Option<String>,
    pub quantity: Option<String>,
    pub value: Option<String>,
    pub mmca_name: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub mobile: Option<String>,
    pub division: Option<String>,
    pub range: Option<String>,
    pub kist: Option<String>,
    pub etp_number: Option<String>,
    pub transit_module: Option<String>,
    pub transit_item: Option<String>,
    pub transit_quantity: Option<String>,
    pub mahal: Option<String>,
    pub destination: Option<String>,
    pub valid_from_date: Option<String>,
    pub valid_from_time: Option<String>,
    pub valid_to_date: Option<String>,
    pub valid_to_time: Option<String>,
    pub vehicle_number: Option<String>,
    pub driver_info: Option<String>,
    pub transit_division: Option<String>,
    pub transit_range: Option<String>,
    pub transit_permit_number: Option<String>,
}

/// A submitted value that does not satisfy the record schema's typing.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("field '{field}' does not parse as a date: '{value}'")]
    InvalidDate { field: &'static str, value: String },
    #[error("field '{field}' does not parse as a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

impl SubmitPermitForm {
    /// Build the stored record under the identifier the store assigned.
    ///
    /// Text fields are carried verbatim. Date and number fields are typed:
    /// blank input becomes `None`, anything else must parse.
    pub fn into_permit(self, id: Uuid) -> Result<PermitTransit, SubmissionError> {
        Ok(PermitTransit {
            id,
            permit_number: self.permit_number,
            module: self.module,
            validity_from: parse_date_field("validity_from", self.validity_from)?,
            validity_till: parse_date_field("validity_till", self.validity_till)?,
            time_from: self.time_from,
            time_till: self.time_till,
            items: self.items,
            quantity: parse_number_field("quantity", self.quantity)?,
            value: self.value,
            mmca_name: self.mmca_name,
            name: self.name,
            address: self.address,
            mobile: self.mobile,
            division: self.division,
            range: self.range,
            kist: self.kist,
            etp_number: self.etp_number,
            transit_module: self.transit_module,
            transit_item: self.transit_item,
            transit_quantity: parse_number_field("transit_quantity", self.transit_quantity)?,
            mahal: self.mahal,
            destination: self.destination,
            valid_from_date: parse_date_field("valid_from_date", self.valid_from_date)?,
            valid_from_time: self.valid_from_time,
            valid_to_date: parse_date_field("valid_to_date", self.valid_to_date)?,
            valid_to_time: self.valid_to_time,
            vehicle_number: self.vehicle_number,
            driver_info: self.driver_info,
            transit_division: self.transit_division,
            transit_range: self.transit_range,
            transit_permit_number: self.transit_permit_number,
            status: STATUS_SUBMITTED.to_string(),
        })
    }
}

fn parse_date_field(
    field: &'static str,
    raw: Option<String>,
) -> Result<Option<NaiveDate>, SubmissionError> {
    match raw {
        None => Ok(None),
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<NaiveDate>()
                .map(Some)
                .map_err(|_| SubmissionError::InvalidDate {
                    field,
                    value: value.clone(),
                })
        }
    }
}

fn parse_number_field(
    field: &'static str,
    raw: Option<String>,
) -> Result<Option<f64>, SubmissionError> {
    match raw {
        None => Ok(None),
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| SubmissionError::InvalidNumber {
                    field,
                    value: value.clone(),
                })
        }
    }
}
