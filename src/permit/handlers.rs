use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use uuid::Uuid;

use crate::db::AppState;
use crate::permit::models::SubmitPermitForm;
use crate::views;

#[utoipa::path(
    post,
    path = "/submit_form",
    tag = "Permit Transit",
    request_body(
        content = SubmitPermitForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Confirmation page carrying the stored record and the pass link, or a plain-text error when persistence fails", body = String)
    )
)]
pub async fn submit_form(
    form: web::Form<SubmitPermitForm>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.store.insert_permit(form.into_inner()).await {
        Ok(permit) => {
            let pdf_url = format!("/pdf/{}", permit.id);
            info!("Stored permit transit submission {}", permit.id);
            HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(views::confirmation_page(&permit, &pdf_url))
        }
        Err(e) => {
            error!("Error occurred while saving the form data: {e}");
            HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body("Error occurred while saving the form data.")
        }
    }
}

#[utoipa::path(
    get,
    path = "/pdf/{id}",
    tag = "Permit Transit",
    params(
        ("id" = String, Path, description = "Identifier assigned to the stored submission")
    ),
    responses(
        (status = 200, description = "Filled permit pass", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "No record stored under the identifier", body = String),
        (status = 500, description = "Record lookup or template fill failed", body = String)
    )
)]
pub async fn get_permit_pdf(id: web::Path<String>, data: web::Data<AppState>) -> impl Responder {
    // An identifier the store never issued cannot match a record.
    let Ok(permit_id) = id.parse::<Uuid>() else {
        return HttpResponse::NotFound().body("Permit not found.");
    };

    let permit = match data.store.find_permit(&permit_id).await {
        Ok(Some(permit)) => permit,
        Ok(None) => return HttpResponse::NotFound().body("Permit not found."),
        Err(e) => {
            error!("Error generating the PDF: {e}");
            return HttpResponse::InternalServerError().body("Error generating the PDF.");
        }
    };

    // PDF serialization is CPU-bound; keep it off the event loop.
    let renderer = data.renderer.clone();
    match web::block(move || renderer.render(&permit)).await {
        Ok(Ok(pass)) => HttpResponse::Ok()
            .content_type("application/pdf")
            .append_header((
                "Content-Disposition",
                format!("inline; filename=\"{}\"", pass.filename),
            ))
            .body(pass.pdf),
        Ok(Err(e)) => {
            error!("Error generating the PDF: {e}");
            HttpResponse::InternalServerError().body("Error generating the PDF.")
        }
        Err(e) => {
            error!("Error generating the PDF: {e}");
            HttpResponse::InternalServerError().body("Error generating the PDF.")
        }
    }
}
