use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use lopdf::{dictionary, Document, Object, StringFormat};
use tokio::sync::Mutex;
use uuid::Uuid;

use permit_transit_server::db::AppState;
use permit_transit_server::pdf::{PassRenderer, FIELD_MAP};
use permit_transit_server::permit::models::{PermitTransit, SubmitPermitForm};
use permit_transit_server::store::{PermitStore, StoreError};

/// In-memory store standing in for PostgreSQL in handler tests.
pub struct MockPermitStore {
    records: Arc<Mutex<HashMap<Uuid, PermitTransit>>>,
}

impl MockPermitStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl PermitStore for MockPermitStore {
    async fn insert_permit(
        &self,
        submission: SubmitPermitForm,
    ) -> Result<PermitTransit, StoreError> {
        let permit = submission.into_permit(Uuid::new_v4())?;
        self.records.lock().await.insert(permit.id, permit.clone());
        Ok(permit)
    }

    async fn find_permit(&self, id: &Uuid) -> Result<Option<PermitTransit>, StoreError> {
        Ok(self.records.lock().await.get(id).cloned())
    }
}

/// Store whose operations always fail, for exercising the error paths.
pub struct FailingPermitStore;

#[async_trait]
impl PermitStore for FailingPermitStore {
    async fn insert_permit(
        &self,
        _submission: SubmitPermitForm,
    ) -> Result<PermitTransit, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolClosed))
    }

    async fn find_permit(&self, _id: &Uuid) -> Result<Option<PermitTransit>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolClosed))
    }
}

/// Names declared by the renderer's field mapping.
pub fn mapped_field_names() -> Vec<&'static str> {
    FIELD_MAP.iter().map(|m| m.field).collect()
}

/// Build a minimal one-page PDF exposing the given text form fields.
pub fn build_template(field_names: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut field_refs: Vec<Object> = Vec::new();
    for name in field_names {
        let field_id = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "FT" => "Tx",
            "T" => Object::String(name.as_bytes().to_vec(), StringFormat::Literal),
            "Rect" => vec![0.into(), 0.into(), 200.into(), 20.into()],
        });
        field_refs.push(field_id.into());
    }

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        "Annots" => field_refs.clone(),
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let acroform_id = doc.add_object(dictionary! {
        "Fields" => field_refs,
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "AcroForm" => acroform_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize template fixture");
    bytes
}

/// A one-page PDF with no interactive form at all.
pub fn build_formless_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize fixture");
    bytes
}

/// A template exposing exactly the mapped fields.
pub fn full_template() -> Vec<u8> {
    build_template(&mapped_field_names())
}

/// Application state wired to the given store and the standard fixture
/// template.
pub fn app_state_with(store: Arc<dyn PermitStore + Send + Sync>) -> AppState {
    let renderer = PassRenderer::new(full_template()).expect("valid fixture template");
    AppState::with_parts(store, Arc::new(renderer))
}

/// Read every top-level field's /V string from a filled PDF.
pub fn read_field_values(pdf: &[u8]) -> HashMap<String, String> {
    let doc = Document::load_mem(pdf).expect("parse filled pdf");
    let mut values = HashMap::new();
    for field in form_fields(&doc) {
        let dict = doc
            .get_object(field)
            .and_then(|o| o.as_dict())
            .expect("field dictionary");
        let name = match dict.get(b"T") {
            Ok(Object::String(bytes, _)) => String::from_utf8_lossy(bytes).into_owned(),
            _ => continue,
        };
        let value = match dict.get(b"V") {
            Ok(Object::String(bytes, _)) => String::from_utf8_lossy(bytes).into_owned(),
            _ => String::new(),
        };
        values.insert(name, value);
    }
    values
}

/// The NeedAppearances flag of a PDF's form dictionary.
pub fn need_appearances(pdf: &[u8]) -> bool {
    let doc = Document::load_mem(pdf).expect("parse filled pdf");
    let acro = acroform(&doc).expect("form dictionary");
    matches!(acro.get(b"NeedAppearances"), Ok(Object::Boolean(true)))
}

fn acroform(doc: &Document) -> Option<&lopdf::Dictionary> {
    let catalog = doc.catalog().ok()?;
    match catalog.get(b"AcroForm") {
        Ok(Object::Reference(id)) => doc.get_object(*id).ok()?.as_dict().ok(),
        Ok(Object::Dictionary(dict)) => Some(dict),
        _ => None,
    }
}

fn form_fields(doc: &Document) -> Vec<lopdf::ObjectId> {
    let Some(acro) = acroform(doc) else {
        return Vec::new();
    };
    match acro.get(b"Fields") {
        Ok(Object::Array(items)) => items.iter().filter_map(|o| o.as_reference().ok()).collect(),
        _ => Vec::new(),
    }
}

/// A submission with every form field populated.
pub fn sample_form() -> SubmitPermitForm {
    SubmitPermitForm {
        permit_number: Some("PT/2026/0042".to_string()),
        module: Some("Timber".to_string()),
        validity_from: Some("2026-08-01".to_string()),
        validity_till: Some("2026-08-31".to_string()),
        time_from: Some("06:00".to_string()),
        time_till: Some("18:00".to_string()),
        items: Some("Sal logs".to_string()),
        quantity: Some("120".to_string()),
        value: Some("45000".to_string()),
        mmca_name: Some("Northern MMCA".to_string()),
        name: Some("A. Kumar".to_string()),
        address: Some("12 Forest Road, Ranchi".to_string()),
        mobile: Some("9800000000".to_string()),
        division: Some("Ranchi East".to_string()),
        range: Some("Bero".to_string()),
        kist: Some("Kist II".to_string()),
        etp_number: Some("ETP-7781".to_string()),
        transit_module: Some("Road".to_string()),
        transit_item: Some("Sal logs".to_string()),
        transit_quantity: Some("120".to_string()),
        mahal: Some("Bero Mahal".to_string()),
        destination: Some("Jamshedpur depot".to_string()),
        valid_from_date: Some("2026-08-02".to_string()),
        valid_from_time: Some("06:00".to_string()),
        valid_to_date: Some("2026-08-05".to_string()),
        valid_to_time: Some("18:00".to_string()),
        vehicle_number: Some("JH01AB1234".to_string()),
        driver_info: Some("R. Singh, DL 556677".to_string()),
        transit_division: Some("Ranchi East".to_string()),
        transit_range: Some("Bero".to_string()),
        transit_permit_number: Some("TP/2026/0199".to_string()),
    }
}

/// Pull the pass link out of a confirmation page.
pub fn extract_pdf_url(html: &str) -> String {
    let start = html.find("/pdf/").expect("confirmation page carries a pdf link");
    let tail = &html[start..];
    let end = tail.find('"').expect("closing quote");
    tail[..end].to_string()
}
