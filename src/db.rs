//! Application state - the injected persistence handle and renderer.

use std::env;
use std::path::Path;
use std::sync::Arc;

use crate::pdf::PassRenderer;
use crate::store::{PermitStore, PgPermitStore};

const DEFAULT_TEMPLATE_PATH: &str = "./static/permit_pass.pdf";

/// Per-process state shared across request handlers. Constructed once at
/// startup and handed to actix as `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PermitStore + Send + Sync>,
    pub renderer: Arc<PassRenderer>,
}

impl AppState {
    /// Build state from the environment: `DATABASE_URL` for the record
    /// store, `PERMIT_TEMPLATE_PATH` (optional) for the pass template.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;
        let store = PgPermitStore::connect(&database_url).await?;

        let template_path =
            env::var("PERMIT_TEMPLATE_PATH").unwrap_or_else(|_| DEFAULT_TEMPLATE_PATH.to_string());
        let renderer = PassRenderer::from_file(Path::new(&template_path))?;

        Ok(Self::with_parts(Arc::new(store), Arc::new(renderer)))
    }

    /// Assemble state from already-built parts. Used by tests to inject a
    /// mock store and an in-memory template.
    pub fn with_parts(
        store: Arc<dyn PermitStore + Send + Sync>,
        renderer: Arc<PassRenderer>,
    ) -> Self {
        AppState { store, renderer }
    }
}
