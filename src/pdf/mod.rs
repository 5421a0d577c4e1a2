//! Pass rendering - filling the named form fields of the static PDF
//! template with stored permit values.
//!
//! This module contains the pieces of the rendering pipeline:
//! - `fields` - the declared mapping from record attributes to template fields
//! - `template` - template loading, startup validation, and the renderer
//! - `engine` - the AcroForm walk/fill/serialize machinery
//! - `common` - formatting helpers

pub mod common;
pub mod engine;
pub mod fields;
pub mod template;

pub use fields::{field_values, FieldMapping, FIELD_MAP};
pub use template::{PassRenderer, PASS_FILENAME};

use thiserror::Error;

/// Errors that can occur while producing a filled pass.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to load PDF template: {0}")]
    TemplateIo(#[source] std::io::Error),
    #[error("malformed PDF template: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("template has no interactive form")]
    NoForm,
    #[error("template form field '{0}' not found")]
    MissingField(String),
}

/// Result of a successful fill.
#[derive(Debug)]
pub struct FilledPass {
    pub filename: String,
    pub pdf: Vec<u8>,
}
