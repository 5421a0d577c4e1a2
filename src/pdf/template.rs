//! Pass template loading and rendering.

use std::fs;
use std::path::Path;

use lopdf::Document;

use crate::permit::models::PermitTransit;

use super::engine;
use super::fields::{field_values, FIELD_MAP};
use super::{FilledPass, RenderError};

/// Filename the browser sees for a rendered pass.
pub const PASS_FILENAME: &str = "filled_output.pdf";

/// The static pass template plus the fill logic bound to it.
///
/// Template bytes are read once at startup; every render parses a fresh
/// in-memory copy, so requests never share mutable document state and equal
/// records produce byte-identical output.
#[derive(Debug)]
pub struct PassRenderer {
    template: Vec<u8>,
}

impl PassRenderer {
    /// Load the template from disk and verify it against the field mapping.
    pub fn from_file(path: &Path) -> Result<Self, RenderError> {
        let template = fs::read(path).map_err(RenderError::TemplateIo)?;
        Self::new(template)
    }

    /// Wrap raw template bytes. Every field the mapping declares must exist
    /// in the template; a mismatched template is rejected here, at startup,
    /// rather than on the first render.
    pub fn new(template: Vec<u8>) -> Result<Self, RenderError> {
        let doc = Document::load_mem(&template)?;
        let names = engine::list_field_names(&doc)?;
        for mapping in FIELD_MAP {
            if !names.iter().any(|name| name == mapping.field) {
                return Err(RenderError::MissingField(mapping.field.to_string()));
            }
        }
        Ok(Self { template })
    }

    /// Fill the template with the record's values and serialize the result.
    pub fn render(&self, permit: &PermitTransit) -> Result<FilledPass, RenderError> {
        let mut doc = Document::load_mem(&self.template)?;
        engine::fill_text_fields(&mut doc, &field_values(permit))?;

        let mut pdf = Vec::new();
        doc.save_to(&mut pdf).map_err(RenderError::TemplateIo)?;

        Ok(FilledPass {
            filename: PASS_FILENAME.to_string(),
            pdf,
        })
    }
}
