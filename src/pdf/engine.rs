//! AcroForm fill engine.
//!
//! Walks the template's field tree, writes values into the matching text
//! fields, and flags `NeedAppearances` so viewers regenerate the appearance
//! streams for the new values.

use std::collections::HashMap;

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};

use super::RenderError;

/// Write `values` into the document's form fields. Every entry must name a
/// field the template declares.
pub fn fill_text_fields(
    doc: &mut Document,
    values: &[(&'static str, String)],
) -> Result<(), RenderError> {
    let fields = collect_fields(doc)?;
    let by_name: HashMap<&str, ObjectId> = fields
        .iter()
        .map(|(name, id)| (name.as_str(), *id))
        .collect();

    for (name, value) in values {
        let id = *by_name
            .get(name)
            .ok_or_else(|| RenderError::MissingField((*name).to_string()))?;
        let field = doc.get_object_mut(id)?.as_dict_mut()?;
        field.set(
            "V",
            Object::String(value.clone().into_bytes(), StringFormat::Literal),
        );
        // A stale appearance stream would shadow the new value.
        field.remove(b"AP");
    }

    set_need_appearances(doc)
}

/// Fully-qualified names of every field the template's form declares.
pub fn list_field_names(doc: &Document) -> Result<Vec<String>, RenderError> {
    Ok(collect_fields(doc)?
        .into_iter()
        .map(|(name, _)| name)
        .collect())
}

fn collect_fields(doc: &Document) -> Result<Vec<(String, ObjectId)>, RenderError> {
    let acro = acroform_dict(doc)?;
    let roots: Vec<ObjectId> = match acro.get(b"Fields") {
        Ok(Object::Array(items)) => items.iter().filter_map(|o| o.as_reference().ok()).collect(),
        Ok(Object::Reference(id)) => doc
            .get_object(*id)?
            .as_array()?
            .iter()
            .filter_map(|o| o.as_reference().ok())
            .collect(),
        _ => return Err(RenderError::NoForm),
    };

    let mut fields = Vec::new();
    for id in roots {
        walk_field(doc, id, None, &mut fields)?;
    }
    Ok(fields)
}

/// Depth-first walk of one field subtree. Values belong on the dictionary
/// carrying the partial name `/T`; kids without a name of their own are bare
/// widget annotations of that field and are skipped.
fn walk_field(
    doc: &Document,
    id: ObjectId,
    prefix: Option<&str>,
    out: &mut Vec<(String, ObjectId)>,
) -> Result<(), RenderError> {
    let dict = doc.get_object(id)?.as_dict()?;

    let name = match (partial_name(dict), prefix) {
        (Some(partial), Some(prefix)) => format!("{prefix}.{partial}"),
        (Some(partial), None) => partial,
        (None, _) => return Ok(()),
    };

    let mut has_child_fields = false;
    if let Ok(Object::Array(kids)) = dict.get(b"Kids") {
        let kid_ids: Vec<ObjectId> = kids.iter().filter_map(|k| k.as_reference().ok()).collect();
        for kid_id in kid_ids {
            let kid_dict = doc.get_object(kid_id)?.as_dict()?;
            if partial_name(kid_dict).is_some() {
                has_child_fields = true;
                walk_field(doc, kid_id, Some(name.as_str()), out)?;
            }
        }
    }

    if !has_child_fields {
        out.push((name, id));
    }
    Ok(())
}

fn partial_name(dict: &Dictionary) -> Option<String> {
    match dict.get(b"T") {
        Ok(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
        _ => None,
    }
}

fn acroform_dict(doc: &Document) -> Result<&Dictionary, RenderError> {
    let catalog = doc.catalog()?;
    match catalog.get(b"AcroForm") {
        Ok(Object::Reference(id)) => Ok(doc.get_object(*id)?.as_dict()?),
        Ok(Object::Dictionary(dict)) => Ok(dict),
        _ => Err(RenderError::NoForm),
    }
}

fn set_need_appearances(doc: &mut Document) -> Result<(), RenderError> {
    let root_id = doc.trailer.get(b"Root")?.as_reference()?;
    let acro_entry = {
        let catalog = doc.get_object(root_id)?.as_dict()?;
        catalog.get(b"AcroForm").map(Object::clone)
    };

    match acro_entry {
        Ok(Object::Reference(id)) => {
            doc.get_object_mut(id)?
                .as_dict_mut()?
                .set("NeedAppearances", Object::Boolean(true));
            Ok(())
        }
        Ok(Object::Dictionary(_)) => {
            let catalog = doc.get_object_mut(root_id)?.as_dict_mut()?;
            if let Ok(Object::Dictionary(dict)) = catalog.get_mut(b"AcroForm") {
                dict.set("NeedAppearances", Object::Boolean(true));
            }
            Ok(())
        }
        _ => Err(RenderError::NoForm),
    }
}
