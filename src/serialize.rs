//! JSON import and export of documents.
//!
//! The persisted shape is the camelCase serde form of [`Document`] with a
//! `version` tag that must equal [`FORMAT_VERSION`]. Default import checks
//! only the tag; [`import_document_strict`] additionally rejects documents
//! with structural problems. Cell indexes in the input are discarded and
//! rebuilt from each layer's words.

#[cfg(test)]
#[path = "serialize_test.rs"]
mod serialize_test;

use serde_json::Value;

use crate::cells::rebuild_layer_cells;
use crate::consts::FORMAT_VERSION;
use crate::doc::{Document, IntegrityIssue};

/// Error returned by [`import_document`] and [`import_document_strict`].
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The input is not JSON or does not have the document shape.
    #[error("invalid document format")]
    Malformed(#[source] serde_json::Error),
    /// The `version` tag is missing or not the supported version.
    #[error("invalid document format")]
    UnsupportedVersion(Option<u64>),
    /// Strict import found structural problems.
    #[error("document failed integrity checks ({} issue(s))", .0.len())]
    Integrity(Vec<IntegrityIssue>),
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err)
    }
}

/// Error returned by [`export_document`].
#[derive(Debug, thiserror::Error)]
#[error("failed to serialize document: {0}")]
pub struct ExportError(#[from] serde_json::Error);

/// Serialize `doc` as pretty-printed JSON.
pub fn export_document(doc: &Document) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Parse a serialized document, checking only the version tag.
pub fn import_document(json: &str) -> Result<Document, ImportError> {
    let mut value: Value = serde_json::from_str(json)?;

    let tag = value.get("version");
    let supported = tag.and_then(Value::as_f64).is_some_and(|v| (v - f64::from(FORMAT_VERSION)).abs() < f64::EPSILON);
    if !supported {
        let version = tag.and_then(Value::as_u64);
        tracing::warn!(?version, "rejecting document with unsupported version");
        return Err(ImportError::UnsupportedVersion(version));
    }

    normalize_version(&mut value);
    discard_cells(&mut value);
    let mut doc: Document = serde_json::from_value(value)?;
    for layer in doc.layers_by_id.values_mut() {
        rebuild_layer_cells(layer);
    }
    Ok(doc)
}

/// Parse a serialized document and reject it if
/// [`Document::integrity_issues`] reports anything.
pub fn import_document_strict(json: &str) -> Result<Document, ImportError> {
    let doc = import_document(json)?;
    let issues = doc.integrity_issues();
    if issues.is_empty() {
        Ok(doc)
    } else {
        tracing::warn!(count = issues.len(), "rejecting document with integrity issues");
        Err(ImportError::Integrity(issues))
    }
}

/// Rewrite an accepted version tag (`1` or `1.0`) as the integer tag.
fn normalize_version(value: &mut Value) {
    if let Some(fields) = value.as_object_mut() {
        fields.insert("version".to_owned(), Value::from(FORMAT_VERSION));
    }
}

/// Drop every layer's `cellsByKey` so stale or malformed indexes never fail
/// deserialization; they are rebuilt after parsing.
fn discard_cells(value: &mut Value) {
    let Some(layers) = value.get_mut("layersById").and_then(Value::as_object_mut) else {
        return;
    };
    for layer in layers.values_mut() {
        if let Some(fields) = layer.as_object_mut() {
            fields.remove("cellsByKey");
        }
    }
}
