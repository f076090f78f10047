//! Deterministic CSV rendering for the registrations export.
//!
//! Column order is first-seen across documents in cursor order and the
//! internal `_id` field is stripped, so exporting the same data twice
//! produces byte-identical output.

use mongodb::bson::Document;

use crate::error::StoreError;
use crate::model::display_value;

/// Union of document keys in first-seen order, `_id` excluded.
pub fn csv_columns(docs: &[Document]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for doc in docs {
        for key in doc.keys() {
            if key != "_id" && !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// Renders the documents as CSV: header row of [`csv_columns`], then one row
/// per document with missing fields left empty.
pub fn render_csv(docs: &[Document]) -> Result<String, StoreError> {
    if docs.is_empty() {
        return Ok(String::new());
    }
    let columns = csv_columns(docs);
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&columns)?;
    for doc in docs {
        let row: Vec<String> = columns
            .iter()
            .map(|column| doc.get(column).map(display_value).unwrap_or_default())
            .collect();
        writer.write_record(&row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::Io(std::io::Error::other(e.to_string())))?;
    String::from_utf8(bytes).map_err(|e| StoreError::Io(std::io::Error::other(e.to_string())))
}
