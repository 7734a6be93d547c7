// src/table/records.rs

use super::Record;
use crate::error::Result;
use arrow::error::ArrowError;
use arrow::json::reader::{infer_json_schema_from_iterator, ReaderBuilder};
use arrow::record_batch::RecordBatch;
use serde_json::Value;
use std::sync::Arc;

/// Build a batch from in-memory records, keeping row order.
///
/// Columns are the union of every record's keys in first-seen order; a key
/// a record lacks becomes null in that row. A key whose values mix scalar
/// types becomes a string column.
pub fn records_to_table(records: &[Record]) -> Result<RecordBatch> {
    let schema = infer_json_schema_from_iterator(
        records
            .iter()
            .map(|r| Ok::<_, ArrowError>(Value::Object(r.clone()))),
    )?;
    let schema = Arc::new(schema);

    if records.is_empty() {
        return Ok(RecordBatch::new_empty(schema));
    }

    let mut decoder = ReaderBuilder::new(schema.clone())
        .with_batch_size(records.len())
        .with_coerce_primitive(true)
        .build_decoder()?;
    decoder.serialize(records)?;

    Ok(decoder
        .flush()?
        .unwrap_or_else(|| RecordBatch::new_empty(schema)))
}
