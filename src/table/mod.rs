// src/table/mod.rs
//! Normalizes a claims source into a single Arrow `RecordBatch`.

pub mod csv;
pub mod records;

use crate::error::{LoaderError, Result};
use arrow::record_batch::RecordBatch;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::info;

/// One input row: field name → scalar value, in the order the fields were written.
pub type Record = Map<String, Value>;

/// Where a table comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TableSource {
    /// Comma-delimited file whose header row defines the columns.
    File(PathBuf),
    /// Records supplied in memory.
    Records(Vec<Record>),
}

impl TableSource {
    /// Classify a loosely-typed input: a string is a file path, an array of
    /// objects is a record list. Anything else is rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Err(LoaderError::EmptyInput),
            Value::String(path) if path.trim().is_empty() => Err(LoaderError::EmptyInput),
            Value::String(path) => Ok(TableSource::File(PathBuf::from(path))),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| match item {
                    Value::Object(record) => Ok(record),
                    other => Err(LoaderError::InvalidInputKind(format!(
                        "record #{} is {}",
                        idx,
                        kind_of(&other)
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(TableSource::Records),
            other => Err(LoaderError::InvalidInputKind(kind_of(&other).to_string())),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Build the run's table from `source`.
pub fn build_table(source: &TableSource) -> Result<RecordBatch> {
    match source {
        TableSource::File(path) => {
            info!(path = %path.display(), "reading data from CSV file");
            csv::read_csv_table(path)
        }
        TableSource::Records(records) => {
            info!(records = records.len(), "converting inline records to a table");
            records::records_to_table(records)
        }
    }
}
