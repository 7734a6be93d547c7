// src/pipeline.rs

use crate::error::{LoaderError, Result};
use crate::payer::Payer;
use crate::sink::Sink;
use crate::table::{build_table, TableSource};
use crate::transform::transform;
use arrow::record_batch::RecordBatch;
use serde_json::json;
use std::{fmt, path::Path, time::Instant};
use tracing::{info, instrument, warn};

/// Stages a run logs as it moves forward; any error ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Built,
    Transformed,
    Loaded,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Built => "built",
            Stage::Transformed => "transformed",
            Stage::Loaded => "loaded",
        })
    }
}

/// What a completed run handed to its sink.
#[derive(Debug)]
pub struct RunOutcome {
    pub destination: String,
    pub table: RecordBatch,
}

/// The fixed claims used when the payer is `manual`.
pub fn manual_source() -> Result<TableSource> {
    TableSource::from_value(json!([
        {
            "member_id": 7,
            "claim_id": 107,
            "claim_amount": 500,
            "service_date": "2025-01-07"
        },
        {
            "member_id": 8,
            "claim_id": 108,
            "claim_amount": 700,
            "service_date": "2025-01-08"
        }
    ]))
}

/// Pick the input for `payer`: the built-in records for `manual`, otherwise
/// the CSV at `source`, which must be present and non-empty.
pub fn select_source(payer: Payer, source: Option<&Path>) -> Result<TableSource> {
    match (payer, source) {
        (Payer::Manual, source) => {
            if let Some(ignored) = source {
                warn!(source = %ignored.display(), "manual payer ignores --source");
            }
            manual_source()
        }
        (_, Some(path)) if !path.as_os_str().is_empty() => {
            Ok(TableSource::File(path.to_path_buf()))
        }
        (payer, _) => Err(LoaderError::MissingSource(payer.to_string())),
    }
}

/// Build, transform and load one payer's claims.
#[instrument(level = "info", skip(payer, source, sink), fields(payer = %payer))]
pub fn run<S: Sink + ?Sized>(
    payer: Payer,
    source: Option<&Path>,
    sink: &mut S,
) -> Result<RunOutcome> {
    let start = Instant::now();
    let input = select_source(payer, source)?;

    let table = build_table(&input)?;
    info!(stage = %Stage::Built, rows = table.num_rows(), columns = table.num_columns());

    let table = transform(table, payer)?;
    info!(stage = %Stage::Transformed, columns = table.num_columns());

    let destination = sink.resolve(payer)?;
    sink.emit(&destination, &table)?;
    info!(stage = %Stage::Loaded, destination = %destination, elapsed = ?start.elapsed());

    Ok(RunOutcome {
        destination,
        table,
    })
}
