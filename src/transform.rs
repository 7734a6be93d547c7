// src/transform.rs

use crate::error::{LoaderError, Result};
use crate::payer::Payer;
use arrow::{
    array::{ArrayRef, AsArray, StringArray, TimestampMicrosecondArray},
    compute::{cast_with_options, CastOptions},
    datatypes::{DataType, Field, Float64Type, Schema, TimeUnit},
    record_batch::RecordBatch,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, instrument};

pub const INGESTION_TIMESTAMP: &str = "ingestion_timestamp";
pub const PAYER_NAME: &str = "payer_name";
pub const CLAIM_AMOUNT: &str = "claim_amount";

/// Multiplier applied to every anthem claim amount. No rounding follows it.
pub const ANTHEM_CLAIM_FACTOR: f64 = 1.05;

const TIMESTAMP_TZ: &str = "+00:00";

/// Stamp `table` with ingestion metadata and apply the payer's adjustment,
/// reading the wall clock once for the whole batch.
pub fn transform(table: RecordBatch, payer: Payer) -> Result<RecordBatch> {
    transform_at(table, payer, Utc::now())
}

/// Same as [`transform`] with an explicit ingestion time.
#[instrument(level = "info", skip(table, now), fields(rows = table.num_rows()))]
pub fn transform_at(table: RecordBatch, payer: Payer, now: DateTime<Utc>) -> Result<RecordBatch> {
    let rows = table.num_rows();
    let metadata = table.schema().metadata().clone();
    let mut fields: Vec<Field> = table
        .schema()
        .fields()
        .iter()
        .map(|f| f.as_ref().clone())
        .collect();
    let mut columns: Vec<ArrayRef> = table.columns().to_vec();

    // 1) one timestamp for every row
    let ts = TimestampMicrosecondArray::from_value(now.timestamp_micros(), rows)
        .with_timezone(TIMESTAMP_TZ);
    upsert_column(
        &mut fields,
        &mut columns,
        Field::new(
            INGESTION_TIMESTAMP,
            DataType::Timestamp(TimeUnit::Microsecond, Some(TIMESTAMP_TZ.into())),
            false,
        ),
        Arc::new(ts),
    );

    // 2) payer tag
    upsert_column(
        &mut fields,
        &mut columns,
        Field::new(PAYER_NAME, DataType::Utf8, false),
        Arc::new(StringArray::from(vec![payer.as_str(); rows])),
    );

    // 3) payer-specific rules
    if payer == Payer::Anthem {
        let idx = fields
            .iter()
            .position(|f| f.name() == CLAIM_AMOUNT)
            .ok_or_else(|| LoaderError::MissingColumn(CLAIM_AMOUNT.to_string()))?;
        let scaled = scale_amounts(&columns[idx], ANTHEM_CLAIM_FACTOR)?;
        let nullable = fields[idx].is_nullable();
        columns[idx] = scaled;
        fields[idx] = Field::new(CLAIM_AMOUNT, DataType::Float64, nullable);
        info!(factor = ANTHEM_CLAIM_FACTOR, "applied anthem claim adjustment");
    }

    let schema = Schema::new_with_metadata(fields, metadata);
    RecordBatch::try_new(Arc::new(schema), columns).map_err(Into::into)
}

/// Replace the column named like `field`, or append it.
fn upsert_column(
    fields: &mut Vec<Field>,
    columns: &mut Vec<ArrayRef>,
    field: Field,
    column: ArrayRef,
) {
    match fields.iter().position(|f| f.name() == field.name()) {
        Some(idx) => {
            fields[idx] = field;
            columns[idx] = column;
        }
        None => {
            fields.push(field);
            columns.push(column);
        }
    }
}

/// Widen to f64 and multiply; nulls stay null.
fn scale_amounts(column: &ArrayRef, factor: f64) -> Result<ArrayRef> {
    let strict = CastOptions {
        safe: false,
        ..Default::default()
    };
    let amounts = cast_with_options(column, &DataType::Float64, &strict).map_err(|source| {
        LoaderError::InvalidColumn {
            column: CLAIM_AMOUNT.to_string(),
            source,
        }
    })?;
    let scaled = amounts
        .as_primitive::<Float64Type>()
        .unary::<_, Float64Type>(|v| v * factor);
    Ok(Arc::new(scaled))
}
