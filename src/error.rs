// src/error.rs

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("no input data provided")]
    EmptyInput,

    #[error("unsupported input kind: {0} (expected a file path or a list of records)")]
    InvalidInputKind(String),

    #[error("failed to read source {path:?}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: ArrowError,
    },

    #[error("required column `{0}` is missing")]
    MissingColumn(String),

    #[error("column `{column}` cannot be adjusted: {source}")]
    InvalidColumn {
        column: String,
        #[source]
        source: ArrowError,
    },

    #[error("invalid payer specified: {0}")]
    UnknownPayer(String),

    #[error("source file must be provided for file-based loading (payer `{0}`)")]
    MissingSource(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("sink write failed: {0}")]
    Sink(#[from] SinkError),

    #[error("table assembly failed: {0}")]
    Arrow(#[from] ArrowError),
}

/// Failures raised by a sink while writing; the partial output is not rolled back.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("rendering failed: {0}")]
    Render(#[from] ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] ParquetError),
}

pub type Result<T> = std::result::Result<T, LoaderError>;
