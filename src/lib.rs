//! Per-payer claims loader.
//!
//! A run builds a table from a CSV file or inline records ([`table`]),
//! stamps it with ingestion metadata and applies the payer's adjustment
//! ([`transform`]), then hands it to a [`sink::Sink`] that resolves the
//! payer's destination and writes it. [`pipeline::run`] ties the three
//! together.

pub mod error;
pub mod payer;
pub mod pipeline;
pub mod sink;
pub mod table;
pub mod transform;

pub use error::{LoaderError, Result, SinkError};
pub use payer::Payer;
pub use pipeline::{run, RunOutcome, Stage};
pub use sink::{ConsoleSink, DestinationMap, ParquetSink, Sink};
pub use table::{build_table, Record, TableSource};
pub use transform::{transform, transform_at};
