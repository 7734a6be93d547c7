// src/sink/mod.rs

pub mod console;
pub mod destinations;
pub mod parquet;

pub use console::ConsoleSink;
pub use destinations::DestinationMap;
pub use self::parquet::ParquetSink;

use crate::error::Result;
use crate::payer::Payer;
use arrow::record_batch::RecordBatch;

/// A destination for the transformed table.
///
/// `emit` is not idempotent: calling it twice writes twice. A failure part
/// way through leaves whatever was already written.
pub trait Sink {
    fn destinations(&self) -> &DestinationMap;

    /// Map `payer` to its destination table name.
    fn resolve(&self, payer: Payer) -> Result<String> {
        self.destinations().resolve(payer).map(str::to_string)
    }

    fn emit(&mut self, destination: &str, table: &RecordBatch) -> Result<()>;
}
