// src/sink/parquet.rs

use super::{DestinationMap, Sink};
use crate::error::{Result, SinkError};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};
use tracing::info;

/// Writes each emitted table to `<dir>/<destination>.parquet`.
pub struct ParquetSink {
    destinations: DestinationMap,
    dir: PathBuf,
}

impl ParquetSink {
    pub fn new(destinations: DestinationMap, dir: impl Into<PathBuf>) -> Self {
        Self {
            destinations,
            dir: dir.into(),
        }
    }

    pub fn path_for(&self, destination: &str) -> PathBuf {
        self.dir.join(format!("{}.parquet", destination))
    }

    fn write(&self, path: &Path, table: &RecordBatch) -> std::result::Result<(), SinkError> {
        fs::create_dir_all(&self.dir)?;
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();
        let mut writer = ArrowWriter::try_new(file, table.schema(), Some(props))?;
        writer.write(table)?;
        writer.close()?;
        Ok(())
    }
}

impl Sink for ParquetSink {
    fn destinations(&self) -> &DestinationMap {
        &self.destinations
    }

    fn emit(&mut self, destination: &str, table: &RecordBatch) -> Result<()> {
        let path = self.path_for(destination);
        self.write(&path, table)?;
        info!(
            destination,
            rows = table.num_rows(),
            path = %path.display(),
            "wrote parquet"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payer::Payer;
    use arrow::array::Int64Array;
    use arrow::datatypes::{DataType, Field, Schema};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn writes_one_file_per_destination() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let mut sink = ParquetSink::new(DestinationMap::default(), dir.path().join("out"));

        let schema = Schema::new(vec![Field::new("claim_id", DataType::Int64, false)]);
        let table = RecordBatch::try_new(
            Arc::new(schema),
            vec![Arc::new(Int64Array::from(vec![1, 2, 3]))],
        )?;

        let dest = sink.resolve(Payer::Anthem)?;
        sink.emit(&dest, &table)?;

        let path = sink.path_for(&dest);
        assert!(path.ends_with("SNOWFLAKE.RAW.ANTHEM_TABLE.parquet"));

        let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path)?)?.build()?;
        let rows: usize = reader
            .map(|b| b.map(|b| b.num_rows()))
            .sum::<std::result::Result<usize, _>>()?;
        assert_eq!(rows, 3);
        Ok(())
    }
}
