// src/table/csv.rs

use crate::error::{LoaderError, Result};
use arrow::compute::concat_batches;
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use std::{
    fs::File,
    io::{Seek, SeekFrom},
    path::Path,
    sync::Arc,
};
use tracing::{debug, instrument};

/// Read a comma-delimited file with a header row into one batch.
///
/// Column types are inferred from the whole file. The handle is dropped
/// before returning on both the success and the error path.
#[instrument(level = "debug", skip(path), fields(path = %path.display()))]
pub fn read_csv_table(path: &Path) -> Result<RecordBatch> {
    read(path).map_err(|source| LoaderError::SourceRead {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> std::result::Result<RecordBatch, ArrowError> {
    let mut file = File::open(path)?;

    // 1) infer column names from the header and types from the data rows
    let format = Format::default().with_header(true);
    let (schema, records_read) = format.infer_schema(&mut file, None)?;
    let schema = Arc::new(schema);
    debug!(columns = schema.fields().len(), records_read, "inferred schema");

    // 2) rewind and decode
    file.seek(SeekFrom::Start(0))?;
    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .build(file)?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    concat_batches(&schema, &batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Float64Array, Int64Array};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(content.as_bytes()).unwrap();
        tmp
    }

    #[test]
    fn reads_header_and_rows() -> anyhow::Result<()> {
        let tmp = csv_file(
            "member_id,claim_id,claim_amount,service_date\n\
             1,101,250.5,2025-01-01\n\
             2,102,300,2025-01-02\n\
             3,103,125.25,2025-01-03\n",
        );

        let table = read_csv_table(tmp.path())?;
        assert_eq!(table.num_rows(), 3);

        let schema = table.schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(
            names,
            vec!["member_id", "claim_id", "claim_amount", "service_date"]
        );

        let ids = table
            .column(1)
            .as_any()
            .downcast_ref::<Int64Array>()
            .expect("claim_id should be inferred as integers");
        assert_eq!(ids.values(), &[101, 102, 103]);

        let amounts = table
            .column(2)
            .as_any()
            .downcast_ref::<Float64Array>()
            .expect("claim_amount should be inferred as floats");
        assert_eq!(amounts.value(0), 250.5);
        Ok(())
    }

    #[test]
    fn header_only_file_has_no_rows() -> anyhow::Result<()> {
        let tmp = csv_file("member_id,claim_id,claim_amount\n");
        let table = read_csv_table(tmp.path())?;
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table.num_columns(), 3);
        Ok(())
    }

    #[test]
    fn missing_file_is_a_source_error() {
        let err = read_csv_table(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::SourceRead { .. }));
    }

    #[test]
    fn ragged_rows_are_a_source_error() {
        let tmp = csv_file("claim_id,claim_amount\n1,100\n2,200,extra\n");
        let err = read_csv_table(tmp.path()).unwrap_err();
        assert!(matches!(err, LoaderError::SourceRead { .. }));
    }
}
