// src/sink/console.rs

use super::{DestinationMap, Sink};
use crate::error::{Result, SinkError};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use std::io::{self, Stdout, Write};
use tracing::info;

/// Prints a load report (destination, row count, full table) to a writer.
pub struct ConsoleSink<W: Write = Stdout> {
    destinations: DestinationMap,
    out: W,
}

impl ConsoleSink<Stdout> {
    pub fn stdout(destinations: DestinationMap) -> Self {
        Self::new(destinations, io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(destinations: DestinationMap, out: W) -> Self {
        Self { destinations, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_report(
        &mut self,
        destination: &str,
        table: &RecordBatch,
    ) -> std::result::Result<(), SinkError> {
        let preview = pretty_format_batches(std::slice::from_ref(table))?;
        writeln!(self.out)?;
        writeln!(self.out, "Loading data into {}", destination)?;
        writeln!(self.out, "Total records: {}", table.num_rows())?;
        writeln!(self.out)?;
        writeln!(self.out, "Data Preview:")?;
        writeln!(self.out, "{}", preview)?;
        writeln!(self.out, "Load completed successfully.")?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Sink for ConsoleSink<W> {
    fn destinations(&self) -> &DestinationMap {
        &self.destinations
    }

    fn emit(&mut self, destination: &str, table: &RecordBatch) -> Result<()> {
        self.write_report(destination, table)?;
        info!(destination, rows = table.num_rows(), "load report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoaderError;
    use crate::payer::Payer;
    use arrow::array::{Float64Array, Int64Array};
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn sample() -> RecordBatch {
        let schema = Schema::new(vec![
            Field::new("claim_id", DataType::Int64, false),
            Field::new("claim_amount", DataType::Float64, false),
        ]);
        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(Int64Array::from(vec![201, 202])),
                Arc::new(Float64Array::from(vec![99.5, 12.0])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn report_lists_destination_count_and_rows() -> anyhow::Result<()> {
        let mut sink = ConsoleSink::new(DestinationMap::default(), Vec::new());
        let dest = sink.resolve(Payer::Cigna)?;
        sink.emit(&dest, &sample())?;

        let text = String::from_utf8(sink.into_inner())?;
        assert!(text.contains("Loading data into SNOWFLAKE.RAW.CIGNA_TABLE"));
        assert!(text.contains("Total records: 2"));
        assert!(text.contains("claim_amount"));
        assert!(text.contains("201"));
        assert!(text.contains("99.5"));
        assert!(text.contains("Load completed successfully."));
        Ok(())
    }

    #[test]
    fn emitting_twice_writes_twice() -> anyhow::Result<()> {
        let mut sink = ConsoleSink::new(DestinationMap::default(), Vec::new());
        sink.emit("RAW.T", &sample())?;
        sink.emit("RAW.T", &sample())?;
        let text = String::from_utf8(sink.into_inner())?;
        assert_eq!(text.matches("Loading data into RAW.T").count(), 2);
        Ok(())
    }

    #[test]
    fn resolve_fails_for_unmapped_payer() {
        let sink = ConsoleSink::new(
            DestinationMap::from_entries([(Payer::Manual, "RAW.GENERIC")]),
            Vec::new(),
        );
        assert!(matches!(
            sink.resolve(Payer::Anthem),
            Err(LoaderError::UnknownPayer(_))
        ));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_failure_is_a_sink_error() {
        let mut sink = ConsoleSink::new(DestinationMap::default(), BrokenPipe);
        let err = sink.emit("RAW.T", &sample()).unwrap_err();
        assert!(matches!(err, LoaderError::Sink(SinkError::Io(_))));
    }
}
