//! CSV Exporter Module
//! Serializes a `CsvTable` back to CSV text.

use super::{CsvTable, Delimiter, LineEnding};
use std::path::Path;
use thiserror::Error;

/// File name offered by the save dialog unless configured otherwise.
pub const DEFAULT_EXPORT_NAME: &str = "edited_data.csv";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    pub delimiter: Delimiter,
    pub line_ending: LineEnding,
}

/// Writes headers then rows, quoting only where needed. Defaults to comma
/// separated fields and `\r\n` after every record.
pub struct CsvExporter;

impl CsvExporter {
    pub fn to_bytes(table: &CsvTable, options: ExportOptions) -> Result<Vec<u8>, ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter.as_byte())
            .terminator(options.line_ending.terminator())
            .quote_style(csv::QuoteStyle::Necessary)
            .flexible(true)
            .from_writer(Vec::new());

        // A record with no fields would come back as one empty field.
        for record in table.records().filter(|record| !record.is_empty()) {
            writer.write_record(record)?;
        }

        writer
            .into_inner()
            .map_err(|e| ExportError::Io(e.into_error()))
    }

    /// Serialize and write to `path`. Returns the number of bytes written.
    pub fn write_path(
        table: &CsvTable,
        path: &Path,
        options: ExportOptions,
    ) -> Result<usize, ExportError> {
        let bytes = Self::to_bytes(table, options)?;
        std::fs::write(path, &bytes)?;

        tracing::info!(
            path = %path.display(),
            rows = table.row_count(),
            bytes = bytes.len(),
            "Exported CSV"
        );
        Ok(bytes.len())
    }
}
