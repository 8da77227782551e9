//! Data module - CSV loading, editing and export

mod dialect;
mod exporter;
mod loader;
mod table;

pub use dialect::{Delimiter, DelimiterChoice, LineEnding};
pub use exporter::{CsvExporter, ExportError, ExportOptions, DEFAULT_EXPORT_NAME};
pub use loader::{CsvLoader, LoadOptions, LoadedFile, LoaderError};
pub use table::{CsvTable, TableError};
