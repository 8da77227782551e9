//! CSV Data Loader Module
//! Handles file reading, text decoding and CSV parsing into a `CsvTable`.

use super::{CsvTable, Delimiter, DelimiterChoice};
use encoding_rs::{Encoding, WINDOWS_1252};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV parse error at line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("File contains no CSV data")]
    Empty,
}

/// Lines inspected when sniffing the delimiter.
const SNIFF_LINES: usize = 5;

/// Options for reading a CSV file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub delimiter: DelimiterChoice,
}

/// A successfully parsed file.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: Option<PathBuf>,
    pub table: CsvTable,
    pub delimiter: Delimiter,
    pub encoding: &'static str,
}

/// Reads CSV text with the `csv` crate, first record as headers.
pub struct CsvLoader;

impl CsvLoader {
    /// Load a CSV file from disk.
    pub fn load_path(path: &Path, options: LoadOptions) -> Result<LoadedFile, LoaderError> {
        let bytes = std::fs::read(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut loaded = Self::load_bytes(&bytes, Some(path), options)?;
        loaded.path = Some(path.to_path_buf());
        Ok(loaded)
    }

    /// Load CSV from raw bytes, e.g. a dropped file without a path.
    ///
    /// `name` is only used to pick a delimiter from the extension.
    pub fn load_bytes(
        bytes: &[u8],
        name: Option<&Path>,
        options: LoadOptions,
    ) -> Result<LoadedFile, LoaderError> {
        let (text, encoding) = Self::decode(bytes);

        let delimiter = options
            .delimiter
            .fixed()
            .or_else(|| name.and_then(Delimiter::from_path))
            .unwrap_or_else(|| Self::detect_delimiter(&text));

        let table = Self::parse_str(&text, delimiter)?;

        tracing::info!(
            rows = table.row_count(),
            columns = table.column_count(),
            %delimiter,
            encoding = encoding.name(),
            "Parsed CSV"
        );

        Ok(LoadedFile {
            path: None,
            table,
            delimiter,
            encoding: encoding.name(),
        })
    }

    /// Decode file bytes to text.
    ///
    /// A BOM decides the encoding when present. Otherwise valid UTF-8 is
    /// taken as is and anything else is read as Windows-1252.
    pub fn decode(bytes: &[u8]) -> (String, &'static Encoding) {
        if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
            let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
            return (text.into_owned(), encoding);
        }

        match std::str::from_utf8(bytes) {
            Ok(text) => (text.to_string(), encoding_rs::UTF_8),
            Err(_) => {
                tracing::debug!("Input is not UTF-8, decoding as Windows-1252");
                let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
                (text.into_owned(), WINDOWS_1252)
            }
        }
    }

    /// Pick the most frequent candidate delimiter in the first lines.
    ///
    /// Characters inside double-quoted fields are not counted, and a quoted
    /// line break does not end a line. Comma wins ties and is the fallback
    /// when no candidate appears.
    pub fn detect_delimiter(text: &str) -> Delimiter {
        let mut counts = [0usize; Delimiter::ALL.len()];
        let mut in_quotes = false;
        let mut lines = 0;

        for ch in text.chars() {
            match ch {
                '"' => in_quotes = !in_quotes,
                _ if in_quotes => {}
                '\n' => {
                    lines += 1;
                    if lines == SNIFF_LINES {
                        break;
                    }
                }
                _ => {
                    if let Some(i) = Delimiter::ALL.iter().position(|d| d.as_char() == ch) {
                        counts[i] += 1;
                    }
                }
            }
        }

        let mut best = 0;
        for (i, &n) in counts.iter().enumerate().skip(1) {
            if n > counts[best] {
                best = i;
            }
        }
        Delimiter::ALL[best]
    }

    /// Parse CSV text into a table.
    ///
    /// Rows keep the width they have in the source; blank lines are skipped.
    pub fn parse_str(text: &str, delimiter: Delimiter) -> Result<CsvTable, LoaderError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter.as_byte())
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records: Vec<Vec<String>> = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|source| LoaderError::Csv {
                line: source
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(index as u64 + 1),
                source,
            })?;
            records.push(record.iter().map(str::to_string).collect());
        }

        if records.is_empty() {
            return Err(LoaderError::Empty);
        }

        Ok(CsvTable::from_records(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_simple_csv() {
        let table = CsvLoader::parse_str("a,b,c\n1,2,3\n4,5,6\n", Delimiter::Comma).unwrap();
        assert_eq!(table.headers(), strings(&["a", "b", "c"]).as_slice());
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(1, 2), Some("6"));
    }

    #[test]
    fn test_parse_quoted_fields() {
        let content = "name,note\n\"Smith, J\",\"said \"\"hi\"\"\"\n\"multi\nline\",x\n";
        let table = CsvLoader::parse_str(content, Delimiter::Comma).unwrap();
        assert_eq!(table.cell(0, 0), Some("Smith, J"));
        assert_eq!(table.cell(0, 1), Some("said \"hi\""));
        assert_eq!(table.cell(1, 0), Some("multi\nline"));
    }

    #[test]
    fn test_parse_ragged_rows_pass_through() {
        let table = CsvLoader::parse_str("a,b,c\n1,2\n1,2,3,4\n", Delimiter::Comma).unwrap();
        assert_eq!(table.row(0).map(<[String]>::len), Some(2));
        assert_eq!(table.row(1).map(<[String]>::len), Some(4));
        assert_eq!(table.ragged_rows(), vec![0, 1]);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let table = CsvLoader::parse_str("a,b\n\n1,2\n\n", Delimiter::Comma).unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let table = CsvLoader::parse_str("a,b\r\n1,2", Delimiter::Comma).unwrap();
        assert_eq!(table.row(0), Some(strings(&["1", "2"]).as_slice()));
    }

    #[test]
    fn test_parse_header_only() {
        let table = CsvLoader::parse_str("a,b\n", Delimiter::Comma).unwrap();
        assert_eq!(table.column_count(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert!(matches!(
            CsvLoader::parse_str("", Delimiter::Comma),
            Err(LoaderError::Empty)
        ));
        assert!(matches!(
            CsvLoader::parse_str("\n\n", Delimiter::Comma),
            Err(LoaderError::Empty)
        ));
    }

    #[test]
    fn test_parse_semicolon() {
        let table = CsvLoader::parse_str("a;b\n1,5;2\n", Delimiter::Semicolon).unwrap();
        assert_eq!(table.cell(0, 0), Some("1,5"));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(CsvLoader::detect_delimiter("a,b,c\n1,2,3\n"), Delimiter::Comma);
        assert_eq!(CsvLoader::detect_delimiter("a\tb\tc\n1\t2\t3\n"), Delimiter::Tab);
        assert_eq!(CsvLoader::detect_delimiter("a;b;c\n1;2;3\n"), Delimiter::Semicolon);
        assert_eq!(CsvLoader::detect_delimiter("a|b|c\n1|2|3\n"), Delimiter::Pipe);
    }

    #[test]
    fn test_detect_delimiter_fallback_and_ties() {
        assert_eq!(CsvLoader::detect_delimiter("single\ncolumn\n"), Delimiter::Comma);
        assert_eq!(CsvLoader::detect_delimiter("a,b;c\n"), Delimiter::Comma);
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted_text() {
        assert_eq!(
            CsvLoader::detect_delimiter("a;b\n\"x,y,z,w\";1\n"),
            Delimiter::Semicolon
        );
        assert_eq!(
            CsvLoader::detect_delimiter("a\tb\n\"one\ntwo,three,four\"\t1\n"),
            Delimiter::Tab
        );
    }

    #[test]
    fn test_detect_delimiter_reads_only_first_lines() {
        let text = "a;b\n1;2\n3;4\n5;6\n7;8\n9,9,9,9,9,9,9,9,9,9,9\n";
        assert_eq!(CsvLoader::detect_delimiter(text), Delimiter::Semicolon);
    }

    #[test]
    fn test_decode_utf8_bom_stripped() {
        let (text, encoding) = CsvLoader::decode(b"\xEF\xBB\xBFname\nx\n");
        assert_eq!(text, "name\nx\n");
        assert_eq!(encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn test_decode_utf16le_bom() {
        let bytes = [0xFF, 0xFE, b'a', 0x00, b',', 0x00, b'b', 0x00];
        let (text, encoding) = CsvLoader::decode(&bytes);
        assert_eq!(text, "a,b");
        assert_eq!(encoding, encoding_rs::UTF_16LE);
    }

    #[test]
    fn test_decode_latin1_fallback() {
        let (text, encoding) = CsvLoader::decode(b"caf\xE9,1\n");
        assert_eq!(text, "café,1\n");
        assert_eq!(encoding, WINDOWS_1252);
    }

    #[test]
    fn test_load_path_uses_extension_delimiter() {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        write!(file, "a,b\tc\n1,2\t3\n").unwrap();

        let loaded = CsvLoader::load_path(file.path(), LoadOptions::default()).unwrap();
        assert_eq!(loaded.delimiter, Delimiter::Tab);
        assert_eq!(loaded.table.headers(), strings(&["a,b", "c"]).as_slice());
        assert_eq!(loaded.path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_load_path_forced_delimiter_wins() {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        write!(file, "a,b\tc\n").unwrap();

        let options = LoadOptions {
            delimiter: DelimiterChoice::Comma,
        };
        let loaded = CsvLoader::load_path(file.path(), options).unwrap();
        assert_eq!(loaded.table.headers(), strings(&["a", "b\tc"]).as_slice());
    }

    #[test]
    fn test_load_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        assert!(matches!(
            CsvLoader::load_path(&missing, LoadOptions::default()),
            Err(LoaderError::Io { .. })
        ));
    }
}
