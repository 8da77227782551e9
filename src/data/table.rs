//! CSV Table Module
//! In-memory edit model: headers plus rows of string cells.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    #[error("Row {row} out of range ({len} rows)")]
    RowOutOfRange { row: usize, len: usize },
    #[error("Cell ({row}, {col}) out of range (row has {len} cells)")]
    CellOutOfRange { row: usize, col: usize, len: usize },
}

/// Parsed CSV held as plain strings.
///
/// The first record of the source becomes `headers`; every following record
/// is a row. Rows are expected to be as wide as the headers, but short and
/// long rows from malformed input are kept exactly as parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    modified: bool,
}

impl CsvTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers,
            rows,
            modified: false,
        }
    }

    /// Build a table from parsed records, first record as headers.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut records = records.into_iter();
        let headers = records.next().unwrap_or_default();
        Self::new(headers, records.collect())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    #[cfg(test)]
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns, taken from the headers.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// True when there are no data rows (headers may still be present).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace the value of one existing cell.
    pub fn set_cell(
        &mut self,
        row: usize,
        col: usize,
        value: impl Into<String>,
    ) -> Result<(), TableError> {
        let len = self.rows.len();
        let cells = self
            .rows
            .get_mut(row)
            .ok_or(TableError::RowOutOfRange { row, len })?;
        let width = cells.len();
        let cell = cells.get_mut(col).ok_or(TableError::CellOutOfRange {
            row,
            col,
            len: width,
        })?;

        let value = value.into();
        if *cell != value {
            *cell = value;
            self.modified = true;
        }
        Ok(())
    }

    /// Append a blank row as wide as the headers. Returns its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(vec![String::new(); self.column_count()]);
        self.modified = true;
        self.rows.len() - 1
    }

    /// Remove a row; later rows shift up by one.
    pub fn delete_row(&mut self, row: usize) -> Result<Vec<String>, TableError> {
        if row >= self.rows.len() {
            return Err(TableError::RowOutOfRange {
                row,
                len: self.rows.len(),
            });
        }
        self.modified = true;
        Ok(self.rows.remove(row))
    }

    /// Indices of rows whose width differs from the header count.
    pub fn ragged_rows(&self) -> Vec<usize> {
        let width = self.column_count();
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, cells)| cells.len() != width)
            .map(|(i, _)| i)
            .collect()
    }

    /// Headers followed by every row, in order. An empty table has no records.
    pub fn records(&self) -> impl Iterator<Item = &[String]> {
        let has_records = !self.headers.is_empty() || !self.rows.is_empty();
        has_records
            .then_some(self.headers.as_slice())
            .into_iter()
            .chain(self.rows.iter().map(Vec::as_slice))
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> CsvTable {
        CsvTable::from_records(vec![
            strings(&["name", "age", "city"]),
            strings(&["Ann", "31", "Oslo"]),
            strings(&["Bob", "42", "Rome"]),
            strings(&["Cy", "27", "Lima"]),
        ])
    }

    #[test]
    fn test_from_records_splits_headers() {
        let table = sample();
        assert_eq!(table.headers(), strings(&["name", "age", "city"]).as_slice());
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.cell(1, 2), Some("Rome"));
        assert!(!table.is_modified());
    }

    #[test]
    fn test_from_no_records() {
        let table = CsvTable::from_records(Vec::<Vec<String>>::new());
        assert!(table.headers().is_empty());
        assert!(table.is_empty());
        assert_eq!(table.records().count(), 0);
    }

    #[test]
    fn test_records_of_empty_input_are_empty() {
        let input: Vec<Vec<String>> = Vec::new();
        let table = CsvTable::from_records(input.clone());
        let output: Vec<Vec<String>> = table.records().map(<[String]>::to_vec).collect();
        assert_eq!(output, input);
    }

    #[test]
    fn test_records_keep_empty_header_before_rows() {
        let input = vec![Vec::new(), strings(&["x"])];
        let table = CsvTable::from_records(input.clone());
        let output: Vec<Vec<String>> = table.records().map(<[String]>::to_vec).collect();
        assert_eq!(output, input);
    }

    #[test]
    fn test_header_only_table() {
        let table = CsvTable::from_records(vec![strings(&["a", "b"])]);
        assert_eq!(table.column_count(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_set_cell_touches_only_target() {
        let mut table = sample();
        let before = table.clone();

        table.set_cell(1, 0, "Bea").unwrap();

        assert_eq!(table.cell(1, 0), Some("Bea"));
        for row in 0..table.row_count() {
            for col in 0..table.column_count() {
                if (row, col) != (1, 0) {
                    assert_eq!(table.cell(row, col), before.cell(row, col));
                }
            }
        }
        assert!(table.is_modified());
    }

    #[test]
    fn test_set_cell_same_value_is_not_a_modification() {
        let mut table = sample();
        table.set_cell(0, 0, "Ann").unwrap();
        assert!(!table.is_modified());
    }

    #[test]
    fn test_set_cell_out_of_range() {
        let mut table = sample();
        assert_eq!(
            table.set_cell(9, 0, "x"),
            Err(TableError::RowOutOfRange { row: 9, len: 3 })
        );
        assert_eq!(
            table.set_cell(0, 3, "x"),
            Err(TableError::CellOutOfRange {
                row: 0,
                col: 3,
                len: 3
            })
        );
    }

    #[test]
    fn test_short_row_cells_beyond_width_not_editable() {
        let mut table = CsvTable::from_records(vec![strings(&["a", "b", "c"]), strings(&["1"])]);
        assert!(table.set_cell(0, 0, "one").is_ok());
        assert!(matches!(
            table.set_cell(0, 1, "two"),
            Err(TableError::CellOutOfRange { len: 1, .. })
        ));
        assert_eq!(table.row(0), Some(strings(&["one"]).as_slice()));
    }

    #[test]
    fn test_add_row_is_blank_and_header_wide() {
        let mut table = sample();
        let idx = table.add_row();
        assert_eq!(idx, 3);
        assert_eq!(table.row(3), Some(strings(&["", "", ""]).as_slice()));
        assert!(table.is_modified());
    }

    #[test]
    fn test_add_row_without_headers() {
        let mut table = CsvTable::default();
        table.add_row();
        assert_eq!(table.row(0).map(<[String]>::len), Some(0));
    }

    #[test]
    fn test_delete_row_shifts_later_rows() {
        let mut table = sample();
        let removed = table.delete_row(0).unwrap();
        assert_eq!(removed, strings(&["Ann", "31", "Oslo"]));
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, 0), Some("Bob"));
        assert_eq!(table.cell(1, 0), Some("Cy"));
    }

    #[test]
    fn test_delete_row_out_of_range() {
        let mut table = sample();
        assert_eq!(
            table.delete_row(3),
            Err(TableError::RowOutOfRange { row: 3, len: 3 })
        );
        assert!(!table.is_modified());
    }

    #[test]
    fn test_ragged_rows_reported_not_fixed() {
        let table = CsvTable::from_records(vec![
            strings(&["a", "b"]),
            strings(&["1", "2"]),
            strings(&["3"]),
            strings(&["4", "5", "6"]),
        ]);
        assert_eq!(table.ragged_rows(), vec![1, 2]);
        assert_eq!(table.row(1).map(<[String]>::len), Some(1));
        assert_eq!(table.row(2).map(<[String]>::len), Some(3));
    }

    #[test]
    fn test_records_returns_input_unchanged() {
        let input = vec![
            strings(&["h1", "h2"]),
            strings(&["x", "y"]),
            strings(&["z"]),
        ];
        let table = CsvTable::from_records(input.clone());
        let output: Vec<Vec<String>> = table.records().map(<[String]>::to_vec).collect();
        assert_eq!(output, input);
    }

    #[test]
    fn test_mark_saved_clears_modified() {
        let mut table = sample();
        table.add_row();
        table.mark_saved();
        assert!(!table.is_modified());
    }
}
