//! Row/column text representation shared by both conversion directions

/// Ordered rows of string cells; row 0 is the header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularData {
    rows: Vec<Vec<String>>,
}

impl TabularData {
    /// Build from already-split rows
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Start a table with the given header row
    pub fn with_header(header: Vec<String>) -> Self {
        Self { rows: vec![header] }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// All rows, header included
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows after the header
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn row_count(&self) -> usize {
        self.data_rows().len()
    }

    pub fn column_count(&self) -> usize {
        self.header().map_or(0, |h| h.len())
    }

    /// True when there is not even a header row
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Join cells with the delimiter and rows with `\n`. Cells must already be escaped.
    pub fn render(&self, delimiter: char) -> String {
        let mut sep = [0u8; 4];
        let sep: &str = delimiter.encode_utf8(&mut sep);

        self.rows
            .iter()
            .map(|row| row.join(sep))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
