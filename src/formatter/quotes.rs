//! CSV cell quoting
//!
//! A cell is wrapped in double quotes only when it contains the delimiter,
//! a double quote or a newline. Embedded double quotes are doubled.

/// Quoting engine for CSV cells
#[derive(Debug, Clone, Copy)]
pub struct CsvQuoter {
    delimiter: char,
}

impl CsvQuoter {
    /// Create a new quoter for the specified delimiter
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Determine if a cell needs quoting
    pub fn needs_quoting(&self, value: &str) -> bool {
        value
            .chars()
            .any(|ch| ch == self.delimiter || ch == '"' || ch == '\n')
    }

    /// Wrap in quotes, doubling embedded quotes
    pub fn quote(&self, value: &str) -> String {
        let mut result = String::with_capacity(value.len() + 2);
        result.push('"');
        for ch in value.chars() {
            if ch == '"' {
                result.push('"');
            }
            result.push(ch);
        }
        result.push('"');
        result
    }

    /// Quote only when necessary
    pub fn format(&self, value: &str) -> String {
        if self.needs_quoting(value) {
            self.quote(value)
        } else {
            value.to_string()
        }
    }
}

/// Convenience function to escape a single cell
pub fn escape_cell(value: &str, delimiter: char) -> String {
    CsvQuoter::new(delimiter).format(value)
}
