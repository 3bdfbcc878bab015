//! Shape checks for tabular data
//!
//! Tables produced from JSON must be rectangular. Tables read from CSV may be
//! ragged or repeat a header name; those are reported as warnings since the
//! conversion tolerates them.

use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::formatter::TabularData;
use std::collections::HashSet;

/// Issues found in one table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeReport {
    /// (1-based data row, cell count) for rows whose width differs from the header
    pub ragged_rows: Vec<(usize, usize)>,
    /// Header names that appear more than once
    pub duplicate_headers: Vec<String>,
}

impl ShapeReport {
    pub fn is_rectangular(&self) -> bool {
        self.ragged_rows.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.ragged_rows.is_empty() && self.duplicate_headers.is_empty()
    }
}

/// Table shape validator
pub struct TableValidator {
    /// Fail on ragged rows instead of reporting them
    strict: bool,
}

impl TableValidator {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// Inspect the table; in strict mode a ragged row is an error
    pub fn validate(&self, table: &TabularData) -> ConversionResult<ShapeReport> {
        let mut report = ShapeReport::default();
        let Some(header) = table.header() else {
            return Ok(report);
        };

        let mut seen = HashSet::new();
        for name in header {
            if !seen.insert(name.as_str()) && !report.duplicate_headers.contains(name) {
                report.duplicate_headers.push(name.clone());
            }
        }

        for (index, row) in table.data_rows().iter().enumerate() {
            if row.len() != header.len() {
                report.ragged_rows.push((index + 1, row.len()));
            }
        }

        if self.strict && !report.is_rectangular() {
            let (row, width) = report.ragged_rows[0];
            return Err(ConversionError::conversion(
                ConversionErrorKind::ConversionFailed {
                    message: format!(
                        "row {} has {} cells, header has {}",
                        row,
                        width,
                        header.len()
                    ),
                },
            ));
        }

        Ok(report)
    }
}
