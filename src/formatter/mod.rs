//! Directional transforms between JSON records and tabular CSV data

pub mod cells;
pub mod columns;
pub mod flatten;
pub mod quotes;
pub mod table;

pub use cells::{coerce_cell, value_to_cell};
pub use columns::ColumnSet;
pub use flatten::{flatten_object, flattened_keys};
pub use quotes::{escape_cell, CsvQuoter};
pub use table::TabularData;

use crate::conversion::{ConversionConfig, ConversionResult};
use crate::error::{ConversionError, ConversionErrorKind};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Build the CSV table for a JSON array.
///
/// Objects are records, and so are arrays, keyed by element index.
/// Scalars and null are skipped. An empty array yields an empty table,
/// without a header row.
pub fn json_to_csv(records: &[Value], config: &ConversionConfig) -> ConversionResult<TabularData> {
    if records.is_empty() {
        return Ok(TabularData::default());
    }

    let objects = records
        .iter()
        .filter_map(as_record)
        .map(|record| prepare_record(record, config))
        .collect::<ConversionResult<Vec<_>>>()?;

    let skipped = records.len() - objects.len();
    if skipped > 0 {
        tracing::debug!(skipped, "skipping scalar array elements");
    }

    let columns = match &config.fields {
        Some(fields) => ColumnSet::explicit(fields),
        None => ColumnSet::discover(objects.iter().map(|record| &**record)),
    };

    let quoter = CsvQuoter::new(config.delimiter);
    let mut table = TabularData::with_header(columns.names().to_vec());
    for record in &objects {
        let row = columns
            .names()
            .iter()
            .map(|column| {
                record
                    .get(column)
                    .map_or_else(String::new, |value| value_to_cell(value, &quoter))
            })
            .collect();
        table.push_row(row);
    }

    Ok(table)
}

/// Whether an array element is converted into a row
pub fn is_record(value: &Value) -> bool {
    value.is_object() || value.is_array()
}

fn as_record(value: &Value) -> Option<Cow<'_, Map<String, Value>>> {
    match value {
        Value::Object(obj) => Some(Cow::Borrowed(obj)),
        Value::Array(items) => Some(Cow::Owned(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), item.clone()))
                .collect(),
        )),
        _ => None,
    }
}

fn prepare_record<'a>(
    record: Cow<'a, Map<String, Value>>,
    config: &ConversionConfig,
) -> ConversionResult<Cow<'a, Map<String, Value>>> {
    if config.flatten {
        flatten_object(&record, config.max_depth).map(Cow::Owned)
    } else {
        Ok(record)
    }
}

/// Build one JSON object per data row, keyed by the header.
///
/// Short rows leave their trailing keys out; cells past the header are ignored.
pub fn csv_to_json(table: &TabularData) -> Vec<Value> {
    let Some(header) = table.header() else {
        return Vec::new();
    };

    table
        .data_rows()
        .iter()
        .map(|row| {
            let mut obj = Map::new();
            for (name, cell) in header.iter().zip(row) {
                obj.insert(name.clone(), coerce_cell(cell));
            }
            Value::Object(obj)
        })
        .collect()
}

/// Serialize records as a JSON array
pub fn format_json(records: Vec<Value>, pretty: bool) -> ConversionResult<String> {
    let array = Value::Array(records);
    let result = if pretty {
        serde_json::to_string_pretty(&array)
    } else {
        serde_json::to_string(&array)
    };

    result.map_err(|e| {
        ConversionError::conversion(ConversionErrorKind::ConversionFailed {
            message: format!("Failed to serialize JSON: {}", e),
        })
    })
}
