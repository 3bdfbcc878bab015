//! Flattening of nested objects into dotted-path keys
//!
//! `{"a": {"b": 1}}` becomes `{"a.b": 1}`. Only objects are descended into;
//! arrays and scalars are leaves. When two paths collide the key keeps its
//! first position and takes the last value.

use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use serde_json::{Map, Value};

/// Flatten a record, failing if nesting goes deeper than `max_depth`
pub fn flatten_object(
    obj: &Map<String, Value>,
    max_depth: Option<usize>,
) -> ConversionResult<Map<String, Value>> {
    let mut flattened = Map::new();
    flatten_into(obj, "", 0, max_depth, &mut flattened)?;
    Ok(flattened)
}

/// Dotted keys of a record in flattening order
pub fn flattened_keys(
    obj: &Map<String, Value>,
    max_depth: Option<usize>,
) -> ConversionResult<Vec<String>> {
    Ok(flatten_object(obj, max_depth)?.into_iter().map(|(k, _)| k).collect())
}

fn flatten_into(
    obj: &Map<String, Value>,
    prefix: &str,
    depth: usize,
    max_depth: Option<usize>,
    out: &mut Map<String, Value>,
) -> ConversionResult<()> {
    for (key, value) in obj {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Object(nested) => {
                if let Some(limit) = max_depth {
                    if depth + 1 > limit {
                        return Err(ConversionError::conversion(
                            ConversionErrorKind::MaxDepthExceeded {
                                path: full_key,
                                limit,
                            },
                        ));
                    }
                }
                flatten_into(nested, &full_key, depth + 1, max_depth, out)?;
            }
            leaf => {
                out.insert(full_key, leaf.clone());
            }
        }
    }

    Ok(())
}
