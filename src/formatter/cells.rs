//! Conversion between JSON values and CSV cell text

use crate::formatter::quotes::CsvQuoter;
use serde_json::{Number, Value};

/// Integral floats below 2^63 fit an i64 exactly
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
/// Integral floats below 2^64 fit a u64 exactly
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

/// Render a JSON value as one escaped CSV cell.
///
/// Null is an empty cell; scalars print the way JavaScript prints them.
/// Arrays and objects (left over when not flattening) become compact JSON.
pub fn value_to_cell(value: &Value, quoter: &CsvQuoter) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => quoter.format(s),
        Value::Array(_) | Value::Object(_) => quoter.format(&value.to_string()),
    }
}

/// Number text without a trailing `.0` on integral floats
pub fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) => float_to_string(f),
        None => n.to_string(),
    }
}

fn float_to_string(f: f64) -> String {
    if f == 0.0 {
        // also covers -0
        return "0".to_string();
    }

    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", f);
    }

    // Exponent form, with an explicit sign on positive exponents
    let formatted = format!("{:e}", f);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => formatted,
    }
}

/// Infer a JSON value from a raw CSV cell.
///
/// Priority: empty → null, `true`/`false` → boolean, numeric text → number,
/// text wrapped in double quotes → unwrapped string, anything else → string.
/// Numeric text that overflows to infinity has no JSON number and becomes null.
pub fn coerce_cell(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    match cell {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Some(number) = parse_number(cell) {
        return number_value(number);
    }
    if cell.len() >= 2 && cell.starts_with('"') && cell.ends_with('"') {
        return Value::String(cell[1..cell.len() - 1].replace("\"\"", "\""));
    }
    Value::String(cell.to_string())
}

/// Parse trimmed cell text as a number.
///
/// Accepts decimal and exponent forms, unsigned `0x`/`0o`/`0b` integers and
/// the exact spellings `Infinity`, `+Infinity` and `-Infinity`. Literals too
/// large for f64 parse as infinity. NaN is never a number.
pub fn parse_number(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = lower.strip_prefix(prefix) {
            if digits.is_empty() || digits.starts_with('+') {
                return None;
            }
            return u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
        }
    }

    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    // Rust also reads "inf" and "nan" spellings; those stay text
    if lower.contains("inf") || lower.contains("nan") {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|f| !f.is_nan())
}

/// Integral values become JSON integers, everything else a float.
/// Infinities have no JSON form and become null.
fn number_value(f: f64) -> Value {
    if !f.is_finite() {
        return Value::Null;
    }
    if f.fract() == 0.0 {
        if f.abs() < I64_BOUND {
            return Value::from(f as i64);
        }
        if f > 0.0 && f < U64_BOUND {
            return Value::from(f as u64);
        }
    }
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}
