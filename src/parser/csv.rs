//! Quote-aware CSV line scanner
//!
//! Records are one line each: a quoted field cannot span lines. A line that
//! ends while a quote is still open keeps everything after the quote as the
//! field's content, unless strict quote checking is enabled.

use crate::error::{ParseError, ParseResult};
use crate::formatter::TabularData;

/// Fields of one line, and the column of a quote left open at end of line
struct ScannedLine {
    fields: Vec<String>,
    open_quote_at: Option<usize>,
}

fn scan_line(line: &str, delimiter: char) -> ScannedLine {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut open_quote_at = None;
    let mut chars = line.chars().enumerate().peekable();

    while let Some((column, ch)) = chars.next() {
        if ch == '"' {
            if in_quotes && chars.peek().is_some_and(|&(_, next)| next == '"') {
                // Escaped quote
                current.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
                open_quote_at = in_quotes.then_some(column + 1);
            }
        } else if ch == delimiter && !in_quotes {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);

    ScannedLine {
        fields,
        open_quote_at: if in_quotes { open_quote_at } else { None },
    }
}

/// Split one CSV line into raw field values.
///
/// Quotes toggle quoted state and are not kept; `""` inside quotes is a
/// literal quote; the delimiter only separates fields outside quotes.
pub fn parse_csv_line(line: &str, delimiter: char) -> Vec<String> {
    scan_line(line, delimiter).fields
}

/// Split text into non-blank lines, paired with their 1-based line number.
/// A trailing `\r` is removed so CRLF input reads the same as LF input.
pub fn split_records(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n')
        .enumerate()
        .map(|(index, line)| (index + 1, line.strip_suffix('\r').unwrap_or(line)))
        .filter(|(_, line)| !line.trim().is_empty())
}

/// Parse CSV text into rows of raw cells; row 0 is the header
pub fn parse_csv(text: &str, delimiter: char, strict_quotes: bool) -> ParseResult<TabularData> {
    let mut rows = Vec::new();

    for (line_number, line) in split_records(text) {
        let scanned = scan_line(line, delimiter);
        if strict_quotes {
            if let Some(column) = scanned.open_quote_at {
                return Err(ParseError::csv(
                    "unterminated quoted field".to_string(),
                    Some((line_number, column)),
                )
                .with_preview(line.to_string()));
            }
        }
        rows.push(scanned.fields);
    }

    Ok(TabularData::from_rows(rows))
}
