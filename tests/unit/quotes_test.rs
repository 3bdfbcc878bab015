use tabconv::formatter::{escape_cell, CsvQuoter};
use tabconv::parse_csv_line;

#[test]
fn test_quote_only_when_needed() {
    let quoter = CsvQuoter::new(',');

    assert!(!quoter.needs_quoting(""));
    assert!(!quoter.needs_quoting("hello world"));
    assert!(!quoter.needs_quoting("a;b"));
    assert!(!quoter.needs_quoting(" padded "));

    assert!(quoter.needs_quoting("a,b"));
    assert!(quoter.needs_quoting("say \"hi\""));
    assert!(quoter.needs_quoting("two\nlines"));
}

#[test]
fn test_quoting_follows_delimiter() {
    assert_eq!(escape_cell("a,b", ','), "\"a,b\"");
    assert_eq!(escape_cell("a,b", ';'), "a,b");
    assert_eq!(escape_cell("a;b", ';'), "\"a;b\"");
    assert_eq!(escape_cell("a\tb", '\t'), "\"a\tb\"");
    assert_eq!(escape_cell("a|b", '|'), "\"a|b\"");
}

#[test]
fn test_embedded_quotes_doubled() {
    assert_eq!(
        escape_cell(r#"He said "hi", ok"#, ','),
        r#""He said ""hi"", ok""#
    );
    assert_eq!(escape_cell("\"", ','), "\"\"\"\"");
}

#[test]
fn test_escaped_cell_parses_back() {
    let samples = [
        "plain",
        "a,b",
        r#"He said "hi", ok"#,
        r#""quoted""#,
        "",
        "trailing,",
    ];

    for sample in samples {
        let line = format!("{},{}", escape_cell(sample, ','), escape_cell("next", ','));
        assert_eq!(parse_csv_line(&line, ','), vec![sample, "next"], "{}", line);
    }
}
