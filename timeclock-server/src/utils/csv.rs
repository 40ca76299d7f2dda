//! CSV export
//!
//! Every field is quoted and embedded quotes doubled, so values
//! containing commas or newlines survive round-trips.

/// Render a CSV document: one header row of human-readable labels
/// followed by one row per record.
pub fn csv_document(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    push_row(&mut out, headers.iter().map(|h| *h));
    for row in rows {
        push_row(&mut out, row.iter().map(|f| f.as_str()));
    }
    out
}

fn push_row<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        first = false;
        out.push('"');
        for c in field.chars() {
            if c == '"' {
                out.push('"');
            }
            out.push(c);
        }
        out.push('"');
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_plus_one_line_per_record() {
        let doc = csv_document(
            &["Date", "Employee"],
            &[
                vec!["2026-03-02".into(), "Ada Lovelace".into()],
                vec!["2026-03-03".into(), "Grace Hopper".into()],
            ],
        );
        let lines: Vec<&str> = doc.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], r#""Date","Employee""#);
        assert_eq!(lines[1], r#""2026-03-02","Ada Lovelace""#);
    }

    #[test]
    fn commas_and_quotes_are_preserved() {
        let doc = csv_document(
            &["Notes"],
            &[vec![r#"left early, said "dentist""#.into()]],
        );
        let lines: Vec<&str> = doc.lines().collect();
        assert_eq!(lines[1], r#""left early, said ""dentist""""#);
    }

    #[test]
    fn empty_rows_yield_header_only() {
        let doc = csv_document(&["A", "B"], &[]);
        assert_eq!(doc.lines().count(), 1);
    }
}
