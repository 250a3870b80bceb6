//! ASCII report writer.
//!
//! A report is a block of `#`-prefixed header lines (input counts,
//! search dimensions, timing) followed by ranked result lines. Each
//! result line carries the score, the box and independent convention
//! number ids, and both string encodings:
//!
//! ```text
//! # boxKeyPGs count: 7
//! # ...
//! 0.000000000 1070507050500 1070507050500  '+++ 012 +++ 012 012 0' '+++ 012 +++ 012 012 0'
//! ```

use std::io::Write;

use oriconv_core::{ConNumId, Convention, ConventionString, Real};

/// One ranked output line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRow {
    pub score: Real,
    pub box_id: ConNumId,
    pub ind_id: ConNumId,
}

/// String encoding of a convention id, or a placeholder for ids that
/// do not decode (e.g. the mixed-convention marker `-1`).
fn encoding_for(con_id: ConNumId) -> String {
    match Convention::from_number(con_id) {
        Some(convention) => ConventionString::from_convention(&convention).string_encoding(),
        None => "?".to_string(),
    }
}

/// Write `#`-prefixed header lines.
pub fn write_header<W: Write>(writer: &mut W, lines: &[String]) -> std::io::Result<()> {
    writeln!(writer, "#")?;
    for line in lines {
        writeln!(writer, "# {line}")?;
    }
    writeln!(writer, "#")
}

/// Write ranked rows. `total` is the full result count; callers pass
/// an already-capped slice when truncating large result sets.
pub fn write_rows<W: Write>(
    writer: &mut W,
    rows: &[ReportRow],
    total: usize,
) -> std::io::Result<()> {
    writeln!(writer, "# Results - showing {} of {}", rows.len(), total)?;
    for row in rows {
        writeln!(
            writer,
            "{:.9} {} {}  '{}' '{}'",
            row.score,
            row.box_id,
            row.ind_id,
            encoding_for(row.box_id),
            encoding_for(row.ind_id)
        )?;
    }
    writeln!(writer, "#")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lines_are_comment_prefixed() {
        let mut buffer = Vec::new();
        write_header(&mut buffer, &["boxKeyPGs count: 7".to_string()]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.lines().all(|line| line.starts_with('#')));
        assert!(text.contains("# boxKeyPGs count: 7"));
    }

    #[test]
    fn rows_carry_ids_and_encodings() {
        let rows = [ReportRow {
            score: 0.125,
            box_id: 1_070_507_050_500,
            ind_id: 1_070_507_050_501,
        }];
        let mut buffer = Vec::new();
        write_rows(&mut buffer, &rows, 1).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("0.125000000 1070507050500 1070507050501"));
        assert!(text.contains("'+++ 012 +++ 012 012 0' '+++ 012 +++ 012 012 1'"));
    }

    #[test]
    fn truncated_listing_reports_totals() {
        let row = ReportRow {
            score: 1.0,
            box_id: -1,
            ind_id: -1,
        };
        let rows = [row; 2];
        let mut buffer = Vec::new();
        write_rows(&mut buffer, &rows, 5).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("showing 2 of 5"));
        assert_eq!(text.matches("'?' '?'").count(), 2);
    }
}
