//! Plain-text rendering of the summary: quoted, tab-separated rows for
//! paste targets that ignore the HTML clipboard flavor (spreadsheets take
//! the tabs, report editors take the quotes off).

use crate::export::table::{SummaryRow, HEADER};

pub fn render_text_table(rows: &[SummaryRow]) -> String {
    let mut out = String::new();
    push_line(&mut out, &HEADER);
    for row in rows {
        push_line(&mut out, &row.cells());
    }
    out
}

fn push_line(out: &mut String, cells: &[&str; 4]) {
    let line = cells
        .iter()
        .map(|cell| quote(cell))
        .collect::<Vec<_>>()
        .join("\t");
    out.push_str(&line);
    out.push('\n');
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str, right: &str, left: &str, reference: &str) -> SummaryRow {
        SummaryRow {
            label: label.to_string(),
            right: right.to_string(),
            left: left.to_string(),
            reference: reference.to_string(),
        }
    }

    #[test]
    fn test_header_always_first() {
        let out = render_text_table(&[]);
        assert_eq!(out, "\"Parameter\"\t\"Rechts\"\t\"Links\"\t\"Referenzbereich\"\n");
    }

    #[test]
    fn test_rows_are_quoted_and_tab_separated() {
        let rows = vec![row("Femoral Torsion (\u{b0})", "23\u{b0}", "-", "~15\u{b0}")];
        let out = render_text_table(&rows);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "\"Femoral Torsion (\u{b0})\"\t\"23\u{b0}\"\t\"-\"\t\"~15\u{b0}\""
        );
    }

    #[test]
    fn test_embedded_quotes_doubled() {
        let rows = vec![row("A \"quoted\" label", "1", "-", "-")];
        let out = render_text_table(&rows);
        assert!(out.contains("\"A \"\"quoted\"\" label\""));
    }

    #[test]
    fn test_every_row_newline_terminated() {
        let rows = vec![row("A", "1", "2", "-"), row("B", "3", "4", "-")];
        let out = render_text_table(&rows);
        assert!(out.ends_with('\n'));
        assert_eq!(out.lines().count(), 3);
    }
}
