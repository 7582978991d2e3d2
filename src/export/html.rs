//! HTML rendering of the summary for rich-text paste targets. Styling is
//! inline so the table survives email clients and report editors that strip
//! stylesheets.

use std::fmt::Write as _;

use crate::export::table::{SummaryRow, HEADER};

const TABLE_STYLE: &str =
    "border-collapse: collapse; font-family: sans-serif; border: 1px solid #ddd;";
const HEADER_STYLE: &str = "background-color: #f2f2f2; font-weight: bold; padding: 8px; \
                            border: 1px solid #ddd; text-align: left;";
const LABEL_STYLE: &str = "font-weight: bold; padding: 8px; border: 1px solid #ddd;";
const CELL_STYLE: &str = "padding: 8px; border: 1px solid #ddd;";

pub fn render_html_table(rows: &[SummaryRow]) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<table border=\"1\" cellpadding=\"5\" cellspacing=\"0\" style=\"{}\">",
        TABLE_STYLE
    );

    html.push_str("<thead><tr>");
    for header in HEADER {
        let _ = write!(
            html,
            "<th style=\"{}\">{}</th>",
            HEADER_STYLE,
            escape(header)
        );
    }
    html.push_str("</tr></thead><tbody>");

    for row in rows {
        html.push_str("<tr>");
        for (index, cell) in row.cells().iter().enumerate() {
            let style = if index == 0 { LABEL_STYLE } else { CELL_STYLE };
            let _ = write!(html, "<td style=\"{}\">{}</td>", style, escape(cell));
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table>");
    html
}

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
