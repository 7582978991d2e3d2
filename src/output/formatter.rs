//! Stdout rendering of the summary table for `--print` mode, so a finished
//! form can be piped into other tooling after the TUI exits.

use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::export::table::{SummaryRow, HEADER};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format the summary as a column-aligned text table.
pub fn format_summary_table(rows: &[SummaryRow], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No measurements entered.".to_string();
    }

    let label_cap = label_column_cap();
    let mut widths = [0usize; 4];
    for (i, header) in HEADER.iter().enumerate() {
        widths[i] = display_width(header);
    }
    let truncated: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            let cells = row.cells();
            [
                truncate(cells[0], label_cap),
                cells[1].to_string(),
                cells[2].to_string(),
                cells[3].to_string(),
            ]
        })
        .collect();
    for cells in &truncated {
        for (i, cell) in cells.iter().enumerate() {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    let mut out = String::new();
    out.push_str(&format_line(
        &[HEADER[0], HEADER[1], HEADER[2], HEADER[3]],
        &widths,
        use_colors,
        true,
    ));
    out.push('\n');
    let rule_len = widths.iter().sum::<usize>() + 3 * 2;
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    for cells in &truncated {
        let refs = [
            cells[0].as_str(),
            cells[1].as_str(),
            cells[2].as_str(),
            cells[3].as_str(),
        ];
        out.push_str(&format_line(&refs, &widths, use_colors, false));
        out.push('\n');
    }
    out
}

fn format_line(cells: &[&str; 4], widths: &[usize; 4], use_colors: bool, header: bool) -> String {
    let padded: Vec<String> = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let pad = widths[i].saturating_sub(display_width(cell));
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();

    if use_colors {
        if header {
            padded
                .iter()
                .map(|cell| cell.bold().to_string())
                .collect::<Vec<_>>()
                .join("  ")
        } else {
            format!(
                "{}  {}  {}  {}",
                padded[0].bold(),
                padded[1],
                padded[2],
                padded[3].dimmed()
            )
        }
    } else {
        padded.join("  ")
    }
}

/// Column width in characters; the degree and comparison signs are all
/// single-cell.
fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Cap the label column so four columns still fit a narrow terminal.
fn label_column_cap() -> usize {
    match terminal_size() {
        Some((Width(w), _)) if (w as usize) > 40 => (w as usize) / 2,
        _ => 40,
    }
}

fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}
