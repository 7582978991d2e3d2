use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::measure::Side;
use crate::schema::{FieldKind, FieldSpec, SCHEMA};
use crate::tui::app::{App, InputMode};

const LABEL_WIDTH: usize = 28;
const VALUE_WIDTH: usize = 8;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 12 || area.width < 60 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Form(fill) + Info(5) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_form(frame, chunks[1], app);
    render_info(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let left = "Knee Radiographic Parameters";
    let right = format!("{}/{} fields", app.filled_count(), app.input_field_count());
    let padding = (area.width as usize).saturating_sub(left.len() + right.len());

    let title = Line::from(vec![
        Span::styled(left, Style::default().fg(app.colors.title_color).bold()),
        Span::raw(" ".repeat(padding)),
        Span::styled(right, Style::default().fg(app.colors.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_form(frame: &mut Frame, area: Rect, app: &mut App) {
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0u16;
    let mut section = None;

    for (index, spec) in SCHEMA.iter().enumerate() {
        if section != Some(spec.section) {
            if section.is_some() {
                lines.push(Line::raw(""));
            }
            lines.push(Line::from(Span::styled(
                spec.section.title(),
                app.colors.section_title,
            )));
            section = Some(spec.section);
        }
        if index == app.cursor {
            cursor_line = lines.len() as u16;
        }
        lines.push(field_line(app, spec, index == app.cursor));
    }

    // Keep the focused field inside the viewport.
    let height = area.height;
    if cursor_line < app.scroll {
        app.scroll = cursor_line;
    } else if cursor_line >= app.scroll + height {
        app.scroll = cursor_line + 1 - height;
    }

    let form = Paragraph::new(lines).scroll((app.scroll, 0));
    frame.render_widget(form, area);
}

fn field_line(app: &App, spec: &FieldSpec, focused: bool) -> Line<'static> {
    let mut spans = Vec::new();

    spans.push(Span::styled(
        if focused { "\u{25b8} " } else { "  " },
        Style::default().fg(app.colors.cursor),
    ));

    let label = format!("{:<width$}", spec.label, width = LABEL_WIDTH);
    let label_style = if focused {
        Style::default().bold()
    } else {
        Style::default()
    };
    spans.push(Span::styled(label, label_style));

    match spec.kind {
        FieldKind::NumericLr => {
            spans.extend(numeric_cell(app, spec, Side::Right, focused));
            spans.push(Span::raw("  "));
            spans.extend(numeric_cell(app, spec, Side::Left, focused));
        }
        FieldKind::BooleanLr => {
            spans.extend(checkbox_cell(app, spec, Some(Side::Right), focused));
            spans.push(Span::raw("  "));
            spans.extend(checkbox_cell(app, spec, Some(Side::Left), focused));
        }
        FieldKind::BooleanSingle => {
            spans.extend(checkbox_cell(app, spec, None, focused));
        }
        FieldKind::DerivedSingle => {
            let status = app.derived_status(spec.key);
            let mut style = app.colors.status_style(status);
            if focused {
                style = style.bold();
            }
            spans.push(Span::styled(
                format!("= {}", app.derived_display(spec.key)),
                style,
            ));
        }
    }

    if spec.reference != "-" {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("Ref: {}", spec.reference),
            Style::default().fg(app.colors.muted),
        ));
    }

    Line::from(spans)
}

fn numeric_cell(app: &App, spec: &FieldSpec, side: Side, focused: bool) -> Vec<Span<'static>> {
    let active = focused && app.side == side;
    let raw = app.measurements.text(spec.key, side).unwrap_or("");
    let status = app.status_for(spec, side);

    let mut content = raw.to_string();
    if active {
        content.push('\u{258f}');
    }
    let cell = format!("{:<width$}", content, width = VALUE_WIDTH);

    let mut style = app.colors.status_style(status);
    if active {
        style = style.patch(app.colors.selected);
    }

    vec![
        Span::styled(format!("{} [", side_tag(side)), Style::default().fg(app.colors.muted)),
        Span::styled(cell, style),
        Span::styled(
            format!("]{:<2}", spec.unit),
            Style::default().fg(app.colors.muted),
        ),
    ]
}

fn checkbox_cell(
    app: &App,
    spec: &FieldSpec,
    side: Option<Side>,
    focused: bool,
) -> Vec<Span<'static>> {
    let active = focused && side.map(|s| app.side == s).unwrap_or(true);
    let checked = app.measurements.flag(spec.key, side);

    let mark = if checked { "x" } else { " " };
    let mut style = Style::default();
    if active {
        style = style.patch(app.colors.selected);
    }

    let mut spans = Vec::new();
    if let Some(side) = side {
        spans.push(Span::styled(
            format!("{} ", side_tag(side)),
            Style::default().fg(app.colors.muted),
        ));
    }
    spans.push(Span::styled(format!("[{}]", mark), style));
    spans
}

fn side_tag(side: Side) -> &'static str {
    match side {
        Side::Right => "R",
        Side::Left => "L",
    }
}

fn render_info(frame: &mut Frame, area: Rect, app: &App) {
    let spec = app.current_spec();

    let title = match spec.kind {
        FieldKind::NumericLr | FieldKind::BooleanLr => {
            format!(" {} ({}) ", spec.label, app.side.label())
        }
        _ => format!(" {} ", spec.label),
    };
    let block = Block::bordered()
        .title(title)
        .border_style(Style::default().fg(app.colors.info_border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(Span::styled(
        format!("Ref: {}", spec.reference),
        Style::default().fg(app.colors.muted),
    ))];
    lines.push(Line::raw(spec.tooltip));

    let info = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(info, inner);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("No data") {
            app.colors.flash_error
        } else {
            app.colors.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints = [
            ("j/k", ":field "),
            ("h/l", ":side "),
            ("Space", ":toggle "),
            ("Bksp", ":erase "),
            ("c", ":copy "),
            ("w", ":save "),
            ("?", ":help "),
            ("q", ":quit"),
        ];
        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                *key,
                Style::default().fg(app.colors.status_key_color),
            ));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(app.colors.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_help_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(58, 17, frame.area());

    frame.render_widget(Clear, popup_area);
    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .border_style(Style::default().fg(app.colors.popup_border));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(app.colors.status_key_color).bold();
    let help_lines = vec![
        Line::from(vec![
            Span::styled("j / Down       ", key_style),
            Span::raw("Next field"),
        ]),
        Line::from(vec![
            Span::styled("k / Up         ", key_style),
            Span::raw("Previous field"),
        ]),
        Line::from(vec![
            Span::styled("h / Left       ", key_style),
            Span::raw("Right-side column (patient right)"),
        ]),
        Line::from(vec![
            Span::styled("l / Right      ", key_style),
            Span::raw("Left-side column"),
        ]),
        Line::from(vec![
            Span::styled("Tab / BackTab  ", key_style),
            Span::raw("Next / previous section"),
        ]),
        Line::from(vec![
            Span::styled("0-9 . -        ", key_style),
            Span::raw("Type into the focused value"),
        ]),
        Line::from(vec![
            Span::styled("Backspace      ", key_style),
            Span::raw("Delete last character"),
        ]),
        Line::from(vec![
            Span::styled("x / Delete     ", key_style),
            Span::raw("Clear the focused value"),
        ]),
        Line::from(vec![
            Span::styled("Space / Enter  ", key_style),
            Span::raw("Toggle checkbox"),
        ]),
        Line::from(vec![
            Span::styled("c              ", key_style),
            Span::raw("Copy summary to clipboard"),
        ]),
        Line::from(vec![
            Span::styled("w              ", key_style),
            Span::raw("Write summary files (HTML + JSON)"),
        ]),
        Line::from(vec![
            Span::styled("q / Ctrl-c     ", key_style),
            Span::raw("Quit"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(app.colors.muted),
        )),
    ];

    frame.render_widget(Paragraph::new(help_lines), inner);
}
