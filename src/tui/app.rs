use std::path::PathBuf;
use std::time::Instant;

use crate::export::{render_html_table, render_text_table, summary_rows, SummaryRow};
use crate::measure::{
    beighton_total, format_one_decimal, leg_length_difference, MeasurementSet, RangeStatus,
    RangeTable, Side,
};
use crate::schema::{FieldKind, FieldSpec, ParamKey, Section, SCHEMA};
use crate::tui::theme::ThemeColors;

/// Transient messages (and the "copied" indicator) clear after this long.
const FLASH_SECS: u64 = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
}

/// Payload for a pending clipboard write, picked up by the event loop.
pub struct CopyRequest {
    pub html: String,
    pub text: String,
}

/// Payload for a pending file export.
pub struct WriteRequest {
    pub set: MeasurementSet,
    pub rows: Vec<SummaryRow>,
    pub html: String,
}

pub struct App {
    pub measurements: MeasurementSet,
    pub ranges: RangeTable,
    pub colors: ThemeColors,

    /// Index into [`SCHEMA`] of the focused field.
    pub cursor: usize,
    /// Active side for left/right fields.
    pub side: Side,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    /// Scroll offset of the form viewport, maintained by the renderer.
    pub scroll: u16,

    // Derived values, recomputed after every edit.
    pub leg_diff: Option<f64>,
    pub beighton: u8,

    pub pending_copy: Option<CopyRequest>,
    pub pending_write: Option<WriteRequest>,

    pub export_dir: PathBuf,
    pub verbose: bool,
}

impl App {
    pub fn new(
        ranges: RangeTable,
        colors: ThemeColors,
        export_dir: PathBuf,
        verbose: bool,
    ) -> Self {
        let measurements = MeasurementSet::new();
        let leg_diff = leg_length_difference(&measurements);
        let beighton = beighton_total(&measurements);
        Self {
            measurements,
            ranges,
            colors,
            cursor: 0,
            side: Side::Right,
            input_mode: InputMode::Normal,
            flash_message: None,
            should_quit: false,
            scroll: 0,
            leg_diff,
            beighton,
            pending_copy: None,
            pending_write: None,
            export_dir,
            verbose,
        }
    }

    pub fn current_spec(&self) -> &'static FieldSpec {
        &SCHEMA[self.cursor]
    }

    pub fn next_field(&mut self) {
        self.cursor = (self.cursor + 1) % SCHEMA.len();
    }

    pub fn previous_field(&mut self) {
        if self.cursor == 0 {
            self.cursor = SCHEMA.len() - 1;
        } else {
            self.cursor -= 1;
        }
    }

    /// Jump to the first field of the next section, wrapping.
    pub fn next_section(&mut self) {
        let current = self.current_spec().section;
        let start = self.cursor;
        loop {
            self.cursor = (self.cursor + 1) % SCHEMA.len();
            if SCHEMA[self.cursor].section != current || self.cursor == start {
                break;
            }
        }
        // Land on the section's first field even after wrapping.
        let section = SCHEMA[self.cursor].section;
        self.cursor = first_of_section(section);
    }

    pub fn previous_section(&mut self) {
        let current = self.current_spec().section;
        let first = first_of_section(current);
        if self.cursor != first {
            self.cursor = first;
            return;
        }
        let previous = if first == 0 { SCHEMA.len() - 1 } else { first - 1 };
        self.cursor = first_of_section(SCHEMA[previous].section);
    }

    pub fn select_side(&mut self, side: Side) {
        self.side = side;
    }

    /// Feed one typed character into the focused numeric field. Anything
    /// that cannot appear in a decimal number is ignored here and falls
    /// through to the command keys.
    pub fn input_char(&mut self, c: char) {
        if !(c.is_ascii_digit() || c == '.' || c == '-') {
            return;
        }
        let spec = self.current_spec();
        if spec.kind != FieldKind::NumericLr {
            return;
        }
        if let Some(text) = self.measurements.text_mut(spec.key, self.side) {
            text.push(c);
        }
        self.recompute_derived();
    }

    pub fn delete_char(&mut self) {
        let spec = self.current_spec();
        if let Some(text) = self.measurements.text_mut(spec.key, self.side) {
            text.pop();
        }
        self.recompute_derived();
    }

    /// Clear the focused side of the focused field.
    pub fn clear_field(&mut self) {
        let spec = self.current_spec();
        if let Some(text) = self.measurements.text_mut(spec.key, self.side) {
            text.clear();
        }
        self.recompute_derived();
    }

    /// Toggle the focused checkbox (no-op on other field kinds).
    pub fn toggle_current(&mut self) {
        let spec = self.current_spec();
        match spec.kind {
            FieldKind::BooleanLr => self.measurements.toggle_flag(spec.key, Some(self.side)),
            FieldKind::BooleanSingle => self.measurements.toggle_flag(spec.key, None),
            _ => return,
        }
        self.recompute_derived();
    }

    fn recompute_derived(&mut self) {
        self.leg_diff = leg_length_difference(&self.measurements);
        self.beighton = beighton_total(&self.measurements);
    }

    /// Classification of one side of a field, for border tinting.
    pub fn status_for(&self, spec: &FieldSpec, side: Side) -> RangeStatus {
        match spec.kind {
            FieldKind::NumericLr => {
                let raw = self.measurements.text(spec.key, side).unwrap_or("");
                self.ranges.classify_text(spec.key, raw)
            }
            FieldKind::DerivedSingle => self.derived_status(spec.key),
            _ => RangeStatus::Neutral,
        }
    }

    pub fn derived_status(&self, key: ParamKey) -> RangeStatus {
        match key {
            ParamKey::LegLengthDifference => match self.leg_diff {
                Some(diff) => self.ranges.classify_value(key, diff),
                None => RangeStatus::Neutral,
            },
            ParamKey::BeightonTotalScore => {
                self.ranges.classify_value(key, f64::from(self.beighton))
            }
            _ => RangeStatus::Neutral,
        }
    }

    /// Display text of a derived field ("-" while incomputable).
    pub fn derived_display(&self, key: ParamKey) -> String {
        match key {
            ParamKey::LegLengthDifference => match self.leg_diff {
                Some(diff) => format!("{}mm", format_one_decimal(diff)),
                None => "-".to_string(),
            },
            ParamKey::BeightonTotalScore => format!("{} / 9", self.beighton),
            _ => "-".to_string(),
        }
    }

    /// Number of input parameters carrying data, for the title line.
    pub fn filled_count(&self) -> usize {
        SCHEMA
            .iter()
            .filter(|spec| spec.kind != FieldKind::DerivedSingle)
            .filter(|spec| self.measurements.has_data(spec.key))
            .count()
    }

    pub fn input_field_count(&self) -> usize {
        SCHEMA
            .iter()
            .filter(|spec| spec.kind != FieldKind::DerivedSingle)
            .count()
    }

    /// Stage a clipboard export, or flash when there is nothing to copy.
    pub fn request_copy(&mut self) {
        let rows = summary_rows(&self.measurements);
        if rows.is_empty() {
            self.show_flash("No data entered to copy".to_string());
            return;
        }
        self.pending_copy = Some(CopyRequest {
            html: render_html_table(&rows),
            text: render_text_table(&rows),
        });
    }

    /// Stage a file export with the same qualifying-data guard.
    pub fn request_write(&mut self) {
        let rows = summary_rows(&self.measurements);
        if rows.is_empty() {
            self.show_flash("No data entered to export".to_string());
            return;
        }
        let html = render_html_table(&rows);
        self.pending_write = Some(WriteRequest {
            set: self.measurements.clone(),
            rows,
            html,
        });
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

fn first_of_section(section: Section) -> usize {
    SCHEMA
        .iter()
        .position(|spec| spec.section == section)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_app() -> App {
        App::new(
            RangeTable::canonical(),
            ThemeColors::dark(),
            std::env::temp_dir().join("kneeform_test_app"),
            false,
        )
    }

    fn focus(app: &mut App, key: ParamKey) {
        app.cursor = SCHEMA.iter().position(|spec| spec.key == key).unwrap();
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = sample_app();
        app.previous_field();
        assert_eq!(app.cursor, SCHEMA.len() - 1);
        app.next_field();
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_next_section_lands_on_first_field() {
        let mut app = sample_app();
        app.next_section();
        assert_eq!(app.current_spec().key, ParamKey::FemoralTorsion);
        app.next_section();
        assert_eq!(app.current_spec().key, ParamKey::LegLength);
    }

    #[test]
    fn test_input_char_filters_non_numeric() {
        let mut app = sample_app();
        focus(&mut app, ParamKey::FemoralTorsion);
        app.select_side(Side::Right);
        for c in ['2', '3', '.', '5', 'x', 'j'] {
            app.input_char(c);
        }
        assert_eq!(
            app.measurements.text(ParamKey::FemoralTorsion, Side::Right),
            Some("23.5")
        );
    }

    #[test]
    fn test_input_char_ignored_on_checkbox_fields() {
        let mut app = sample_app();
        focus(&mut app, ParamKey::Mri);
        app.input_char('1');
        assert!(!app.measurements.has_data(ParamKey::Mri));
    }

    #[test]
    fn test_delete_and_clear() {
        let mut app = sample_app();
        focus(&mut app, ParamKey::TibialTorsion);
        for c in "40.5".chars() {
            app.input_char(c);
        }
        app.delete_char();
        assert_eq!(
            app.measurements.text(ParamKey::TibialTorsion, Side::Right),
            Some("40.")
        );
        app.clear_field();
        assert_eq!(
            app.measurements.text(ParamKey::TibialTorsion, Side::Right),
            Some("")
        );
    }

    #[test]
    fn test_editing_recomputes_leg_difference() {
        let mut app = sample_app();
        focus(&mut app, ParamKey::LegLength);
        app.select_side(Side::Right);
        for c in "500".chars() {
            app.input_char(c);
        }
        assert_eq!(app.leg_diff, None);

        app.select_side(Side::Left);
        for c in "485".chars() {
            app.input_char(c);
        }
        assert_eq!(app.leg_diff, Some(15.0));
        assert_eq!(
            app.derived_display(ParamKey::LegLengthDifference),
            "15.0mm"
        );
    }

    #[test]
    fn test_toggle_recomputes_beighton() {
        let mut app = sample_app();
        focus(&mut app, ParamKey::BeightonPinky);
        app.select_side(Side::Right);
        app.toggle_current();
        app.select_side(Side::Left);
        app.toggle_current();
        focus(&mut app, ParamKey::BeightonTrunkFlexion);
        app.toggle_current();
        assert_eq!(app.beighton, 3);
        assert_eq!(app.derived_display(ParamKey::BeightonTotalScore), "3 / 9");
    }

    #[test]
    fn test_beighton_status_follows_one_sided_rule() {
        let mut app = sample_app();
        assert_eq!(
            app.derived_status(ParamKey::BeightonTotalScore),
            RangeStatus::Normal
        );
        for key in crate::schema::BEIGHTON_PAIRED {
            focus(&mut app, key);
            app.select_side(Side::Right);
            app.toggle_current();
            app.select_side(Side::Left);
            app.toggle_current();
        }
        assert_eq!(app.beighton, 8);
        assert_eq!(
            app.derived_status(ParamKey::BeightonTotalScore),
            RangeStatus::High
        );
    }

    #[test]
    fn test_request_copy_without_data_flashes() {
        let mut app = sample_app();
        app.request_copy();
        assert!(app.pending_copy.is_none());
        let (msg, _) = app.flash_message.as_ref().unwrap();
        assert_eq!(msg, "No data entered to copy");
    }

    #[test]
    fn test_request_copy_with_data_stages_both_formats() {
        let mut app = sample_app();
        focus(&mut app, ParamKey::FemoralTorsion);
        for c in "30".chars() {
            app.input_char(c);
        }
        app.request_copy();
        let req = app.pending_copy.take().unwrap();
        assert!(req.html.contains("<table"));
        assert!(req.text.starts_with("\"Parameter\""));
        assert!(req.text.contains("30\u{b0}"));
    }

    #[test]
    fn test_filled_count() {
        let mut app = sample_app();
        assert_eq!(app.filled_count(), 0);
        focus(&mut app, ParamKey::GenuValgum);
        app.input_char('8');
        focus(&mut app, ParamKey::XrayEos);
        app.toggle_current();
        assert_eq!(app.filled_count(), 2);
        assert_eq!(app.input_field_count(), SCHEMA.len() - 2);
    }
}
