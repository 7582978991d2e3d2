//! Color palette for the form, with dark and light variants and optional
//! auto-detection from the terminal background.

use clap::ValueEnum;
use ratatui::prelude::*;
use serde::{Deserialize, Serialize};

use crate::measure::RangeStatus;

/// User-facing theme choice (CLI flag or config key).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Auto,
    Dark,
    Light,
}

/// Resolved palette.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub title_color: Color,
    pub muted: Color,
    pub section_title: Style,
    pub selected: Style,
    pub cursor: Color,

    // Classification tints, transcribed from the original's amber (low),
    // rose (high), emerald (normal) and slate (neutral).
    pub status_low: Color,
    pub status_high: Color,
    pub status_normal: Color,
    pub status_neutral: Color,

    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,
    pub popup_border: Color,
    pub info_border: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            title_color: Color::Cyan,
            muted: Color::Gray,
            section_title: Style::new().fg(Color::Cyan).bold(),
            selected: Style::new().reversed(),
            cursor: Color::Cyan,
            status_low: Color::Yellow,
            status_high: Color::Red,
            status_normal: Color::Green,
            status_neutral: Color::DarkGray,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            info_border: Color::Indexed(238),
        }
    }

    pub fn light() -> Self {
        Self {
            title_color: Color::Blue,
            muted: Color::DarkGray,
            section_title: Style::new().fg(Color::Blue).bold(),
            selected: Style::new().reversed(),
            cursor: Color::Blue,
            status_low: Color::Indexed(130),
            status_high: Color::Red,
            status_normal: Color::Indexed(28),
            status_neutral: Color::Gray,
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Indexed(28),
            flash_error: Color::Red,
            popup_border: Color::Blue,
            info_border: Color::Indexed(250),
        }
    }

    /// Foreground tint for a classification result.
    pub fn status_color(&self, status: RangeStatus) -> Color {
        match status {
            RangeStatus::Low => self.status_low,
            RangeStatus::High => self.status_high,
            RangeStatus::Normal => self.status_normal,
            RangeStatus::Neutral => self.status_neutral,
        }
    }

    pub fn status_style(&self, status: RangeStatus) -> Style {
        Style::default().fg(self.status_color(status))
    }
}

/// Resolve the user's choice to a palette. Auto probes the terminal
/// background luma and falls back to dark when the probe fails (pipes,
/// unsupported terminals).
pub fn resolve_theme(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Dark => ThemeColors::dark(),
        Theme::Light => ThemeColors::light(),
        Theme::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            _ => ThemeColors::dark(),
        },
    }
}
