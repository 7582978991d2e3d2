pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::task::JoinHandle;

use crate::export::{copy_summary, write_summary_files, CopyOutcome};
use crate::measure::Side;
use event::{Event, EventHandler};

type CopyTask = JoinHandle<anyhow::Result<CopyOutcome>>;
type WriteTask = JoinHandle<anyhow::Result<(std::path::PathBuf, std::path::PathBuf)>>;

/// Run the form until quit. Returns the app so the caller can print the
/// final summary (`--print`).
pub async fn run_tui(mut app: App) -> anyhow::Result<App> {
    // Buffer stderr while the TUI is active to prevent output corrupting
    // the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250); // 250ms tick drives flash expiry

    let mut pending_copy: Option<CopyTask> = None;
    let mut pending_write: Option<WriteTask> = None;

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        // Check if a background clipboard write has completed
        if let Some(handle) = &mut pending_copy {
            if handle.is_finished() {
                let handle = pending_copy.take().unwrap();
                match handle.await {
                    Ok(Ok(outcome)) => {
                        if app.verbose {
                            crate::buffered_eprintln!("clipboard export: {}", outcome.message());
                        }
                        app.show_flash(outcome.message());
                    }
                    Ok(Err(e)) => app.show_flash(format!("Failed to copy: {}", e)),
                    Err(e) => app.show_flash(format!("Copy task panicked: {}", e)),
                }
            }
        }

        if let Some(handle) = &mut pending_write {
            if handle.is_finished() {
                let handle = pending_write.take().unwrap();
                match handle.await {
                    Ok(Ok((html_path, json_path))) => {
                        if app.verbose {
                            crate::buffered_eprintln!(
                                "file export: {} and {}",
                                html_path.display(),
                                json_path.display()
                            );
                        }
                        let dir = html_path.parent().unwrap_or(html_path.as_path());
                        app.show_flash(format!("Wrote summary files to {}", dir.display()));
                    }
                    Ok(Err(e)) => app.show_flash(format!("Failed to write summary: {}", e)),
                    Err(e) => app.show_flash(format!("Write task panicked: {}", e)),
                }
            }
        }

        // Spawn staged exports once no write of the same kind is in flight
        if pending_copy.is_none() {
            if let Some(request) = app.pending_copy.take() {
                let dir = app.export_dir.clone();
                pending_copy = Some(tokio::task::spawn_blocking(move || {
                    copy_summary(&request.html, &request.text, &dir)
                }));
            }
        }

        if pending_write.is_none() {
            if let Some(request) = app.pending_write.take() {
                let dir = app.export_dir.clone();
                pending_write = Some(tokio::task::spawn_blocking(move || {
                    write_summary_files(&request.set, &request.rows, &request.html, &dir)
                }));
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    Ok(app)
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true
                }
                KeyCode::Char('q') => app.should_quit = true,

                // Value entry (digits, dot, minus) goes to the focused field
                KeyCode::Char(c @ ('0'..='9' | '.' | '-')) => app.input_char(c),
                KeyCode::Backspace => app.delete_char(),
                KeyCode::Delete | KeyCode::Char('x') => app.clear_field(),

                // Checkbox toggle
                KeyCode::Char(' ') | KeyCode::Enter => app.toggle_current(),

                // Navigation. The patient's right knee is the left column.
                KeyCode::Char('j') | KeyCode::Down => app.next_field(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_field(),
                KeyCode::Char('h') | KeyCode::Left => app.select_side(Side::Right),
                KeyCode::Char('l') | KeyCode::Right => app.select_side(Side::Left),
                KeyCode::Tab => app.next_section(),
                KeyCode::BackTab => app.previous_section(),

                // Exports
                KeyCode::Char('c') => app.request_copy(),
                KeyCode::Char('w') => app.request_write(),

                // Help
                KeyCode::Char('?') => app.show_help(),

                _ => {}
            }
        }
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::RangeTable;
    use crate::schema::{ParamKey, SCHEMA};

    fn sample_app() -> App {
        App::new(
            RangeTable::canonical(),
            ThemeColors::dark(),
            std::env::temp_dir().join("kneeform_test_keys"),
            false,
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = sample_app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_plain_c_copies_instead_of_quitting() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('c'));
        assert!(!app.should_quit);
        // Empty form: staged nothing, flashed the guard message.
        assert!(app.pending_copy.is_none());
        assert!(app.flash_message.is_some());
    }

    #[test]
    fn test_digit_keys_edit_focused_numeric_field() {
        let mut app = sample_app();
        app.cursor = SCHEMA
            .iter()
            .position(|spec| spec.key == ParamKey::FemoralTorsion)
            .unwrap();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('0'));
        assert_eq!(
            app.measurements.text(ParamKey::FemoralTorsion, Side::Right),
            Some("30")
        );
    }

    #[test]
    fn test_side_keys() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.side, Side::Left);
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.side, Side::Right);
    }

    #[test]
    fn test_space_toggles_checkbox() {
        let mut app = sample_app();
        // First schema row is the MRI checkbox pair.
        press(&mut app, KeyCode::Char(' '));
        assert!(app.measurements.flag(ParamKey::Mri, Some(Side::Right)));
    }

    #[test]
    fn test_help_mode_swallows_keys() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode, app::InputMode::Help);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.input_mode, app::InputMode::Normal);
        assert!(!app.should_quit);
    }
}
