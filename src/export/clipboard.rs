//! Clipboard delivery of the summary.
//!
//! Preferred path is a single multi-format write carrying both the HTML
//! table and the plain-text alternate, so rich-text and plain-text paste
//! targets each get their native flavor. When that is refused the write
//! degrades to plain text only, and when no clipboard is reachable at all
//! (headless session, denied access) the text table lands in a file
//! instead.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Where the summary ended up.
#[derive(Debug)]
pub enum CopyOutcome {
    /// Multi-format write succeeded (HTML + text).
    Clipboard,
    /// HTML flavor refused; plain text is on the clipboard.
    PlainTextOnly,
    /// No clipboard available; the text table was written here.
    File(PathBuf),
}

impl CopyOutcome {
    pub fn message(&self) -> String {
        match self {
            CopyOutcome::Clipboard => "Copied summary to clipboard".to_string(),
            CopyOutcome::PlainTextOnly => "Copied summary to clipboard (text only)".to_string(),
            CopyOutcome::File(path) => {
                format!("Clipboard unavailable; wrote {}", path.display())
            }
        }
    }
}

/// Place the summary on the system clipboard, degrading as described above.
/// Blocking; run off the UI thread.
pub fn copy_summary(html: &str, text: &str, fallback_dir: &Path) -> Result<CopyOutcome> {
    match try_clipboard(html, text) {
        Ok(outcome) => Ok(outcome),
        Err(_) => {
            let path = crate::export::file::write_text_fallback(text, fallback_dir)
                .context("Clipboard unavailable and file fallback failed")?;
            Ok(CopyOutcome::File(path))
        }
    }
}

fn try_clipboard(html: &str, text: &str) -> Result<CopyOutcome, arboard::Error> {
    let mut clipboard = Clipboard::new()?;
    match clipboard.set_html(html, Some(text)) {
        Ok(()) => Ok(CopyOutcome::Clipboard),
        Err(_) => {
            clipboard.set_text(text)?;
            Ok(CopyOutcome::PlainTextOnly)
        }
    }
}
