//! Holds diagnostic output back while the form owns the terminal.
//!
//! Raw eprintln! while ratatui is drawing corrupts the alternate screen, so
//! verbose diagnostics go through here: buffered between
//! [`activate`] and [`drain`], printed straight to stderr otherwise.

use std::collections::VecDeque;
use std::sync::Mutex;

static PENDING: Mutex<Option<VecDeque<String>>> = Mutex::new(None);

/// Start buffering. Subsequent [`emit`] calls are stored until [`drain`].
pub fn activate() {
    *PENDING.lock().unwrap() = Some(VecDeque::new());
}

/// Stop buffering and hand back everything collected, oldest first.
pub fn drain() -> Vec<String> {
    PENDING
        .lock()
        .unwrap()
        .take()
        .map(Vec::from)
        .unwrap_or_default()
}

/// Record one diagnostic line, buffered or straight to stderr.
pub fn emit(msg: String) {
    let mut guard = PENDING.lock().unwrap();
    match guard.as_mut() {
        Some(buffer) => buffer.push_back(msg),
        None => {
            drop(guard);
            eprintln!("{}", msg);
        }
    }
}

/// `eprintln!` that respects the buffer while the form is on screen.
#[macro_export]
macro_rules! buffered_eprintln {
    ($($arg:tt)*) => {
        $crate::stderr_buffer::emit(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_messages_drain_in_order() {
        activate();
        emit("first".to_string());
        emit("second".to_string());
        let drained = drain();
        assert_eq!(drained, vec!["first".to_string(), "second".to_string()]);
        // Buffer is inactive again after drain.
        assert!(drain().is_empty());
    }
}
