//! Status surface: one message plus a tone, overwritten on every change.
//!
//! The status display is a passed-in handle rather than a global; anything
//! that can render a line implements [`StatusSink`].

use std::sync::Mutex;
use std::time::Duration;

use colored::Colorize;
use indicatif::ProgressBar;

/// Severity tag driving how a status message is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

/// Receiver for submission status updates. Implementations must tolerate
/// concurrent calls; two in-flight submissions race on this surface and the
/// last writer wins.
pub trait StatusSink: Send + Sync {
    fn set_status(&self, message: &str, tone: Tone);
}

/// Stores only the most recent status. Used by tests and by callers that
/// embed the submitter and render status themselves.
#[derive(Debug, Default)]
pub struct MemoryStatus {
    last: Mutex<Option<(String, Tone)>>,
}

impl MemoryStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently set message and tone, if any.
    pub fn last(&self) -> Option<(String, Tone)> {
        self.last.lock().ok().and_then(|guard| (*guard).clone())
    }
}

impl StatusSink for MemoryStatus {
    fn set_status(&self, message: &str, tone: Tone) {
        if let Ok(mut guard) = self.last.lock() {
            *guard = Some((message.to_string(), tone));
        }
    }
}

/// Terminal status line: a spinner while a request is in flight, then a
/// colored settle line on stderr.
#[derive(Debug, Default)]
pub struct ConsoleStatus {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsoleStatus {
    pub fn new() -> Self {
        Self::default()
    }

    fn clear_spinner(&self) {
        if let Ok(mut guard) = self.spinner.lock() {
            if let Some(spinner) = guard.take() {
                spinner.finish_and_clear();
            }
        }
    }
}

impl StatusSink for ConsoleStatus {
    fn set_status(&self, message: &str, tone: Tone) {
        match tone {
            Tone::Info => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_message(message.to_string());
                spinner.enable_steady_tick(Duration::from_millis(80));
                if let Ok(mut guard) = self.spinner.lock() {
                    if let Some(old) = guard.replace(spinner) {
                        old.finish_and_clear();
                    }
                }
            }
            Tone::Success => {
                self.clear_spinner();
                eprintln!("{} {}", "✓".green().bold(), message);
            }
            Tone::Error => {
                self.clear_spinner();
                eprintln!("{} {}", "✗".red().bold(), message);
            }
        }
    }
}
