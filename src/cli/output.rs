/// Output: stdout/file writing, JSON helpers, structured errors, debug timing.
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::request::ConvertError;
use crate::types::ErrorOutput;

/// Output context passed to all commands.
pub struct OutputCtx {
    /// Print summaries and errors as JSON.
    pub json: bool,
    /// When true, report stage timings.
    pub debug: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(json: bool, debug: bool) -> Self {
        Self { json, debug }
    }

    /// Start a named debug timer. Logs elapsed time on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }
}

/// Print `text` to stdout, or write it to `path` (overwriting).
///
/// # Errors
///
/// Returns `ConvertError::Io` if the file cannot be written.
pub fn write_text(text: &str, path: Option<&Path>) -> Result<(), ConvertError> {
    match path {
        Some(path) => std::fs::write(path, text).map_err(|source| ConvertError::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, json: bool) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    if json {
        let s = serde_json::to_string_pretty(err).unwrap_or_default();
        let _ = writeln!(out, "{s}");
    } else {
        let _ = writeln!(out, "Error: {}", err.error.message);
    }
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            debug!(stage = self.label, "{ms:.2}ms");
        }
    }
}

// --- Generic JSON helpers ---

/// Pretty-print any serializable value to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}
