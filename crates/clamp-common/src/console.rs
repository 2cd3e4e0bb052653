//! Console sink for informational output.
//!
//! The truncation runtime writes a single diagnostic line once the initial
//! pass completes. Nothing consumes it programmatically; it exists so a
//! developer watching the terminal (or a test inspecting a buffer) can see
//! that the handler was installed.

/// A destination for informational log lines.
pub trait Console {
    /// Write one informational line.
    fn log(&mut self, message: &str);

    /// Write one warning line.
    fn warn(&mut self, message: &str) {
        self.log(message);
    }
}

/// Console that prints to stdout (`log`) and stderr (`warn`).
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl Console for StdConsole {
    fn log(&mut self, message: &str) {
        println!("[clamp] {message}");
    }

    fn warn(&mut self, message: &str) {
        eprintln!("[clamp WARN] {message}");
    }
}

/// Console that keeps every line in memory.
///
/// Used by tests and by callers that want to decide later whether to show
/// the output (e.g. the CLI in `--json` mode).
#[derive(Debug, Default, Clone)]
pub struct BufferConsole {
    lines: Vec<String>,
}

impl BufferConsole {
    /// Create an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines logged so far, oldest first.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Drain the buffered lines.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl Console for BufferConsole {
    fn log(&mut self, message: &str) {
        self.lines.push(message.to_owned());
    }

    fn warn(&mut self, message: &str) {
        self.lines.push(format!("WARN: {message}"));
    }
}
