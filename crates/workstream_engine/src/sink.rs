use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Append-only text buffer shared between one job and its observer.
///
/// Clones share the same buffer. Every `append` lands as a whole with respect
/// to `snapshot`, and nothing is ever removed, so successive snapshots of one
/// sink are prefixes of each other. A new run gets a new sink; there is no
/// way to clear an existing one.
#[derive(Debug, Clone, Default)]
pub struct OutputSink {
    buffer: Arc<Mutex<String>>,
}

impl OutputSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.lock().push_str(text);
    }

    /// Copy of everything appended so far.
    pub fn snapshot(&self) -> String {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Lets jobs use `write!`/`writeln!` on a shared `&OutputSink`.
    ///
    /// The formatted text is built first and appended once, so readers never
    /// see half of a formatted line.
    pub fn write_fmt(&self, args: fmt::Arguments<'_>) {
        match args.as_str() {
            Some(text) => self.append(text),
            None => self.append(&args.to_string()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, String> {
        // push_str never leaves a partial write behind, so a poisoned buffer is still whole.
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Write for OutputSink {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s);
        Ok(())
    }
}
