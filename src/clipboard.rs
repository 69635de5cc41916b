//! System clipboard integration
//!
//! The controller copies through the [`ClipboardSink`] trait so a copy can
//! fail without touching the store, and so tests can substitute a fake.

use anyhow::{anyhow, Context, Result};
use copypasta::{ClipboardContext, ClipboardProvider};
use std::io::{self, Write};

/// Anything that can accept a block of text as the clipboard contents
pub trait ClipboardSink {
    fn write_text(&mut self, content: &str) -> Result<()>;
}

pub struct Clipboard {
    context: Option<ClipboardContext>,
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard {
    pub fn new() -> Self {
        // Headless sessions have no clipboard; report that on first use instead
        let context = ClipboardContext::new().ok();
        Self { context }
    }
}

impl ClipboardSink for Clipboard {
    fn write_text(&mut self, content: &str) -> Result<()> {
        let ctx = self
            .context
            .as_mut()
            .ok_or_else(|| anyhow!("clipboard is not available"))?;
        ctx.set_contents(content.to_string())
            .map_err(|e| anyhow!("{}", e))
    }
}

pub fn write_to_stdout(content: &str) -> Result<()> {
    let mut stdout = io::stdout();
    stdout
        .write_all(content.as_bytes())
        .context("Failed to write to stdout")?;
    // No trailing newline when piping
    stdout.flush()?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::fake::FakeClipboard;
    use super::*;

    #[test]
    fn test_missing_clipboard_reports_unavailable() {
        let mut clipboard = Clipboard { context: None };
        let err = clipboard.write_text("hello").unwrap_err();
        assert_eq!(err.to_string(), "clipboard is not available");
    }

    #[test]
    fn test_fake_clipboard_records_writes() {
        let mut sink = FakeClipboard::default();
        sink.write_text("hello").unwrap();
        assert_eq!(sink.copied, vec!["hello"]);

        sink.broken = true;
        assert!(sink.write_text("again").is_err());
        assert_eq!(sink.copied.len(), 1);
    }
}
