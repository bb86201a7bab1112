use anyhow::{Context, Result};
use arboard::Clipboard;

/// Maximum clipboard size (10MB)
const MAX_CLIPBOARD_SIZE: usize = 10 * 1024 * 1024;

/// Destination for the copy-reply action
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via arboard.
///
/// The handle is opened on first use and kept for the lifetime of the writer: on Linux
/// the copied text is only served while the owning `Clipboard` is alive.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        validate_clipboard_text(text)?;

        if self.clipboard.is_none() {
            self.clipboard = Some(Clipboard::new().context("Failed to initialize clipboard")?);
        }
        if let Some(clipboard) = self.clipboard.as_mut() {
            clipboard.set_text(text).context("Failed to set clipboard contents")?;
        }
        Ok(())
    }
}

/// Clipboard kept in memory, for tests and headless runs
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
    should_fail: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write fails, as a locked or missing clipboard would
    pub fn failing() -> Self {
        Self { text: None, should_fail: true }
    }

    pub fn contents(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl ClipboardWriter for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        validate_clipboard_text(text)?;
        if self.should_fail {
            anyhow::bail!("Clipboard unavailable");
        }
        self.text = Some(text.to_string());
        Ok(())
    }
}

/// Validates clipboard text without accessing system clipboard
fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.len() > MAX_CLIPBOARD_SIZE {
        anyhow::bail!(
            "Text too large for clipboard ({} bytes, max {})",
            text.len(),
            MAX_CLIPBOARD_SIZE
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_stores_text() {
        let mut clipboard = MemoryClipboard::new();
        clipboard.write_text("Obrigado pelo contato!").unwrap();
        assert_eq!(clipboard.contents(), Some("Obrigado pelo contato!"));
    }

    #[test]
    fn test_memory_clipboard_overwrites() {
        let mut clipboard = MemoryClipboard::new();
        clipboard.write_text("first").unwrap();
        clipboard.write_text("second").unwrap();
        assert_eq!(clipboard.contents(), Some("second"));
    }

    #[test]
    fn test_failing_clipboard() {
        let mut clipboard = MemoryClipboard::failing();
        let err = clipboard.write_text("text").unwrap_err();
        assert!(err.to_string().contains("unavailable"));
        assert!(clipboard.contents().is_none());
    }

    #[test]
    fn test_empty_text_is_copied() {
        // An empty reply clears the clipboard like any other copy
        let mut clipboard = MemoryClipboard::new();
        clipboard.write_text("previous").unwrap();
        clipboard.write_text("").unwrap();
        assert_eq!(clipboard.contents(), Some(""));
    }

    #[test]
    fn test_size_limit() {
        let mut clipboard = MemoryClipboard::new();
        assert!(clipboard.write_text(&"a".repeat(MAX_CLIPBOARD_SIZE)).is_ok());

        let err = clipboard.write_text(&"a".repeat(MAX_CLIPBOARD_SIZE + 1)).unwrap_err();
        assert!(err.to_string().contains("too large"));
        assert!(err.to_string().contains("bytes"));
    }

    #[test]
    fn test_multibyte_size_counts_bytes() {
        let mut clipboard = MemoryClipboard::new();
        let text = "🚀".repeat(3 * 1024 * 1024); // 12MB
        assert!(clipboard.write_text(&text).is_err());
    }
}
