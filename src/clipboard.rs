//! System clipboard access.
//!
//! The terminal clipboard is reached with an OSC 52 escape sequence, which
//! works over SSH and in most modern terminals. On macOS `pbcopy` is tried
//! first.

use std::io::{Write, stdout};

use base64::Engine;

/// Somewhere the document text can be copied to.
pub trait Clipboard {
    /// # Errors
    /// Returns an I/O error if the text could not be handed over.
    fn set_text(&mut self, text: &str) -> std::io::Result<()>;
}

#[derive(Debug, Default)]
pub struct TerminalClipboard;

impl Clipboard for TerminalClipboard {
    fn set_text(&mut self, text: &str) -> std::io::Result<()> {
        #[cfg(target_os = "macos")]
        {
            if copy_to_pbcopy(text).is_ok() {
                return Ok(());
            }
        }
        let mut out = stdout();
        out.write_all(osc52_sequence(text).as_bytes())?;
        out.flush()
    }
}

#[cfg(target_os = "macos")]
fn copy_to_pbcopy(text: &str) -> std::io::Result<()> {
    use std::process::{Command, Stdio};

    let mut child = Command::new("pbcopy").stdin(Stdio::piped()).spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    if child.wait()?.success() {
        Ok(())
    } else {
        Err(std::io::Error::other("pbcopy failed"))
    }
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
