//! Clipboard access with a terminal fallback

use base64::Engine;
use std::io::{IsTerminal, Write};
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};
use workprompt_common::{Result, WorkPromptError};

/// Something that can put text on the system clipboard
pub trait ClipboardWriter {
    /// Short name for logs
    fn name(&self) -> &str;

    fn write_text(&self, text: &str) -> Result<()>;
}

/// Clipboard through an external program reading stdin (`pbcopy`, `xclip`, ...)
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Pick the usual clipboard program for this platform
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("pbcopy", Vec::new())
        } else if cfg!(target_os = "windows") {
            Self::new("clip", Vec::new())
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            Self::new("wl-copy", Vec::new())
        } else {
            Self::new(
                "xclip",
                vec!["-selection".to_string(), "clipboard".to_string()],
            )
        }
    }
}

impl ClipboardWriter for CommandClipboard {
    fn name(&self) -> &str {
        &self.program
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                WorkPromptError::clipboard(format!("Failed to run {}: {}", self.program, e))
            })?;

        // Reap the child even when the pipe broke
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        let output = child.wait_with_output()?;
        written.map_err(|e| {
            WorkPromptError::clipboard(format!("Failed to write to {}: {}", self.program, e))
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(WorkPromptError::clipboard(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Asks the terminal to set its selection via an OSC 52 escape sequence
pub struct TerminalSelection<W> {
    out: std::cell::RefCell<W>,
}

impl<W: Write> TerminalSelection<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: std::cell::RefCell::new(out),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

/// Fallback used when no terminal is attached; always fails
struct NoTerminal;

impl ClipboardWriter for NoTerminal {
    fn name(&self) -> &str {
        "osc52"
    }

    fn write_text(&self, _text: &str) -> Result<()> {
        Err(WorkPromptError::clipboard("No terminal available for OSC 52"))
    }
}

/// OSC 52 writer aimed at the controlling terminal, never stdout
///
/// Prefers `tty`, then stderr when `stderr_is_terminal`. Without either the
/// writer always fails so the copy is reported as unavailable.
pub fn terminal_fallback(tty: Option<std::fs::File>, stderr_is_terminal: bool) -> Box<dyn ClipboardWriter> {
    match tty {
        Some(file) => Box::new(TerminalSelection::new(file)),
        None if stderr_is_terminal => Box::new(TerminalSelection::new(std::io::stderr())),
        None => Box::new(NoTerminal),
    }
}

fn open_tty() -> Option<std::fs::File> {
    if cfg!(unix) {
        std::fs::OpenOptions::new().write(true).open("/dev/tty").ok()
    } else {
        None
    }
}

/// OSC 52 sequence setting the clipboard selection to `text`
pub fn osc52_sequence(text: &str) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{}\x07", payload)
}

impl<W: Write> ClipboardWriter for TerminalSelection<W> {
    fn name(&self) -> &str {
        "osc52"
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut out = self.out.borrow_mut();
        out.write_all(osc52_sequence(text).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Which path ended up holding the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Primary,
    Fallback,
    Unavailable,
}

impl CopyOutcome {
    pub fn copied(&self) -> bool {
        !matches!(self, CopyOutcome::Unavailable)
    }
}

/// Primary clipboard with a fallback; failures never reach the caller
pub struct Clipboard {
    primary: Box<dyn ClipboardWriter>,
    fallback: Box<dyn ClipboardWriter>,
}

impl Clipboard {
    pub fn new(primary: Box<dyn ClipboardWriter>, fallback: Box<dyn ClipboardWriter>) -> Self {
        Self { primary, fallback }
    }

    /// Platform clipboard (or `override_program`) with OSC 52 on the terminal as fallback
    pub fn system(override_program: Option<(String, Vec<String>)>) -> Self {
        let primary = match override_program {
            Some((program, args)) => CommandClipboard::new(program, args),
            None => CommandClipboard::detect(),
        };
        debug!("Clipboard program: {}", primary.name());
        Self::new(
            Box::new(primary),
            terminal_fallback(open_tty(), std::io::stderr().is_terminal()),
        )
    }

    pub fn copy(&self, text: &str) -> CopyOutcome {
        match self.primary.write_text(text) {
            Ok(()) => {
                info!("Copied {} bytes via {}", text.len(), self.primary.name());
                return CopyOutcome::Primary;
            }
            Err(e) => warn!("Clipboard write via {} failed: {}", self.primary.name(), e),
        }

        match self.fallback.write_text(text) {
            Ok(()) => {
                info!("Copied {} bytes via {}", text.len(), self.fallback.name());
                CopyOutcome::Fallback
            }
            Err(e) => {
                warn!("Clipboard fallback {} failed: {}", self.fallback.name(), e);
                CopyOutcome::Unavailable
            }
        }
    }
}
