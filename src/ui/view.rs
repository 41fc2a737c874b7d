use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};

use crate::chat::{MessageEntry, Transcript};

/// Where the transcript is rendered. The view owns the transcript,
/// callers can only append to it.
pub trait TranscriptView {
    fn append(&mut self, entry: MessageEntry) -> Result<()>;

    /// Make the most recent entry visible.
    fn scroll_to_bottom(&mut self) -> Result<()>;

    fn transcript(&self) -> &Transcript;
}

pub type SharedView = Arc<Mutex<dyn TranscriptView + Send + 'static>>;

/// Lock a view for a single append. A panic in another holder does
/// not make the transcript unusable.
pub fn lock_view(view: &SharedView) -> MutexGuard<'_, dyn TranscriptView + Send + 'static> {
    view.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Prints each entry as a labeled line, e.g. `You: hi`.
pub struct TerminalView<W: Write> {
    out: W,
    transcript: Transcript,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            transcript: Transcript::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TerminalView<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TranscriptView for TerminalView<W> {
    fn append(&mut self, entry: MessageEntry) -> Result<()> {
        writeln!(self.out, "{}", entry).context("Failed to write transcript entry")?;
        self.transcript.push(entry);
        Ok(())
    }

    fn scroll_to_bottom(&mut self) -> Result<()> {
        self.out.flush().context("Failed to flush transcript")
    }

    fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}

/// Keeps entries in memory and counts scrolls. Used by tests and
/// anywhere the transcript is inspected rather than shown.
#[derive(Debug, Default)]
pub struct MemoryView {
    transcript: Transcript,
    pub scrolls: usize,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<MessageEntry> {
        self.transcript.entries().to_vec()
    }
}

impl TranscriptView for MemoryView {
    fn append(&mut self, entry: MessageEntry) -> Result<()> {
        self.transcript.push(entry);
        Ok(())
    }

    fn scroll_to_bottom(&mut self) -> Result<()> {
        self.scrolls += 1;
        Ok(())
    }

    fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}
