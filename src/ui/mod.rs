//! Display surfaces a `ChatInputHandler` writes into.
pub mod input;
pub mod prompt;
pub mod view;

pub use input::InputField;
pub use prompt::PrinterWriter;
pub use view::{MemoryView, SharedView, TerminalView, TranscriptView, lock_view};
