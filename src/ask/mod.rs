pub mod client;
pub mod reply;

pub use client::{AskBackend, AskRequest, HttpAskBackend, SharedAskBackend};
pub use reply::{reply_text, strict_reply_text};
