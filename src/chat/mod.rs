pub mod handler;
pub mod models;
pub mod session;

pub use handler::{
    ChatInputHandler, HandlerState, PendingSend, ResponsePolicy, SendOutcome, SendPolicy, Trigger,
};
pub use models::{MessageEntry, Speaker, Transcript};
pub use session::SessionContext;
