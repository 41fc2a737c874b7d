use std::sync::{Arc, Mutex};

use anyhow::Result;

use super::build_handler;
use crate::chat::SendOutcome;
use crate::core::ClientConfig;
use crate::ui::{InputField, SharedView, TerminalView};

pub async fn run(config: ClientConfig, message: &str) -> Result<()> {
    let input = InputField::new();
    input.set(message);

    let view: SharedView = Arc::new(Mutex::new(TerminalView::stdout()));
    let handler = build_handler(&config, input, view);

    match handler.send_message().await? {
        SendOutcome::Ignored => tracing::debug!("Message is blank, nothing sent"),
        SendOutcome::Busy => tracing::debug!("Send already pending"),
        SendOutcome::Replied(entry) => tracing::debug!("Reply received: {:?}", entry.text),
    }

    Ok(())
}
