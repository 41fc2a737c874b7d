//! Test utilities for integration tests
use std::sync::{Arc, Mutex};

use pardon_me::chat::ChatInputHandler;
use pardon_me::cli::build_handler;
use pardon_me::core::ClientConfig;
use pardon_me::ui::{InputField, MemoryView};

/// A handler pointed at `url` that renders into memory, along with
/// the input it reads from and the view it writes to.
pub fn test_handler(url: &str) -> (ChatInputHandler, InputField, Arc<Mutex<MemoryView>>) {
    test_handler_with(ClientConfig {
        ask_url: url.to_string(),
        session_id: None,
        unique_session: false,
        timeout: None,
        send_policy: Default::default(),
        response_policy: Default::default(),
    })
}

pub fn test_handler_with(
    config: ClientConfig,
) -> (ChatInputHandler, InputField, Arc<Mutex<MemoryView>>) {
    let input = InputField::new();
    let view = Arc::new(Mutex::new(MemoryView::new()));
    let handler = build_handler(&config, input.clone(), view.clone());
    (handler, input, view)
}

/// The JSON body the agent server replies with.
pub fn reply(text: &str) -> String {
    serde_json::json!({ "response": text }).to_string()
}
