use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Result, anyhow, bail};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, JoinSet};

use super::build_handler;
use crate::chat::{MessageEntry, Trigger};
use crate::core::ClientConfig;
use crate::ui::{InputField, PrinterWriter, SharedView, TerminalView};

/// Transcript lines go through the editor's external printer so they
/// don't clobber the prompt. Falls back to plain stdout when the
/// terminal doesn't support it (e.g. piped input).
fn prompt_view(rl: &mut DefaultEditor) -> SharedView {
    match rl.create_external_printer() {
        Ok(printer) => {
            let view: SharedView = Arc::new(Mutex::new(TerminalView::new(PrinterWriter::new(
                printer,
            ))));
            view
        }
        Err(err) => {
            tracing::debug!("No external printer, writing to stdout: {}", err);
            let view: SharedView = Arc::new(Mutex::new(TerminalView::stdout()));
            view
        }
    }
}

/// Reads lines on a dedicated thread since rustyline blocks. Each line
/// is a trigger for the handler.
fn read_lines(
    tx: mpsc::UnboundedSender<String>,
    view_tx: oneshot::Sender<SharedView>,
) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    if view_tx.send(prompt_view(&mut rl)).is_err() {
        return Ok(());
    }

    loop {
        match rl.readline(">>> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = rl.add_history_entry(line.as_str()) {
                        tracing::debug!("Failed to add history entry: {}", err);
                    }
                }
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn report(joined: Result<Result<MessageEntry>, JoinError>) {
    match joined {
        Ok(Ok(entry)) => tracing::debug!("Reply received: {:?}", entry.text),
        Ok(Err(err)) => tracing::error!("Send failed: {:#}", err),
        Err(err) => tracing::error!("Send task failed: {}", err),
    }
}

pub async fn run(config: ClientConfig) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (view_tx, view_rx) = oneshot::channel();
    let reader = thread::spawn(move || read_lines(tx, view_tx));

    let Ok(view) = view_rx.await else {
        reader
            .join()
            .map_err(|_| anyhow!("Input thread panicked"))??;
        bail!("Input thread exited before starting");
    };

    let input = InputField::new();
    let handler = build_handler(&config, input.clone(), view);
    tracing::info!(
        "Chatting with {} using session {}",
        config.ask_url,
        handler.session_id()
    );

    // Replies are awaited on their own tasks so the prompt stays live
    // while a send is pending.
    let mut pending = JoinSet::new();
    loop {
        tokio::select! {
            line = rx.recv() => {
                let Some(line) = line else {
                    break;
                };
                input.set(&line);
                match handler.trigger() {
                    Ok(Trigger::Sent(send)) => {
                        pending.spawn(send.complete());
                    }
                    Ok(Trigger::Busy) => {
                        tracing::warn!("Still waiting for the last reply, message not sent");
                    }
                    Ok(Trigger::Ignored) => {}
                    Err(err) => tracing::error!("Send failed: {:#}", err),
                }
            }
            Some(joined) = pending.join_next(), if !pending.is_empty() => {
                report(joined);
            }
        }
    }

    // Let outstanding replies land before exiting
    while let Some(joined) = pending.join_next().await {
        report(joined);
    }

    reader
        .join()
        .map_err(|_| anyhow!("Input thread panicked"))?
}
