use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod ask;
pub mod chat;

use crate::ask::HttpAskBackend;
use crate::chat::{ChatInputHandler, ResponsePolicy, SendPolicy};
use crate::core::ClientConfig;
use crate::ui::{InputField, SharedView};

/// Options shared by every command that talks to the agent
#[derive(Args, Clone, Debug, Default)]
pub struct ClientArgs {
    /// URL of the agent's ask endpoint [env: PARDON_ME_ASK_URL]
    #[arg(long)]
    url: Option<String>,

    /// Session id sent with every message [env: PARDON_ME_SESSION_ID]
    #[arg(long, conflicts_with = "unique_session")]
    session_id: Option<String>,

    /// Generate a fresh session id for this run
    #[arg(long, action, default_value = "false")]
    unique_session: bool,

    /// Give up on a reply after this many seconds [env: PARDON_ME_TIMEOUT_SECS]
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Don't send another message until the last reply arrives
    #[arg(long, action, default_value = "false")]
    exclusive: bool,

    /// Show an error instead of malformed replies
    #[arg(long, action, default_value = "false")]
    strict_response: bool,
}

impl ClientArgs {
    /// Layer the flags over the environment backed defaults.
    pub fn into_config(self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(url) = self.url {
            config.ask_url = url;
        }
        if let Some(id) = self.session_id {
            config.session_id = Some(id);
        }
        if self.unique_session {
            config.session_id = None;
            config.unique_session = true;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Some(Duration::from_secs(secs));
        }
        if self.exclusive {
            config.send_policy = SendPolicy::Exclusive;
        }
        if self.strict_response {
            config.response_policy = ResponsePolicy::Strict;
        }
        config
    }
}

#[derive(Subcommand)]
enum Command {
    /// Start an interactive chat session
    Chat {
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Send a single message and print the reply
    Ask {
        #[arg(long)]
        message: String,

        #[command(flatten)]
        client: ClientArgs,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

/// Wire a handler to the HTTP backend described by `config`.
pub fn build_handler(config: &ClientConfig, input: InputField, view: SharedView) -> ChatInputHandler {
    let backend = HttpAskBackend::new(&config.ask_url).with_timeout(config.timeout);
    ChatInputHandler::new(Arc::new(backend), input, view)
        .session(config.session())
        .send_policy(config.send_policy)
        .response_policy(config.response_policy)
}

fn init_tracing() {
    // Logs go to stderr so they never interleave with the transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=warn", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    init_tracing();

    match args.command {
        Some(Command::Chat { client }) => {
            chat::run(client.into_config()).await?;
        }
        Some(Command::Ask { message, client }) => {
            ask::run(client.into_config(), &message).await?;
        }
        None => {
            chat::run(ClientArgs::default().into_config()).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn it_parses_ask_with_overrides() {
        let cli = Cli::try_parse_from([
            "pardon-me",
            "ask",
            "--message",
            "hi there",
            "--url",
            "http://localhost:9000/ask",
            "--timeout-secs",
            "5",
            "--exclusive",
            "--strict-response",
        ])
        .unwrap();

        let Some(Command::Ask { message, client }) = cli.command else {
            panic!("Expected the ask command");
        };
        assert_eq!(message, "hi there");

        let config = client.into_config();
        assert_eq!(config.ask_url, "http://localhost:9000/ask");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.send_policy, SendPolicy::Exclusive);
        assert_eq!(config.response_policy, ResponsePolicy::Strict);
    }

    #[test]
    #[serial]
    fn it_rejects_a_pinned_and_unique_session_together() {
        let result = Cli::try_parse_from([
            "pardon-me",
            "chat",
            "--session-id",
            "abc",
            "--unique-session",
        ]);
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn it_keeps_faithful_defaults_without_flags() {
        let cli = Cli::try_parse_from(["pardon-me", "chat"]).unwrap();
        let Some(Command::Chat { client }) = cli.command else {
            panic!("Expected the chat command");
        };

        let config = client.into_config();
        assert_eq!(config.send_policy, SendPolicy::Overlap);
        assert_eq!(config.response_policy, ResponsePolicy::Lenient);
        assert!(!config.unique_session);
    }
}
