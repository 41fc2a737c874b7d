use std::env;
use std::time::Duration;

use crate::chat::{ResponsePolicy, SendPolicy, SessionContext};

pub const DEFAULT_ASK_URL: &str = "http://127.0.0.1:8000/ask";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub ask_url: String,
    pub session_id: Option<String>,
    pub unique_session: bool,
    pub timeout: Option<Duration>,
    pub send_policy: SendPolicy,
    pub response_policy: ResponsePolicy,
}

impl ClientConfig {
    /// Resolve the session for this process. An explicit id wins over
    /// `unique_session`, and with neither set every request shares the
    /// fixed default id.
    pub fn session(&self) -> SessionContext {
        match (&self.session_id, self.unique_session) {
            (Some(id), _) => SessionContext::from_id(id),
            (None, true) => SessionContext::generate(),
            (None, false) => SessionContext::default(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let ask_url =
            env::var("PARDON_ME_ASK_URL").unwrap_or_else(|_| DEFAULT_ASK_URL.to_string());
        let session_id = env::var("PARDON_ME_SESSION_ID")
            .ok()
            .filter(|id| !id.trim().is_empty());
        let timeout = env::var("PARDON_ME_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| secs.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        Self {
            ask_url,
            session_id,
            unique_session: false,
            timeout,
            send_policy: SendPolicy::default(),
            response_policy: ResponsePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::session::DEFAULT_SESSION_ID;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: tests touching the environment are serialized
        unsafe {
            env::remove_var("PARDON_ME_ASK_URL");
            env::remove_var("PARDON_ME_SESSION_ID");
            env::remove_var("PARDON_ME_TIMEOUT_SECS");
        }
    }

    #[test]
    #[serial]
    fn it_defaults_to_the_local_endpoint() {
        clear_env();
        let config = ClientConfig::default();
        assert_eq!(config.ask_url, "http://127.0.0.1:8000/ask");
        assert_eq!(config.session_id, None);
        assert_eq!(config.timeout, None);
        assert_eq!(config.send_policy, SendPolicy::Overlap);
        assert_eq!(config.response_policy, ResponsePolicy::Lenient);
        assert_eq!(config.session().id(), DEFAULT_SESSION_ID);
    }

    #[test]
    #[serial]
    fn it_reads_overrides_from_env() {
        clear_env();
        unsafe {
            env::set_var("PARDON_ME_ASK_URL", "http://localhost:9000/ask");
            env::set_var("PARDON_ME_SESSION_ID", "abc-123");
            env::set_var("PARDON_ME_TIMEOUT_SECS", "30");
        }
        let config = ClientConfig::default();
        clear_env();

        assert_eq!(config.ask_url, "http://localhost:9000/ask");
        assert_eq!(config.session_id.as_deref(), Some("abc-123"));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.session().id(), "abc-123");
    }

    #[test]
    #[serial]
    fn it_ignores_blank_session_and_bad_timeout() {
        clear_env();
        unsafe {
            env::set_var("PARDON_ME_SESSION_ID", "   ");
            env::set_var("PARDON_ME_TIMEOUT_SECS", "soon");
        }
        let config = ClientConfig::default();
        clear_env();

        assert_eq!(config.session_id, None);
        assert_eq!(config.timeout, None);
    }

    #[test]
    #[serial]
    fn it_generates_a_unique_session_when_asked() {
        clear_env();
        let config = ClientConfig {
            unique_session: true,
            ..ClientConfig::default()
        };
        let session = config.session();
        assert_ne!(session.id(), DEFAULT_SESSION_ID);

        let explicit = ClientConfig {
            session_id: Some("pinned".to_string()),
            unique_session: true,
            ..ClientConfig::default()
        };
        assert_eq!(explicit.session().id(), "pinned");
    }
}
