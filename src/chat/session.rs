use uuid::Uuid;

/// Session id sent when nothing else is configured. Every client
/// shares it, so the backend sees one conversation for all users.
pub const DEFAULT_SESSION_ID: &str = "user-session-001";

/// Identifies the backend conversation a request belongs to. Fixed
/// for the lifetime of the handler that owns it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionContext {
    id: String,
}

impl SessionContext {
    pub fn from_id(id: &str) -> Self {
        Self { id: id.to_string() }
    }

    pub fn generate() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::from_id(DEFAULT_SESSION_ID)
    }
}
