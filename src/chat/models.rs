//! The message model rendered into a transcript.
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

impl Speaker {
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::User => "You",
            Speaker::Bot => "Pardon Me",
        }
    }
}

/// A single line of the conversation. Entries are created once and
/// never edited afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageEntry {
    pub speaker: Speaker,
    pub text: String,
}

impl MessageEntry {
    pub fn new(speaker: Speaker, text: &str) -> Self {
        Self {
            speaker,
            text: text.to_string(),
        }
    }

    pub fn user(text: &str) -> Self {
        Self::new(Speaker::User, text)
    }

    pub fn bot(text: &str) -> Self {
        Self::new(Speaker::Bot, text)
    }
}

impl fmt::Display for MessageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.speaker.label(), self.text)
    }
}

/// Append-only log of message entries.
#[derive(Clone, Debug, Default)]
pub struct Transcript(Vec<MessageEntry>);

impl Transcript {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, entry: MessageEntry) {
        self.0.push(entry)
    }

    pub fn entries(&self) -> &[MessageEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MessageEntry> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_renders_entries_with_speaker_labels() {
        assert_eq!(MessageEntry::user("hi there").to_string(), "You: hi there");
        assert_eq!(MessageEntry::bot("hello").to_string(), "Pardon Me: hello");
    }

    #[test]
    fn it_keeps_append_order() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());
        transcript.push(MessageEntry::user("one"));
        transcript.push(MessageEntry::bot("two"));

        let texts: Vec<&str> = transcript.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
        assert_eq!(transcript.len(), 2);
    }
}
