/// A commit message as consumed by the increment engine: opaque text plus a
/// stable position marker preserving replay order (oldest first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub position: usize,
    pub text: String,
}

impl CommitMessage {
    /// Create a message at a given replay position
    pub fn new(position: usize, text: impl Into<String>) -> Self {
        CommitMessage {
            position,
            text: text.into(),
        }
    }

    /// Number a sequence of raw message texts in replay order
    pub fn sequence<I, S>(texts: I) -> Vec<CommitMessage>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(position, text)| CommitMessage::new(position, text))
            .collect()
    }

    /// The subject line (first line) of the message
    pub fn subject(&self) -> &str {
        self.text.lines().next().unwrap_or("")
    }
}
