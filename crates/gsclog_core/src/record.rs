use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Severity or category tag of a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageKind {
    Error,
    Warning,
    Info,
    /// Any tag the compiler emits that has no dedicated variant.
    Other(String),
}

impl MessageKind {
    pub fn as_str(&self) -> &str {
        match self {
            MessageKind::Error => "error",
            MessageKind::Warning => "warning",
            MessageKind::Info => "info",
            MessageKind::Other(tag) => tag,
        }
    }
}

impl From<&str> for MessageKind {
    fn from(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "error" => MessageKind::Error,
            "warning" => MessageKind::Warning,
            "info" => MessageKind::Info,
            _ => MessageKind::Other(tag.trim().to_string()),
        }
    }
}

impl From<String> for MessageKind {
    fn from(tag: String) -> Self {
        MessageKind::from(tag.as_str())
    }
}

impl From<MessageKind> for String {
    fn from(kind: MessageKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(line, column)` position inside a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

/// One diagnostic entry. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    kind: MessageKind,
    text: String,
    #[serde(default)]
    module: String,
    #[serde(default)]
    locations: Vec<Location>,
    #[serde(default)]
    target: String,
}

impl MessageRecord {
    pub fn new(
        kind: impl Into<MessageKind>,
        text: impl Into<String>,
        module: impl Into<String>,
        locations: Vec<Location>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
            module: module.into(),
            locations,
            target: target.into(),
        }
    }

    pub fn kind(&self) -> &MessageKind {
        &self.kind
    }

    /// Display text, also the dedup key.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn first_location(&self) -> Option<Location> {
        self.locations.first().copied()
    }
}

/// A fully loaded, ordered set of records processed by one import run.
///
/// Cloning is cheap; the records are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    records: Arc<[Arc<MessageRecord>]>,
}

impl Batch {
    pub fn new(records: Vec<MessageRecord>) -> Self {
        Self {
            records: records.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<MessageRecord>> {
        self.records.iter()
    }
}

impl Default for Batch {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<MessageRecord>> for Batch {
    fn from(records: Vec<MessageRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<MessageRecord> for Batch {
    fn from_iter<I: IntoIterator<Item = MessageRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_location_handles_empty_list() {
        let record = MessageRecord::new("error", "bad", "a.gsc", Vec::new(), "");
        assert_eq!(record.first_location(), None);

        let record = MessageRecord::new(
            "error",
            "bad",
            "a.gsc",
            vec![
                Location { line: 4, column: 2 },
                Location { line: 9, column: 1 },
            ],
            "",
        );
        assert_eq!(record.first_location(), Some(Location { line: 4, column: 2 }));
    }

    #[test]
    fn unknown_kinds_are_kept_verbatim() {
        assert_eq!(MessageKind::from("Warning"), MessageKind::Warning);
        assert_eq!(
            MessageKind::from("deprecation"),
            MessageKind::Other("deprecation".to_string())
        );
        assert_eq!(MessageKind::Other("note".into()).to_string(), "note");
    }
}
