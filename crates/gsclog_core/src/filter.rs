use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::MessageRecord;

/// Which records of a batch reach the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterPolicy {
    /// Every record, in batch order.
    #[default]
    PassThrough,
    /// Only the first record carrying a given `text`.
    FirstOccurrencePerText,
}

impl FilterPolicy {
    pub fn from_dedup(dedup: bool) -> Self {
        if dedup {
            FilterPolicy::FirstOccurrencePerText
        } else {
            FilterPolicy::PassThrough
        }
    }
}

/// Run-local filter state. Build a fresh one for every run.
#[derive(Debug, Default)]
pub struct RecordFilter {
    policy: FilterPolicy,
    seen: HashSet<String>,
}

impl RecordFilter {
    pub fn new(policy: FilterPolicy) -> Self {
        Self {
            policy,
            seen: HashSet::new(),
        }
    }

    /// Decides whether `record` is emitted. Accepted texts are remembered
    /// so later records with the same text are rejected.
    pub fn accept(&mut self, record: &MessageRecord) -> bool {
        match self.policy {
            FilterPolicy::PassThrough => true,
            FilterPolicy::FirstOccurrencePerText => {
                if self.seen.contains(record.text()) {
                    false
                } else {
                    self.seen.insert(record.text().to_string());
                    true
                }
            }
        }
    }
}
