use std::sync::Arc;

use crate::{Column, MessageRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A batch finished loading and replaces the previous one.
    BatchLoaded { source: String, total: usize },
    /// User toggled the dedup checkbox.
    DedupToggled(bool),
    /// User clicked Start.
    StartClicked,
    /// User clicked Cancel.
    CancelClicked,
    /// User clicked a column header.
    ColumnClicked(Column),
    /// User activated (double-clicked) the row at `position` in display order.
    RowActivated { position: usize },
    /// Worker cleared the list ahead of a run.
    RowsCleared,
    /// Worker accepted a record.
    RowEmitted {
        record: Arc<MessageRecord>,
        sequence: usize,
    },
    /// Worker progress: accepted records over batch length.
    Progress { done: usize, total: usize },
    /// Worker consumed the whole batch.
    BatchComplete,
    /// Worker observed a cancel request and stopped.
    RunCancelled { emitted: usize },
    /// Worker refused to start.
    StartRejected(String),
    /// The external editor could not be launched.
    LaunchFailed(String),
    /// Settings could not be loaded or saved.
    SettingsProblem(String),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
