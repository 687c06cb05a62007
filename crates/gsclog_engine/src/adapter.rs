use std::sync::mpsc;
use std::sync::Arc;

use gsclog_core::MessageRecord;

/// Receiver of everything an import run produces.
///
/// Calls arrive from the worker thread in run order: one `clear`, then
/// interleaved `emit`/`report_progress`, then exactly one of
/// `on_batch_complete` or `on_cancelled`.
pub trait ViewAdapter: Send {
    fn clear(&mut self);
    fn emit(&mut self, record: Arc<MessageRecord>, sequence: usize);
    fn report_progress(&mut self, done: usize, total: usize);
    fn on_batch_complete(&mut self);
    fn on_cancelled(&mut self, _emitted: usize) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportEvent {
    Cleared,
    Row {
        record: Arc<MessageRecord>,
        sequence: usize,
    },
    Progress {
        done: usize,
        total: usize,
    },
    BatchComplete,
    Cancelled {
        emitted: usize,
    },
}

/// Forwards worker output to the presentation thread.
pub struct ChannelViewAdapter {
    tx: mpsc::Sender<ImportEvent>,
}

impl ChannelViewAdapter {
    pub fn new(tx: mpsc::Sender<ImportEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: ImportEvent) {
        // A dropped receiver means nobody is watching; the run still finishes.
        let _ = self.tx.send(event);
    }
}

impl ViewAdapter for ChannelViewAdapter {
    fn clear(&mut self) {
        self.send(ImportEvent::Cleared);
    }

    fn emit(&mut self, record: Arc<MessageRecord>, sequence: usize) {
        self.send(ImportEvent::Row { record, sequence });
    }

    fn report_progress(&mut self, done: usize, total: usize) {
        self.send(ImportEvent::Progress { done, total });
    }

    fn on_batch_complete(&mut self) {
        self.send(ImportEvent::BatchComplete);
    }

    fn on_cancelled(&mut self, emitted: usize) {
        self.send(ImportEvent::Cancelled { emitted });
    }
}
