use std::sync::Arc;

use crate::view_model::{AppViewModel, StatusView};
use crate::{Column, FilterPolicy, MessageRecord, RowView, SortComparator};

/// Lifecycle of an import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Cancelling,
}

/// Presentation state. Sole owner of the rendered rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    run: RunState,
    done: usize,
    total: usize,
    policy: FilterPolicy,
    source: Option<String>,
    batch_len: Option<usize>,
    rows: Vec<RowView>,
    comparator: SortComparator,
    status: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            run: self.run,
            done: self.done,
            total: self.total,
            policy: self.policy,
            source: self.source.clone(),
            rows: self.rows.clone(),
            sort: self
                .comparator
                .target_column()
                .map(|column| (column, self.comparator.direction())),
            start_enabled: self.run == RunState::Idle,
            cancel_enabled: self.run == RunState::Running,
            status: self.status.clone(),
            dirty: self.dirty,
        }
    }

    /// Status summary without cloning the rows.
    pub fn status_view(&self) -> StatusView<'_> {
        StatusView {
            run: self.run,
            done: self.done,
            total: self.total,
            rows: self.rows.len(),
            policy: self.policy,
            source: self.source.as_deref(),
            status: self.status.as_deref(),
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run
    }

    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    pub fn rows(&self) -> &[RowView] {
        &self.rows
    }

    pub fn row(&self, position: usize) -> Option<&RowView> {
        self.rows.get(position)
    }

    pub fn has_batch(&self) -> bool {
        self.batch_len.is_some()
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
        self.mark_dirty();
    }

    pub(crate) fn set_batch(&mut self, source: String, total: usize) {
        self.source = Some(source);
        self.batch_len = Some(total);
        self.total = total;
        self.done = 0;
        self.status = None;
        self.mark_dirty();
    }

    pub(crate) fn set_policy(&mut self, policy: FilterPolicy) {
        if self.policy != policy {
            self.policy = policy;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_run(&mut self) {
        self.run = RunState::Running;
        self.done = 0;
        self.total = self.batch_len.unwrap_or(0);
        self.status = None;
        self.mark_dirty();
    }

    pub(crate) fn request_cancel(&mut self) {
        self.run = RunState::Cancelling;
        self.mark_dirty();
    }

    pub(crate) fn finish_run(&mut self, status: String) {
        self.run = RunState::Idle;
        self.status = Some(status);
        self.mark_dirty();
    }

    pub(crate) fn clear_rows(&mut self) {
        self.rows.clear();
        self.mark_dirty();
    }

    pub(crate) fn push_row(&mut self, record: Arc<MessageRecord>, sequence: usize) {
        let row = RowView::new(record, sequence);
        let at = self.comparator.insertion_point(&self.rows, &row);
        self.rows.insert(at, row);
        self.mark_dirty();
    }

    pub(crate) fn apply_progress(&mut self, done: usize, total: usize) {
        self.done = done;
        self.total = total;
        self.mark_dirty();
    }

    pub(crate) fn select_column(&mut self, column: Column) {
        self.comparator.on_column_selected(column);
        self.comparator.sort(&mut self.rows);
        self.mark_dirty();
    }
}
