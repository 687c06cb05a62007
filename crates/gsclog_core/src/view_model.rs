use std::fmt;
use std::sync::Arc;

use crate::{FilterPolicy, MessageRecord, RunState, SortDirection};

/// Columns of the message list, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Sequence,
    Kind,
    Text,
    Module,
    Line,
    Column,
    Target,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Sequence,
        Column::Kind,
        Column::Text,
        Column::Module,
        Column::Line,
        Column::Column,
        Column::Target,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            Column::Sequence => "#",
            Column::Kind => "Type",
            Column::Text => "Message",
            Column::Module => "Module",
            Column::Line => "Line",
            Column::Column => "Column",
            Column::Target => "Target",
        }
    }

    /// Accepts a column index or a case-insensitive title.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(index) = raw.parse::<usize>() {
            return Self::from_index(index);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|column| column.title().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A rendered list row: an accepted record plus its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub sequence: usize,
    pub record: Arc<MessageRecord>,
    cells: Vec<String>,
}

impl RowView {
    pub fn new(record: Arc<MessageRecord>, sequence: usize) -> Self {
        let location = record.first_location();
        let cells = Column::ALL
            .iter()
            .map(|column| match column {
                Column::Sequence => sequence.to_string(),
                Column::Kind => record.kind().to_string(),
                Column::Text => record.text().to_string(),
                Column::Module => record.module().to_string(),
                Column::Line => location.map(|l| l.line.to_string()).unwrap_or_default(),
                Column::Column => location.map(|l| l.column.to_string()).unwrap_or_default(),
                Column::Target => record.target().to_string(),
            })
            .collect();
        Self {
            sequence,
            record,
            cells,
        }
    }

    pub fn cell(&self, column: Column) -> &str {
        &self.cells[column.index()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub run: RunState,
    pub done: usize,
    pub total: usize,
    pub policy: FilterPolicy,
    pub source: Option<String>,
    pub rows: Vec<RowView>,
    pub sort: Option<(Column, SortDirection)>,
    pub start_enabled: bool,
    pub cancel_enabled: bool,
    pub status: Option<String>,
    pub dirty: bool,
}

/// Borrowed summary for the status line; cheap to build on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusView<'a> {
    pub run: RunState,
    pub done: usize,
    pub total: usize,
    pub rows: usize,
    pub policy: FilterPolicy,
    pub source: Option<&'a str>,
    pub status: Option<&'a str>,
}
