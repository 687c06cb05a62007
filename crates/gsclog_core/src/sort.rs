use std::cmp::Ordering;
use std::collections::HashMap;

use crate::{Column, RowView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Single-column row comparator.
///
/// Selecting the active column again flips its direction. Switching to
/// another column restores whatever direction that column had last time
/// (ascending for a column never selected before).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortComparator {
    target: Option<Column>,
    direction: SortDirection,
    remembered: HashMap<Column, SortDirection>,
}

impl SortComparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active column, `None` until a column has been selected.
    pub fn target_column(&self) -> Option<Column> {
        self.target
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn on_column_selected(&mut self, column: Column) {
        if self.target == Some(column) {
            self.direction = self.direction.toggled();
        } else {
            self.target = Some(column);
            self.direction = self.remembered.get(&column).copied().unwrap_or_default();
        }
        self.remembered.insert(column, self.direction);
    }

    /// Ordinal comparison of the cell text at the active column.
    /// Without an active column every pair compares equal.
    pub fn compare(&self, a: &RowView, b: &RowView) -> Ordering {
        match self.target {
            Some(column) => self.direction.apply(a.cell(column).cmp(b.cell(column))),
            None => Ordering::Equal,
        }
    }

    /// Stable sort of `rows` under the current column and direction.
    pub fn sort(&self, rows: &mut [RowView]) {
        if self.target.is_some() {
            rows.sort_by(|a, b| self.compare(a, b));
        }
    }

    /// Index at which `row` keeps `rows` ordered; equal keys go last.
    pub fn insertion_point(&self, rows: &[RowView], row: &RowView) -> usize {
        if self.target.is_none() {
            return rows.len();
        }
        rows.partition_point(|existing| self.compare(existing, row) != Ordering::Greater)
    }
}
