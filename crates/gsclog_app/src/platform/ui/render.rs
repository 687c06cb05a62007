use gsclog_core::{AppViewModel, Column, FilterPolicy, RowView, RunState, SortDirection, StatusView};

/// Widest a column may grow when auto-sizing.
const MAX_COLUMN_WIDTH: usize = 72;
const DEFAULT_WIDTHS: [usize; 7] = [4, 7, 48, 28, 5, 6, 6];
const SEPARATOR: &str = "  ";

/// Column widths of the message table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnWidths([usize; 7]);

impl Default for ColumnWidths {
    fn default() -> Self {
        Self(DEFAULT_WIDTHS)
    }
}

impl ColumnWidths {
    /// Fits every column to its widest cell or title.
    pub fn autosize(rows: &[RowView]) -> Self {
        let mut widths = [0; 7];
        for column in Column::ALL {
            let widest = rows
                .iter()
                .map(|row| row.cell(column).chars().count())
                .max()
                .unwrap_or(0);
            widths[column.index()] = widest
                .max(header_label(column, None).chars().count() + 2)
                .min(MAX_COLUMN_WIDTH);
        }
        Self(widths)
    }

    fn get(&self, column: Column) -> usize {
        self.0[column.index()]
    }
}

pub fn status_line(view: &StatusView<'_>) -> String {
    let run = match view.run {
        RunState::Idle => "Idle",
        RunState::Running => "Running",
        RunState::Cancelling => "Cancelling",
    };
    let policy = match view.policy {
        FilterPolicy::PassThrough => "all messages",
        FilterPolicy::FirstOccurrencePerText => "dedup",
    };
    let source = view.source.unwrap_or("no batch");
    let mut line = format!(
        "{run} | {done}/{total} | {rows} rows | {policy} | {source}",
        done = view.done,
        total = view.total,
        rows = view.rows,
    );
    if let Some(status) = view.status {
        line.push_str(" | ");
        line.push_str(status);
    }
    line
}

pub fn table(view: &AppViewModel, widths: &ColumnWidths) -> String {
    let mut out = String::new();
    let header: Vec<String> = Column::ALL
        .iter()
        .map(|&column| {
            let sort = view
                .sort
                .filter(|(active, _)| *active == column)
                .map(|(_, direction)| direction);
            fit(&header_label(column, sort), widths.get(column))
        })
        .collect();
    out.push_str(header.join(SEPARATOR).trim_end());
    out.push('\n');

    let rule: Vec<String> = Column::ALL
        .iter()
        .map(|&column| "-".repeat(widths.get(column)))
        .collect();
    out.push_str(&rule.join(SEPARATOR));
    out.push('\n');

    for row in &view.rows {
        let cells: Vec<String> = Column::ALL
            .iter()
            .map(|&column| fit(row.cell(column), widths.get(column)))
            .collect();
        out.push_str(cells.join(SEPARATOR).trim_end());
        out.push('\n');
    }
    out
}

fn header_label(column: Column, sort: Option<SortDirection>) -> String {
    match sort {
        Some(SortDirection::Ascending) => format!("{} ^", column.title()),
        Some(SortDirection::Descending) => format!("{} v", column.title()),
        None => column.title().to_string(),
    }
}

/// Pads or truncates `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        format!("{text:<width$}")
    } else if width == 0 {
        String::new()
    } else {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('~');
        cut
    }
}
