//! Log viewer core: pure state machine, filter policy and row ordering.
mod effect;
mod filter;
mod msg;
mod record;
mod sort;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use filter::{FilterPolicy, RecordFilter};
pub use msg::Msg;
pub use record::{Batch, Location, MessageKind, MessageRecord};
pub use sort::{SortComparator, SortDirection};
pub use state::{AppState, RunState};
pub use update::update;
pub use view_model::{AppViewModel, Column, RowView, StatusView};
