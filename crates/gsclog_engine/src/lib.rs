//! Log viewer engine: import worker, settings persistence and editor launch.
mod adapter;
mod batch;
mod launch;
mod persist;
mod settings;
mod worker;

pub use adapter::{ChannelViewAdapter, ImportEvent, ViewAdapter};
pub use batch::{load_batch, parse_xml_batch, BatchError};
pub use launch::{format_launch, launch, split_args, FormatError, LaunchCommand, LaunchError};
pub use persist::{AtomicFileWriter, PersistError};
pub use settings::{
    LaunchSettings, LoadedSettings, RecentFiles, Settings, SettingsError, DEFAULT_ARGS_TEMPLATE,
    DEFAULT_PROGRAM, RECENT_CAPACITY,
};
pub use worker::{CancelHandle, ImportWorker, RunOutcome, RunStatus, WorkerError};
