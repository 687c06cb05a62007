use std::sync::atomic::{AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use gsclog_core::{Batch, FilterPolicy, RecordFilter, RunState};
use gsclog_logging::{gsclog_debug, gsclog_info, gsclog_warn};
use thiserror::Error;

use crate::ViewAdapter;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("import already running")]
    AlreadyRunning,
    #[error("no import running")]
    NotRunning,
    #[error("could not spawn import thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed { emitted: usize },
    Cancelled { emitted: usize },
}

/// Point-in-time view of the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    pub state: RunState,
    pub done: usize,
    pub total: usize,
}

const IDLE: u8 = 0;
const RUNNING: u8 = 1;
const CANCELLING: u8 = 2;

#[derive(Debug, Default)]
struct Shared {
    state: AtomicU8,
    done: AtomicUsize,
    total: AtomicUsize,
}

impl Shared {
    fn state(&self) -> RunState {
        match self.state.load(Ordering::Acquire) {
            RUNNING => RunState::Running,
            CANCELLING => RunState::Cancelling,
            _ => RunState::Idle,
        }
    }

    fn set_idle(&self) {
        self.state.store(IDLE, Ordering::Release);
    }

    fn cancel(&self) -> Result<(), WorkerError> {
        self.state
            .compare_exchange(RUNNING, CANCELLING, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| WorkerError::NotRunning)
    }
}

/// Returns the worker to `Idle` if an adapter panics mid-run.
struct IdleOnPanic<'a>(&'a Shared);

impl Drop for IdleOnPanic<'_> {
    fn drop(&mut self) {
        // A normal exit has already gone Idle, and a new run may own the state by now.
        if thread::panicking() {
            self.0.set_idle();
        }
    }
}

/// Cloneable cancel trigger, usable from any thread.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    shared: Arc<Shared>,
}

impl CancelHandle {
    pub fn cancel(&self) -> Result<(), WorkerError> {
        self.shared.cancel()
    }
}

/// Streams a batch into a [`ViewAdapter`] on a dedicated thread.
///
/// One run at a time. The cancel flag is checked before every record, so a
/// cancel request stops the run before the next record is considered.
#[derive(Debug, Default)]
pub struct ImportWorker {
    shared: Arc<Shared>,
    thread: Mutex<Option<JoinHandle<RunOutcome>>>,
    runs: AtomicU64,
}

impl ImportWorker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a run. Fails with [`WorkerError::AlreadyRunning`] unless idle;
    /// a failed start leaves the adapter and any active run untouched.
    pub fn start(
        &self,
        batch: Batch,
        policy: FilterPolicy,
        adapter: impl ViewAdapter + 'static,
    ) -> Result<u64, WorkerError> {
        if self
            .shared
            .state
            .compare_exchange(IDLE, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            gsclog_warn!("start rejected: worker is {:?}", self.shared.state());
            return Err(WorkerError::AlreadyRunning);
        }

        // The previous run has reached Idle; reap its thread so runs never overlap.
        let mut slot = self.thread.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.take() {
            let _ = previous.join();
        }

        let run_id = self.runs.fetch_add(1, Ordering::Relaxed) + 1;
        self.shared.done.store(0, Ordering::Release);
        self.shared.total.store(batch.len(), Ordering::Release);

        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name(format!("gsclog-import-{run_id}"))
            .spawn(move || run_import(run_id, &batch, policy, &shared, Box::new(adapter)));
        match spawned {
            Ok(handle) => {
                *slot = Some(handle);
                Ok(run_id)
            }
            Err(err) => {
                self.shared.set_idle();
                Err(WorkerError::Spawn(err))
            }
        }
    }

    /// Requests cancellation of the active run. Only valid while `Running`.
    pub fn cancel(&self) -> Result<(), WorkerError> {
        let result = self.shared.cancel();
        match &result {
            Ok(()) => gsclog_info!("cancel requested"),
            Err(_) => gsclog_debug!("cancel ignored: worker is {:?}", self.shared.state()),
        }
        result
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn status(&self) -> RunStatus {
        RunStatus {
            state: self.shared.state(),
            done: self.shared.done.load(Ordering::Acquire),
            total: self.shared.total.load(Ordering::Acquire),
        }
    }

    /// Blocks until the latest run's thread has exited and returns its outcome.
    /// `None` when no run was started or the run thread panicked.
    pub fn wait(&self) -> Option<RunOutcome> {
        let handle = self
            .thread
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()?;
        handle.join().ok()
    }
}

fn run_import(
    run_id: u64,
    batch: &Batch,
    policy: FilterPolicy,
    shared: &Shared,
    mut adapter: Box<dyn ViewAdapter>,
) -> RunOutcome {
    gsclog_logging::set_run_id(run_id);
    let _guard = IdleOnPanic(shared);
    let total = batch.len();
    gsclog_info!("import started: {} records, policy {:?}", total, policy);

    adapter.clear();
    let mut filter = RecordFilter::new(policy);
    let mut sequence = 1;

    for record in batch.iter() {
        if shared.state() == RunState::Cancelling {
            let emitted = sequence - 1;
            shared.set_idle();
            gsclog_info!("import cancelled after {} rows", emitted);
            adapter.on_cancelled(emitted);
            return RunOutcome::Cancelled { emitted };
        }

        if filter.accept(record) {
            adapter.emit(Arc::clone(record), sequence);
            sequence += 1;
        }

        // Counts accepted rows, not considered records.
        let done = sequence - 1;
        shared.done.store(done, Ordering::Release);
        adapter.report_progress(done, total);
    }

    let emitted = sequence - 1;
    shared.set_idle();
    gsclog_info!("import complete: {} of {} records emitted", emitted, total);
    adapter.on_batch_complete();
    RunOutcome::Completed { emitted }
}
