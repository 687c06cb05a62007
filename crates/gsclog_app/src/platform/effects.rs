use std::sync::mpsc;
use std::thread;

use gsclog_core::{Batch, FilterPolicy, Msg};
use gsclog_engine::{
    launch, ChannelViewAdapter, ImportEvent, ImportWorker, LaunchSettings, RunStatus,
};
use gsclog_logging::{gsclog_debug, gsclog_info, gsclog_warn};

use super::app::AppEvent;

/// Executes core effects against the import worker and the editor launcher.
pub struct EffectRunner {
    worker: ImportWorker,
    import_tx: mpsc::Sender<ImportEvent>,
}

impl EffectRunner {
    pub fn new(app_tx: mpsc::Sender<AppEvent>) -> Self {
        let (import_tx, import_rx) = mpsc::channel();
        let runner = Self {
            worker: ImportWorker::new(),
            import_tx,
        };
        spawn_event_loop(import_rx, app_tx);
        runner
    }

    /// Starts an import; a rejection comes back as a message for the view.
    pub fn start_import(&self, batch: Option<&Batch>, policy: FilterPolicy) -> Option<Msg> {
        let Some(batch) = batch else {
            return Some(Msg::StartRejected("no batch loaded".to_string()));
        };
        let adapter = ChannelViewAdapter::new(self.import_tx.clone());
        match self.worker.start(batch.clone(), policy, adapter) {
            Ok(run_id) => {
                gsclog_info!("StartImport run={} records={} policy={:?}", run_id, batch.len(), policy);
                None
            }
            Err(err) => {
                gsclog_warn!("StartImport rejected: {}", err);
                Some(Msg::StartRejected(err.to_string()))
            }
        }
    }

    pub fn cancel_import(&self) {
        if let Err(err) = self.worker.cancel() {
            gsclog_debug!("CancelImport ignored: {}", err);
        }
    }

    pub fn open_in_editor(
        &self,
        settings: &LaunchSettings,
        module: &str,
        line: u32,
        column: u32,
    ) -> Option<Msg> {
        let result = settings
            .command(module, line, column)
            .and_then(|command| launch(&command));
        match result {
            Ok(()) => None,
            Err(err) => {
                gsclog_warn!("OpenInEditor failed for {}:{}:{}: {}", module, line, column, err);
                Some(Msg::LaunchFailed(err.to_string()))
            }
        }
    }

    pub fn status(&self) -> RunStatus {
        self.worker.status()
    }

    /// Waits for the current run thread to exit.
    pub fn join(&self) {
        self.worker.wait();
    }
}

fn spawn_event_loop(import_rx: mpsc::Receiver<ImportEvent>, app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for event in import_rx {
            if app_tx.send(AppEvent::Core(map_event(event))).is_err() {
                break;
            }
        }
    });
}

fn map_event(event: ImportEvent) -> Msg {
    match event {
        ImportEvent::Cleared => Msg::RowsCleared,
        ImportEvent::Row { record, sequence } => Msg::RowEmitted { record, sequence },
        ImportEvent::Progress { done, total } => Msg::Progress { done, total },
        ImportEvent::BatchComplete => Msg::BatchComplete,
        ImportEvent::Cancelled { emitted } => Msg::RunCancelled { emitted },
    }
}
