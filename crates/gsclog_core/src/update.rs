use crate::{AppState, Effect, FilterPolicy, Msg, RunState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::BatchLoaded { source, total } => {
            if state.run_state() == RunState::Idle {
                state.set_batch(source, total);
            } else {
                state.set_status("cannot replace the batch while an import is running");
            }
            Vec::new()
        }
        Msg::DedupToggled(dedup) => {
            // Takes effect on the next run; the active worker keeps its policy.
            state.set_policy(FilterPolicy::from_dedup(dedup));
            Vec::new()
        }
        Msg::StartClicked => match state.run_state() {
            RunState::Idle if state.has_batch() => {
                state.begin_run();
                vec![Effect::StartImport {
                    policy: state.policy(),
                }]
            }
            RunState::Idle => {
                state.set_status("no batch loaded");
                Vec::new()
            }
            RunState::Running | RunState::Cancelling => {
                state.set_status("import already running");
                Vec::new()
            }
        },
        Msg::CancelClicked => {
            if state.run_state() == RunState::Running {
                state.request_cancel();
                vec![Effect::CancelImport]
            } else {
                Vec::new()
            }
        }
        Msg::ColumnClicked(column) => {
            state.select_column(column);
            Vec::new()
        }
        Msg::RowActivated { position } => {
            let target = state.row(position).map(|row| {
                (
                    row.sequence,
                    row.record.module().to_string(),
                    row.record.first_location(),
                )
            });
            match target {
                Some((_, module, Some(location))) => vec![Effect::OpenInEditor {
                    module,
                    line: location.line,
                    column: location.column,
                }],
                Some((sequence, _, None)) => {
                    state.set_status(format!("#{sequence} has no source location"));
                    Vec::new()
                }
                None => {
                    state.set_status(format!("no row at position {}", position + 1));
                    Vec::new()
                }
            }
        }
        Msg::RowsCleared => {
            state.clear_rows();
            Vec::new()
        }
        Msg::RowEmitted { record, sequence } => {
            state.push_row(record, sequence);
            Vec::new()
        }
        Msg::Progress { done, total } => {
            state.apply_progress(done, total);
            Vec::new()
        }
        Msg::BatchComplete => {
            let shown = state.rows().len();
            state.finish_run(format!("import complete: {shown} rows"));
            vec![Effect::AutoSizeColumns]
        }
        Msg::RunCancelled { emitted } => {
            state.finish_run(format!("import cancelled after {emitted} rows"));
            Vec::new()
        }
        Msg::StartRejected(reason) => {
            // The core went Running on StartClicked; the worker never did.
            state.finish_run(format!("import not started: {reason}"));
            Vec::new()
        }
        Msg::LaunchFailed(reason) => {
            state.set_status(format!("could not open editor: {reason}"));
            Vec::new()
        }
        Msg::SettingsProblem(reason) => {
            state.set_status(reason);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
