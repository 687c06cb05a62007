use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::Local;
use gsclog_core::{update, AppState, Batch, Effect, Msg, RunState};
use gsclog_engine::{load_batch, Settings};
use gsclog_logging::{gsclog_info, gsclog_warn};

use super::effects::EffectRunner;
use super::ui::commands::{self, Command, LoadTarget};
use super::ui::render::{self, ColumnWidths};
use crate::Cli;

const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Everything the session loop reacts to.
pub enum AppEvent {
    /// Message for the core state machine.
    Core(Msg),
    /// A parsed prompt line.
    Command(Command),
    /// A prompt line that did not parse.
    Invalid(String),
    /// Stdin reached end of file.
    InputClosed,
}

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let (app_tx, app_rx) = mpsc::channel::<AppEvent>();
    let mut session = Session::new(cli.settings.clone(), EffectRunner::new(app_tx.clone()));

    if let Some(path) = &cli.batch {
        session.load(path);
    }
    if cli.dedup {
        session.dispatch(Msg::DedupToggled(true));
    }
    if cli.auto_start {
        session.dispatch(Msg::StartClicked);
    }
    session.print_status();
    println!("type help for commands");

    spawn_input_reader(app_tx.clone());

    // Background tick to throttle progress output.
    thread::spawn(move || {
        while app_tx.send(AppEvent::Core(Msg::Tick)).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    while let Ok(event) = app_rx.recv() {
        match event {
            AppEvent::Core(msg) => session.dispatch(msg),
            AppEvent::Command(Command::Quit) => break,
            AppEvent::Command(command) => session.handle_command(command),
            AppEvent::Invalid(reason) => {
                if !reason.is_empty() {
                    println!("{reason}");
                }
            }
            AppEvent::InputClosed => session.quit_when_idle = true,
        }
        if session.quit_when_idle && session.state.run_state() == RunState::Idle {
            break;
        }
    }

    session.shutdown();
    Ok(())
}

fn spawn_input_reader(app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let event = match commands::parse(&line) {
                Ok(command) => AppEvent::Command(command),
                Err(reason) => AppEvent::Invalid(reason),
            };
            if app_tx.send(event).is_err() {
                return;
            }
        }
        let _ = app_tx.send(AppEvent::InputClosed);
    });
}

/// Owns the settings, the loaded batch and the core state for one console session.
struct Session {
    state: AppState,
    settings: Settings,
    settings_path: PathBuf,
    batch: Option<Batch>,
    runner: EffectRunner,
    widths: ColumnWidths,
    progress_pending: bool,
    last_status: String,
    quit_when_idle: bool,
}

impl Session {
    fn new(settings_path: PathBuf, runner: EffectRunner) -> Self {
        let loaded = Settings::load(&settings_path);
        let mut session = Self {
            state: AppState::new(),
            settings: loaded.settings,
            settings_path,
            batch: None,
            runner,
            widths: ColumnWidths::default(),
            progress_pending: false,
            last_status: String::new(),
            quit_when_idle: false,
        };
        if let Some(problem) = loaded.problem {
            session.dispatch(Msg::SettingsProblem(format!(
                "settings reset to defaults: {problem}"
            )));
        }
        session
    }

    /// Runs a message through `update`, then its effects and any follow-up messages.
    fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let is_tick = msg == Msg::Tick;
            let is_worker_msg = matches!(
                msg,
                Msg::RowsCleared | Msg::RowEmitted { .. } | Msg::Progress { .. }
            );

            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;

            for effect in effects {
                if let Some(follow_up) = self.apply(effect) {
                    inbox.push_back(follow_up);
                }
            }

            if self.state.consume_dirty() {
                if is_worker_msg {
                    // Rows stream in quickly; the next tick reports them.
                    self.progress_pending = true;
                } else {
                    self.print_status();
                }
            } else if is_tick && self.progress_pending {
                self.progress_pending = false;
                self.print_status();
            }
        }
    }

    fn apply(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::StartImport { policy } => self.runner.start_import(self.batch.as_ref(), policy),
            Effect::CancelImport => {
                self.runner.cancel_import();
                None
            }
            Effect::AutoSizeColumns => {
                let view = self.state.view();
                self.widths = ColumnWidths::autosize(&view.rows);
                print!("{}", render::table(&view, &self.widths));
                None
            }
            Effect::OpenInEditor {
                module,
                line,
                column,
            } => self
                .runner
                .open_in_editor(&self.settings.launch, &module, line, column),
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Start => self.dispatch(Msg::StartClicked),
            Command::Cancel => self.dispatch(Msg::CancelClicked),
            Command::Dedup(on) => {
                self.dispatch(Msg::DedupToggled(on));
                if self.state.run_state() != RunState::Idle {
                    println!("dedup applies to the next import");
                }
            }
            Command::Sort(column) => {
                self.dispatch(Msg::ColumnClicked(column));
                self.print_table();
            }
            Command::Open(sequence) => {
                match self
                    .state
                    .rows()
                    .iter()
                    .position(|row| row.sequence == sequence)
                {
                    Some(position) => self.dispatch(Msg::RowActivated { position }),
                    None => println!("no message #{sequence} in the list"),
                }
            }
            Command::Rows => self.print_table(),
            Command::Load(target) => self.load_target(target),
            Command::Recent => self.print_recent(),
            Command::SetProgram(program) => {
                self.settings.launch.program = program;
                self.save_settings();
            }
            Command::SetArgs(template) => {
                self.settings.launch.args_template = template;
                self.save_settings();
            }
            Command::Settings => {
                println!("program: {}", self.settings.launch.program);
                println!("args:    {}", self.settings.launch.args_template);
                println!("file:    {}", self.settings_path.display());
            }
            Command::Status => {
                let status = self.runner.status();
                println!(
                    "worker: {:?} {}/{}",
                    status.state, status.done, status.total
                );
                self.last_status.clear();
                self.print_status();
            }
            Command::Help => println!("{}", commands::HELP),
            Command::Quit => {}
        }
    }

    fn load_target(&mut self, target: LoadTarget) {
        let path = match target {
            LoadTarget::Path(path) => path,
            LoadTarget::Recent(n) => {
                // The list prints newest first.
                match self.settings.recent.iter().rev().nth(n - 1) {
                    Some(path) => path.clone(),
                    None => {
                        println!("no recent entry #{n}");
                        return;
                    }
                }
            }
        };
        self.load(&path);
    }

    fn load(&mut self, path: &Path) {
        if self.state.run_state() != RunState::Idle {
            println!("cannot load while an import is running; cancel it first");
            return;
        }
        match load_batch(path) {
            Ok(batch) => {
                let total = batch.len();
                self.batch = Some(batch);
                self.settings.add_recent(path);
                self.save_settings();
                self.dispatch(Msg::BatchLoaded {
                    source: path.display().to_string(),
                    total,
                });
            }
            Err(err) => {
                gsclog_warn!("Failed to load batch {:?}: {}", path, err);
                println!("{err}");
            }
        }
    }

    fn save_settings(&mut self) {
        match self.settings.save(&self.settings_path) {
            Ok(path) => gsclog_info!("Saved settings to {:?}", path),
            Err(err) => self.dispatch(Msg::SettingsProblem(format!("settings not saved: {err}"))),
        }
    }

    fn print_recent(&self) {
        if self.settings.recent.is_empty() {
            println!("no recent batches");
            return;
        }
        for (n, path) in self.settings.recent.iter().rev().enumerate() {
            println!("#{:<3}{}", n + 1, path.display());
        }
    }

    fn print_table(&self) {
        print!("{}", render::table(&self.state.view(), &self.widths));
    }

    fn print_status(&mut self) {
        let line = render::status_line(&self.state.status_view());
        if line != self.last_status {
            println!("[{}] {}", Local::now().format("%H:%M:%S"), line);
            self.last_status = line;
        }
    }

    fn shutdown(&mut self) {
        if self.state.run_state() != RunState::Idle {
            self.runner.cancel_import();
        }
        self.runner.join();
        gsclog_info!("Session closed");
    }
}
