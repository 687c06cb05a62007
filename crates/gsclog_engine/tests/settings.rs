use std::fs;
use std::path::PathBuf;

use gsclog_engine::{
    LaunchSettings, RecentFiles, Settings, SettingsError, DEFAULT_ARGS_TEMPLATE, DEFAULT_PROGRAM,
    RECENT_CAPACITY,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn init_logging() {
    gsclog_logging::initialize_for_tests();
}

#[test]
fn sixteenth_path_evicts_the_oldest() {
    let mut recent = RecentFiles::new();
    for i in 1..=16 {
        recent.add(format!("batch{i}.xml"));
    }

    let paths: Vec<PathBuf> = recent.iter().cloned().collect();
    let expected: Vec<PathBuf> = (2..=16).map(|i| PathBuf::from(format!("batch{i}.xml"))).collect();
    assert_eq!(recent.len(), RECENT_CAPACITY);
    assert_eq!(paths, expected);
    assert_eq!(recent.iter().next_back(), Some(&PathBuf::from("batch16.xml")));
}

#[test]
fn duplicates_are_kept() {
    let mut recent = RecentFiles::new();
    recent.add("a.xml");
    recent.add("a.xml");
    assert_eq!(recent.len(), 2);
}

#[test]
fn missing_file_loads_defaults_without_problem() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let loaded = Settings::load(&temp.path().join("absent.ron"));

    assert!(loaded.problem.is_none());
    assert_eq!(loaded.settings, Settings::default());
    assert_eq!(loaded.settings.launch.program, DEFAULT_PROGRAM);
    assert_eq!(loaded.settings.launch.args_template, DEFAULT_ARGS_TEMPLATE);
}

#[test]
fn malformed_file_reports_parse_error_and_keeps_defaults() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("gsclog_settings.ron");
    fs::write(&path, "(program: \"vim\", recent: [").unwrap();

    let loaded = Settings::load(&path);

    assert!(matches!(loaded.problem, Some(SettingsError::Parse { .. })));
    assert_eq!(loaded.settings, Settings::default());
}

#[test]
fn save_then_load_restores_settings() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("gsclog_settings.ron");
    let mut settings = Settings {
        launch: LaunchSettings {
            program: "code".to_string(),
            args_template: "--goto {0}:{1}:{2}".to_string(),
        },
        recent: RecentFiles::new(),
    };
    settings.add_recent("one.xml");
    settings.add_recent("two.json");

    let written = settings.save(&path).unwrap();
    assert_eq!(written, path);

    let loaded = Settings::load(&path);
    assert!(loaded.problem.is_none());
    assert_eq!(loaded.settings, settings);
}

#[test]
fn save_overwrites_previous_file() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("gsclog_settings.ron");
    let mut settings = Settings::default();
    settings.save(&path).unwrap();

    settings.launch.program = "gvim".to_string();
    settings.save(&path).unwrap();

    assert_eq!(Settings::load(&path).settings.launch.program, "gvim");
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("gsclog_settings.ron");
    fs::write(&path, "(program: \"vim\")").unwrap();

    let loaded = Settings::load(&path);

    assert!(loaded.problem.is_none());
    assert_eq!(loaded.settings.launch.program, "vim");
    assert_eq!(loaded.settings.launch.args_template, DEFAULT_ARGS_TEMPLATE);
    assert!(loaded.settings.recent.is_empty());
}

#[test]
fn oversized_persisted_list_keeps_newest_entries() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("gsclog_settings.ron");
    let recent: Vec<String> = (1..=20).map(|i| format!("\"b{i}.xml\"")).collect();
    fs::write(&path, format!("(recent: [{}])", recent.join(", "))).unwrap();

    let loaded = Settings::load(&path).settings;

    assert_eq!(loaded.recent.len(), RECENT_CAPACITY);
    assert_eq!(loaded.recent.iter().next(), Some(&PathBuf::from("b6.xml")));
    assert_eq!(loaded.recent.iter().next_back(), Some(&PathBuf::from("b20.xml")));
}

#[test]
fn save_failure_is_reported_and_memory_untouched() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();
    let path = blocker.join("gsclog_settings.ron");

    let mut settings = Settings::default();
    settings.add_recent("kept.xml");
    let before = settings.clone();

    assert!(matches!(settings.save(&path), Err(SettingsError::Save(_))));
    assert_eq!(settings, before);
}
