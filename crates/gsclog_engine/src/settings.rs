use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gsclog_logging::{gsclog_error, gsclog_info, gsclog_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AtomicFileWriter, PersistError};

/// Maximum number of entries kept in the recent-file list.
pub const RECENT_CAPACITY: usize = 15;

pub const DEFAULT_PROGRAM: &str = "notepad++";
pub const DEFAULT_ARGS_TEMPLATE: &str = "\"{0}\" -n{1} -c{2}";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("settings file {} is malformed: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("cannot serialize settings: {0}")]
    Serialize(String),
    #[error("cannot save settings: {0}")]
    Save(#[from] PersistError),
}

/// Editor program and argument template used to open a source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSettings {
    pub program: String,
    /// Positional template: `{0}` module, `{1}` line, `{2}` column.
    pub args_template: String,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            args_template: DEFAULT_ARGS_TEMPLATE.to_string(),
        }
    }
}

/// Bounded list of recently opened batch files, oldest first.
/// Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecentFiles {
    entries: VecDeque<PathBuf>,
}

impl RecentFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `path`, evicting the oldest entry once over capacity.
    pub fn add(&mut self, path: impl Into<PathBuf>) {
        self.entries.push_back(path.into());
        while self.entries.len() > RECENT_CAPACITY {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first; `.rev()` gives the newest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PathBuf> + ExactSizeIterator {
        self.entries.iter()
    }
}

impl FromIterator<PathBuf> for RecentFiles {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        let mut recent = RecentFiles::new();
        for path in iter {
            recent.add(path);
        }
        recent
    }
}

/// Session-owned settings value. Loaded once, saved after each edit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub launch: LaunchSettings,
    pub recent: RecentFiles,
}

/// Result of [`Settings::load`]: usable settings plus the problem, if any,
/// that forced a fallback to defaults.
#[derive(Debug)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub problem: Option<SettingsError>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct PersistedSettings {
    program: String,
    args_template: String,
    recent: Vec<PathBuf>,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Settings::default().to_persisted()
    }
}

impl Settings {
    /// Reads settings from `path`. A missing file yields defaults silently;
    /// an unreadable or malformed one yields defaults plus the problem.
    pub fn load(path: &Path) -> LoadedSettings {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                gsclog_info!("No settings at {:?}; using defaults", path);
                return LoadedSettings {
                    settings: Settings::default(),
                    problem: None,
                };
            }
            Err(err) => {
                gsclog_warn!("Failed to read settings from {:?}: {}", path, err);
                return LoadedSettings {
                    settings: Settings::default(),
                    problem: Some(SettingsError::Read {
                        path: path.to_path_buf(),
                        source: err,
                    }),
                };
            }
        };

        match ron::from_str::<PersistedSettings>(&content) {
            Ok(persisted) => {
                gsclog_info!("Loaded settings from {:?}", path);
                LoadedSettings {
                    settings: Settings::from_persisted(persisted),
                    problem: None,
                }
            }
            Err(err) => {
                gsclog_warn!("Failed to parse settings from {:?}: {}", path, err);
                LoadedSettings {
                    settings: Settings::default(),
                    problem: Some(SettingsError::Parse {
                        path: path.to_path_buf(),
                        message: err.to_string(),
                    }),
                }
            }
        }
    }

    /// Overwrites `path` with the current settings.
    pub fn save(&self, path: &Path) -> Result<PathBuf, SettingsError> {
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&self.to_persisted(), pretty)
            .map_err(|err| SettingsError::Serialize(err.to_string()))?;

        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                SettingsError::Save(PersistError::OutputDir(format!(
                    "{path:?} does not name a file"
                )))
            })?;
        let writer = AtomicFileWriter::for_target(path);
        writer.write(filename, &content).map_err(|err| {
            gsclog_error!("Failed to write settings to {:?}: {}", path, err);
            SettingsError::Save(err)
        })
    }

    pub fn add_recent(&mut self, path: impl Into<PathBuf>) {
        self.recent.add(path);
    }

    fn to_persisted(&self) -> PersistedSettings {
        PersistedSettings {
            program: self.launch.program.clone(),
            args_template: self.launch.args_template.clone(),
            recent: self.recent.iter().cloned().collect(),
        }
    }

    fn from_persisted(persisted: PersistedSettings) -> Self {
        Self {
            launch: LaunchSettings {
                program: persisted.program,
                args_template: persisted.args_template,
            },
            recent: persisted.recent.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_reads_in_reverse_insertion_order() {
        let recent: RecentFiles = ["a.xml", "b.xml", "c.xml"].into_iter().map(PathBuf::from).collect();
        let newest_first: Vec<&PathBuf> = recent.iter().rev().collect();
        assert_eq!(
            newest_first,
            vec![
                &PathBuf::from("c.xml"),
                &PathBuf::from("b.xml"),
                &PathBuf::from("a.xml")
            ]
        );
        assert_eq!(recent.iter().rev().nth(1), Some(&PathBuf::from("b.xml")));
    }
}
