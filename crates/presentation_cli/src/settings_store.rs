//! Settings file
//!
//! The CLI acts as the host of the configuration form: options emitted by the
//! editor are marked saved and written to a JSON file.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use application::OptionsHost;
use domain::DataSourceSettings;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

/// Settings file errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// JSON file holding the data source options
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    last_error: Mutex<Option<SettingsError>>,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_error: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored options; a missing file yields `None`
    pub fn load(&self) -> Result<Option<DataSourceSettings>, SettingsError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path).map_err(|source| SettingsError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| SettingsError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    /// Write the options as pretty JSON
    pub fn save(&self, settings: &DataSourceSettings) -> Result<(), SettingsError> {
        let write_err = |source| SettingsError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(settings).map_err(|e| SettingsError::Parse {
            path: self.path.clone(),
            source: e,
        })?;
        let mut file = self.open_private().map_err(write_err)?;
        file.write_all(json.as_bytes()).map_err(write_err)?;

        debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// Open the file for writing, readable by the owner only
    ///
    /// The file holds the API key: a new file is created with mode 0600 and
    /// an existing one is restricted before it is truncated.
    fn open_private(&self) -> std::io::Result<File> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            options.mode(0o600);
            if self.path.exists() {
                fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
            }
        }

        options.open(&self.path)
    }

    /// Error of the last save triggered by the editor, if any
    pub fn take_error(&self) -> Option<SettingsError> {
        self.last_error.lock().take()
    }
}

impl OptionsHost for SettingsStore {
    fn on_options_change(&self, mut options: DataSourceSettings) {
        options.mark_saved();
        if let Err(e) = self.save(&options) {
            *self.last_error.lock() = Some(e);
        }
    }
}
