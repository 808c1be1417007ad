//! User settings persisted in the OS config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::SettingsError;
use crate::model::CurrentUser;

/// Overrides the project data file location.
pub const DATA_FILE_ENV: &str = "PROJECT_DESK_DATA";

const APP_DIR: &str = "ProjectDesk";
const SETTINGS_FILE: &str = "settings.json";
const DATA_FILE: &str = "projects.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Dark,
    Light,
}

impl ColorMode {
    pub fn toggled(self) -> Self {
        match self {
            ColorMode::Dark => ColorMode::Light,
            ColorMode::Light => ColorMode::Dark,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub color_mode: ColorMode,
    /// Profile of the signed-in user, if any.
    pub user: Option<CurrentUser>,
    /// Explicit project data file; the data directory is used otherwise.
    pub data_file: Option<PathBuf>,
}

/// Where settings live and where project data goes by default.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
    data_dir: PathBuf,
}

impl SettingsFile {
    /// The platform config/data directories, or the working directory when
    /// they cannot be determined.
    pub fn default_location() -> Self {
        match directories::ProjectDirs::from("", "", APP_DIR) {
            Some(dirs) => Self {
                path: dirs.config_dir().join(SETTINGS_FILE),
                data_dir: dirs.data_dir().to_path_buf(),
            },
            None => {
                warn!("no home directory found, keeping settings in the working directory");
                Self::in_dir(".")
            }
        }
    }

    /// Settings and data side by side in `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            path: dir.join(SETTINGS_FILE),
            data_dir: dir.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Read settings, falling back to defaults on any problem.
    pub fn load(&self) -> Settings {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Settings::default(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "cannot read settings, using defaults");
                return Settings::default();
            }
        };
        serde_json::from_str(&json).unwrap_or_else(|err| {
            warn!(path = %self.path.display(), error = %err, "invalid settings, using defaults");
            Settings::default()
        })
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// The project data file: `$PROJECT_DESK_DATA`, then the configured
    /// file, then `projects.json` in the data directory.
    pub fn data_file(&self, settings: &Settings) -> PathBuf {
        self.resolve_data_file(settings, std::env::var_os(DATA_FILE_ENV).map(PathBuf::from))
    }

    fn resolve_data_file(&self, settings: &Settings, env_override: Option<PathBuf>) -> PathBuf {
        if let Some(path) = env_override.filter(|p| !p.as_os_str().is_empty()) {
            info!(path = %path.display(), "{DATA_FILE_ENV} set, using it for project data");
            return path;
        }
        settings
            .data_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DATA_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> CurrentUser {
        CurrentUser {
            id: "u-1".into(),
            display_name: "Ada".into(),
            email: "ada@example.com".into(),
        }
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = SettingsFile::in_dir(dir.path());
        assert_eq!(file.load(), Settings::default());
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = SettingsFile::in_dir(dir.path());
        std::fs::write(file.path(), "[1, 2").unwrap();
        assert_eq!(file.load(), Settings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let file = SettingsFile::in_dir(dir.path().join("config"));
        let settings = Settings {
            color_mode: ColorMode::Light,
            user: Some(user()),
            data_file: None,
        };
        file.save(&settings).unwrap();
        assert_eq!(file.load(), settings);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = SettingsFile::in_dir(dir.path());
        std::fs::write(file.path(), r#"{"colorMode":"light"}"#).unwrap();
        let settings = file.load();
        assert_eq!(settings.color_mode, ColorMode::Light);
        assert!(settings.user.is_none());
    }

    #[test]
    fn data_file_precedence() {
        let file = SettingsFile::in_dir("/tmp/desk");
        let mut settings = Settings::default();
        assert_eq!(
            file.resolve_data_file(&settings, None),
            PathBuf::from("/tmp/desk/projects.json")
        );

        settings.data_file = Some(PathBuf::from("/srv/projects.json"));
        assert_eq!(
            file.resolve_data_file(&settings, None),
            PathBuf::from("/srv/projects.json")
        );
        assert_eq!(
            file.resolve_data_file(&settings, Some(PathBuf::from("/env/p.json"))),
            PathBuf::from("/env/p.json")
        );
        assert_eq!(
            file.resolve_data_file(&settings, Some(PathBuf::new())),
            PathBuf::from("/srv/projects.json")
        );
    }

    #[test]
    fn color_mode_toggles() {
        assert_eq!(ColorMode::Dark.toggled(), ColorMode::Light);
        assert_eq!(ColorMode::Light.toggled().toggled(), ColorMode::Light);
    }
}
