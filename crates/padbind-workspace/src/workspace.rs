use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::parse::{parse_settings, write_settings};
use crate::settings::Settings;
use crate::yaml_store::YamlStore;
use crate::WorkspaceError;

const DEFAULT_WORKSPACE_PATH: &str = ".config/padbind";
const SETTINGS_FILE_NAME: &str = "settings.yaml";
const MAPPINGS_DIR_NAME: &str = "mappings";

/// Directory holding the editor settings and the stored mappings.
pub struct Workspace {
    path: PathBuf,
}

impl Workspace {
    pub fn new(path: Option<&Path>) -> Result<Self, WorkspaceError> {
        let path = {
            if let Some(path) = path {
                path.to_owned()
            } else {
                Self::default_path()?
            }
        };

        if !path.exists() {
            fs::create_dir_all(&path)?;
        } else if !path.is_dir() {
            return Err(WorkspaceError::PathIsNotDirectory(
                path.display().to_string(),
            ));
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings_path(&self) -> PathBuf {
        self.path.join(SETTINGS_FILE_NAME)
    }

    pub fn mappings_path(&self) -> PathBuf {
        self.path.join(MAPPINGS_DIR_NAME)
    }

    /// Mapping store backed by the workspace mappings directory.
    pub fn store(&self) -> YamlStore {
        YamlStore::new(self.mappings_path())
    }

    /// Reads the settings file. A missing file yields the defaults.
    pub fn load_settings(&self) -> Result<Settings, WorkspaceError> {
        let path = self.settings_path();
        match fs::read_to_string(&path) {
            Ok(content) => Ok(parse_settings(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no settings at {}, using defaults", path.display());
                Ok(Settings::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<(), WorkspaceError> {
        fs::write(self.settings_path(), write_settings(settings)?)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf, WorkspaceError> {
        let path = std::env::var("HOME")
            .map(PathBuf::from)
            .map(|p| p.join(DEFAULT_WORKSPACE_PATH))
            .map_err(|_| WorkspaceError::EnvVarNotSet("HOME".to_string()))?;

        Ok(path)
    }
}
