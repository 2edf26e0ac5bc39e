use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use padbind_mapping::InputMapping;

use crate::parse::{parse_mapping, write_mapping};
use crate::store::{MappingKey, MappingStore};
use crate::StoreError;

const MAPPING_EXTENSION: &str = "yaml";

/// Stores each mapping as a yaml file in a directory.
///
/// Files are named `<device>[@<game>].<profile>.yaml`. Characters outside
/// `[A-Za-z0-9_-]` in the device and game are replaced with `_`.
#[derive(Debug, Clone)]
pub struct YamlStore {
    dir: PathBuf,
}

impl YamlStore {
    /// Creates a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &MappingKey) -> PathBuf {
        self.dir.join(file_name(key))
    }
}

impl MappingStore for YamlStore {
    fn load(&self, key: &MappingKey) -> Result<Option<InputMapping>, StoreError> {
        let path = self.path_for(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mapping = parse_mapping(&content).map_err(|source| StoreError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        debug!("loaded mapping {key} from {}", path.display());
        Ok(Some(mapping))
    }

    fn save(&self, key: &MappingKey, mapping: &InputMapping) -> Result<(), StoreError> {
        let content = write_mapping(mapping)?;
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        fs::write(&path, content)?;
        debug!("saved mapping {key} to {}", path.display());
        Ok(())
    }

    fn remove(&self, key: &MappingKey) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn file_name(key: &MappingKey) -> String {
    let mut name = sanitize(&key.device);
    if let Some(game) = &key.game {
        name.push('@');
        name.push_str(&sanitize(game));
    }
    format!("{name}.{}.{MAPPING_EXTENSION}", key.profile.name())
}

fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
