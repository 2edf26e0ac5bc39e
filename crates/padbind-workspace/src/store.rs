use std::fmt;
use std::sync::Mutex;

use ahash::AHashMap;
use padbind_mapping::{ControlProfile, InputMapping};

use crate::StoreError;

/// Identity of a persisted mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappingKey {
    /// Stable unique id of the device.
    pub device: Box<str>,
    pub profile: ControlProfile,
    /// Set for per-game mappings.
    pub game: Option<Box<str>>,
}

impl MappingKey {
    pub fn new(device: &str, profile: ControlProfile) -> Self {
        Self {
            device: device.into(),
            profile,
            game: None,
        }
    }

    pub fn with_game(mut self, game: Option<&str>) -> Self {
        self.game = game.map(Into::into);
        self
    }

    /// The same key for the other control profile.
    pub fn other_profile(&self) -> Self {
        Self {
            profile: self.profile.other(),
            ..self.clone()
        }
    }
}

impl fmt::Display for MappingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.device)?;
        if let Some(game) = &self.game {
            write!(f, "@{game}")?;
        }
        write!(f, " ({})", self.profile)
    }
}

/// Persistence of mappings keyed by device, profile and game.
pub trait MappingStore {
    /// Loads a mapping. Returns `None` if nothing is stored under the key.
    fn load(&self, key: &MappingKey) -> Result<Option<InputMapping>, StoreError>;

    /// Stores a mapping, replacing any previous one.
    fn save(&self, key: &MappingKey, mapping: &InputMapping) -> Result<(), StoreError>;

    /// Removes a mapping. Removing a missing mapping is not an error.
    fn remove(&self, key: &MappingKey) -> Result<(), StoreError>;
}

/// In-memory store, used when no workspace is available and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    mappings: Mutex<AHashMap<MappingKey, InputMapping>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AHashMap<MappingKey, InputMapping>> {
        self.mappings
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl MappingStore for MemoryStore {
    fn load(&self, key: &MappingKey) -> Result<Option<InputMapping>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    fn save(&self, key: &MappingKey, mapping: &InputMapping) -> Result<(), StoreError> {
        let mut stored = mapping.clone();
        stored.clear_dirty();
        self.lock().insert(key.clone(), stored);
        Ok(())
    }

    fn remove(&self, key: &MappingKey) -> Result<(), StoreError> {
        self.lock().remove(key);
        Ok(())
    }
}

impl<S: MappingStore + ?Sized> MappingStore for &S {
    fn load(&self, key: &MappingKey) -> Result<Option<InputMapping>, StoreError> {
        (**self).load(key)
    }

    fn save(&self, key: &MappingKey, mapping: &InputMapping) -> Result<(), StoreError> {
        (**self).save(key, mapping)
    }

    fn remove(&self, key: &MappingKey) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
