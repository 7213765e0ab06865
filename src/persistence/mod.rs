//! Save/load of tally, rotation and theme
//!
//! Features:
//! - `Store` key/value capability with LocalStorage and in-memory backends
//! - Lenient validation: corrupted values load as zero/default
//! - Writes may fail; callers log and carry on

pub mod validation;

#[cfg(target_arch = "wasm32")]
pub mod local;

use std::collections::HashMap;

use crate::settings::Theme;
use crate::sim::Tally;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

/// Storage keys
pub const STATS_KEY: &str = "flipper-stats-v1";
pub const ROTATION_KEY: &str = "flipper-rotation-v1";
pub const THEME_KEY: &str = "flipper-theme-v1";

/// Storage write failure
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("write failed: {0}")]
    Write(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key/value storage (LocalStorage on the web)
pub trait Store {
    /// Raw value for `key`, `None` if missing or unreadable
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Load the tally, zeroing any invalid field
    fn load_tally(&self) -> Tally {
        validation::parse_tally(self.get_item(STATS_KEY).as_deref())
    }

    fn save_tally(&mut self, tally: &Tally) -> Result<(), StorageError> {
        let json = serde_json::to_string(tally)?;
        self.set_item(STATS_KEY, &json)
    }

    /// Load the rotation, already reduced to `[0, 360)`
    fn load_rotation(&self) -> u32 {
        validation::parse_rotation(self.get_item(ROTATION_KEY).as_deref())
    }

    fn save_rotation(&mut self, rotation: u32) -> Result<(), StorageError> {
        self.set_item(ROTATION_KEY, &rotation.to_string())
    }

    fn load_theme(&self) -> Theme {
        validation::parse_theme(self.get_item(THEME_KEY).as_deref())
    }

    fn save_theme(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.set_item(THEME_KEY, theme.as_str())
    }
}

/// In-memory store (native runner and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects every write, like a full LocalStorage quota
    pub fn read_only() -> Self {
        Self {
            items: HashMap::new(),
            read_only: true,
        }
    }

    /// Seed a raw value, bypassing validation
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }
}

impl Store for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Write(format!("quota exceeded for {key}")));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
