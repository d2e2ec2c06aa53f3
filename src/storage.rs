//! Seed and settings persistence.
//!
//! A `SeedStore` is a plain string key/value capability handed to the driver.
//! The automaton itself never touches storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::automaton::Seed;
use crate::driver::PlayerSettings;
use crate::error::Result;

pub const SEED_KEY: &str = "seed";
pub const SETTINGS_KEY: &str = "input_state";

pub trait SeedStore {
    fn save(&mut self, key: &str, value: &str) -> Result<()>;

    fn load(&self, key: &str) -> Result<Option<String>>;
}

/// Store that lives as long as the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SeedStore for MemoryStore {
    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }
}

/// All keys in one JSON object on disk, rewritten on every save.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&text)?)
    }
}

impl SeedStore for JsonFileStore {
    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        debug!(path = %self.path.display(), key, "saved");
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.get(key).cloned())
    }
}

fn save_json<S, T>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    S: SeedStore + ?Sized,
    T: Serialize,
{
    store.save(key, &serde_json::to_string(value)?)
}

fn load_json<S, T>(store: &S, key: &str) -> Result<Option<T>>
where
    S: SeedStore + ?Sized,
    T: DeserializeOwned,
{
    store
        .load(key)?
        .map(|text| serde_json::from_str(&text))
        .transpose()
        .map_err(Into::into)
}

/// Persist a seed as a JSON list of `[x, y]` pairs.
pub fn save_seed<S: SeedStore + ?Sized>(store: &mut S, seed: &Seed) -> Result<()> {
    save_json(store, SEED_KEY, seed)
}

pub fn load_seed<S: SeedStore + ?Sized>(store: &S) -> Result<Option<Seed>> {
    load_json(store, SEED_KEY)
}

pub fn save_settings<S>(store: &mut S, settings: &PlayerSettings) -> Result<()>
where
    S: SeedStore + ?Sized,
{
    save_json(store, SETTINGS_KEY, settings)
}

pub fn load_settings<S: SeedStore + ?Sized>(store: &S) -> Result<Option<PlayerSettings>> {
    load_json(store, SETTINGS_KEY)
}

#[cfg(test)]
mod tests {
    use super::{
        JsonFileStore, MemoryStore, SeedStore, load_seed, load_settings, save_seed, save_settings,
    };
    use crate::driver::PlayerSettings;
    use crate::error::LifeError;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.load("seed"), Ok(None));

        save_seed(&mut store, &vec![(1, 2), (3, 4)]).unwrap();
        assert_eq!(store.load("seed"), Ok(Some("[[1,2],[3,4]]".to_string())));
        assert_eq!(load_seed(&store), Ok(Some(vec![(1, 2), (3, 4)])));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn json_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("life.json");
        let mut store = JsonFileStore::new(&path);
        assert_eq!(load_seed(&store), Ok(None));

        let settings = PlayerSettings {
            fps: 5,
            ..PlayerSettings::default()
        };
        save_settings(&mut store, &settings).unwrap();
        save_seed(&mut store, &vec![(0, 0)]).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(load_settings(&reopened), Ok(Some(settings)));
        assert_eq!(load_seed(&reopened), Ok(Some(vec![(0, 0)])));
    }

    #[test]
    fn corrupt_values_surface_as_storage_errors() {
        let mut store = MemoryStore::new();
        store.save("seed", "not json").unwrap();
        assert!(matches!(load_seed(&store), Err(LifeError::Storage(_))));
    }
}
