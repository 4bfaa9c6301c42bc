//! Discovery and loading of per (item, store) model files
//!
//! Model files are named `model_<item_id>_<store_id>.json`, where the store
//! id is a state code and a store number, e.g.
//! `model_FOODS_3_090_CA_1.json`.

use crate::cache::MemoCache;
use crate::data::SeriesKey;
use crate::error::{ForecastError, Result};
use crate::models::LinearRegressor;
use crate::stores::StoreId;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

const MODEL_PREFIX: &str = "model_";
const MODEL_EXTENSION: &str = ".json";

/// File name of the model for a pair
pub fn model_file_name(key: &SeriesKey) -> String {
    format!(
        "{}{}_{}{}",
        MODEL_PREFIX, key.item_id, key.store_id, MODEL_EXTENSION
    )
}

/// Split a model file name into item id and store id
pub fn parse_model_file_name(file_name: &str) -> Option<(String, StoreId)> {
    let stem = file_name
        .strip_prefix(MODEL_PREFIX)?
        .strip_suffix(MODEL_EXTENSION)?;

    let mut parts = stem.rsplitn(3, '_');
    let number = parts.next()?;
    let state = parts.next()?;
    let item = parts.next()?;
    if item.is_empty() {
        return None;
    }

    let store = StoreId::parse(&format!("{}_{}", state, number)).ok()?;
    Some((item.to_string(), store))
}

/// Which items have a model for which stores
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    dir: PathBuf,
    stores_by_item: BTreeMap<String, BTreeSet<StoreId>>,
}

impl ModelRegistry {
    /// Scan a directory for model files. Files with other names are ignored.
    pub fn scan<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let mut stores_by_item: BTreeMap<String, BTreeSet<StoreId>> = BTreeMap::new();

        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };

            match parse_model_file_name(file_name) {
                Some((item, store)) => {
                    stores_by_item.entry(item).or_default().insert(store);
                }
                None => debug!(file = file_name, "Ignoring non-model file"),
            }
        }

        info!(
            dir = %dir.display(),
            items = stores_by_item.len(),
            "Scanned model directory"
        );

        Ok(Self {
            dir,
            stores_by_item,
        })
    }

    /// Directory the registry was scanned from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Items with at least one model, sorted
    pub fn items(&self) -> Vec<&str> {
        self.stores_by_item.keys().map(String::as_str).collect()
    }

    /// Stores with a model for `item_id`, sorted
    pub fn stores_for(&self, item_id: &str) -> Vec<&StoreId> {
        self.stores_by_item
            .get(item_id)
            .map(|stores| stores.iter().collect())
            .unwrap_or_default()
    }

    /// Stores in a state that have a model for any item, sorted
    pub fn stores_in_state(&self, state_code: &str) -> Vec<&StoreId> {
        let stores: BTreeSet<&StoreId> = self
            .stores_by_item
            .values()
            .flatten()
            .filter(|store| store.in_state(state_code))
            .collect();
        stores.into_iter().collect()
    }

    /// Items with a model for at least one of `stores`, sorted
    pub fn items_for_stores(&self, stores: &[StoreId]) -> Vec<&str> {
        self.stores_by_item
            .iter()
            .filter(|(_, available)| stores.iter().any(|store| available.contains(store)))
            .map(|(item, _)| item.as_str())
            .collect()
    }

    /// Whether a model exists for the pair
    pub fn contains(&self, item_id: &str, store: &StoreId) -> bool {
        self.stores_by_item
            .get(item_id)
            .map_or(false, |stores| stores.contains(store))
    }

    pub fn is_empty(&self) -> bool {
        self.stores_by_item.is_empty()
    }

    /// Path of the model file for a pair
    pub fn model_path(&self, key: &SeriesKey) -> PathBuf {
        self.dir.join(model_file_name(key))
    }
}

/// Registry plus a cache of loaded models
#[derive(Debug)]
pub struct ModelStore {
    registry: ModelRegistry,
    cache: MemoCache<SeriesKey, LinearRegressor>,
}

impl ModelStore {
    pub fn new(registry: ModelRegistry) -> Self {
        Self {
            registry,
            cache: MemoCache::new(),
        }
    }

    /// Scan `dir` and wrap the result
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Ok(Self::new(ModelRegistry::scan(dir)?))
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Model for a pair, loaded from disk on first use
    pub fn get(&mut self, key: &SeriesKey) -> Result<Arc<LinearRegressor>> {
        let store = StoreId::parse(&key.store_id)?;
        if !self.registry.contains(&key.item_id, &store) {
            return Err(ForecastError::ModelNotFound(key.clone()));
        }

        let path = self.registry.model_path(key);
        self.cache.get_or_try_insert_with(key, || {
            info!(path = %path.display(), "Loading model");
            LinearRegressor::from_json_file(&path)
        })
    }

    /// Forget a loaded model so the next lookup reads the file again
    pub fn invalidate(&mut self, key: &SeriesKey) -> bool {
        self.cache.invalidate(key)
    }

    /// Rescan the directory and drop every loaded model
    pub fn refresh(&mut self) -> Result<()> {
        self.registry = ModelRegistry::scan(self.registry.dir())?;
        self.cache.clear();
        Ok(())
    }

    /// Number of models currently loaded
    pub fn loaded(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Regressor;
    use tempfile::TempDir;

    #[test]
    fn test_parse_model_file_name() {
        let (item, store) = parse_model_file_name("model_FOODS_3_090_CA_1.json").unwrap();
        assert_eq!(item, "FOODS_3_090");
        assert_eq!(store.to_string(), "CA_1");

        assert!(parse_model_file_name("model_CA_1.json").is_none());
        assert!(parse_model_file_name("model_FOODS_1_ca_1.json").is_none());
        assert!(parse_model_file_name("model_FOODS_1_CA_1.sav").is_none());
        assert!(parse_model_file_name("notes.txt").is_none());
    }

    #[test]
    fn test_file_name_round_trip() {
        let key = SeriesKey::new("HOBBIES_1_001", "WI_2");
        let (item, store) = parse_model_file_name(&model_file_name(&key)).unwrap();
        assert_eq!(item, key.item_id);
        assert_eq!(store.to_string(), key.store_id);
    }

    #[test]
    fn test_zero_padded_store_loads_through_listed_id() {
        let dir = TempDir::new().unwrap();
        let model = LinearRegressor::new("padded", 1.0);
        fs::write(
            dir.path().join("model_FOODS_1_CA_01.json"),
            model.to_json().unwrap(),
        )
        .unwrap();

        let mut store = ModelStore::open(dir.path()).unwrap();
        let listed: Vec<String> = store
            .registry()
            .stores_for("FOODS_1")
            .iter()
            .map(|store| store.to_string())
            .collect();
        assert_eq!(listed, vec!["CA_01"]);

        let key = SeriesKey::new("FOODS_1", listed[0].clone());
        assert_eq!(store.get(&key).unwrap().name(), "padded");

        let unpadded = SeriesKey::new("FOODS_1", "CA_1");
        assert!(matches!(
            store.get(&unpadded),
            Err(ForecastError::ModelNotFound(_))
        ));
    }
}
