use crate::shipping::{round_cents, BoxDraft, ShippingBox};
use std::fs;
use std::path::{Path, PathBuf};

/// File holding the serialized box list
pub const BOXES_FILE: &str = "shippingBoxes.json";

pub const ENV_DATA_DIR: &str = "SHIPBOX_DATA_DIR";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize boxes: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Could not determine app data directory")]
    DataDir,
}

/// Get the app data directory
pub fn get_app_data_dir() -> Result<PathBuf, StorageError> {
    // Check if custom data dir is set via environment variable
    if let Ok(custom_dir) = std::env::var(ENV_DATA_DIR) {
        return Ok(PathBuf::from(custom_dir));
    }

    dirs::data_dir()
        .map(|p| p.join("shipbox"))
        .ok_or(StorageError::DataDir)
}

/// Initialize storage directories, returning the data directory
pub fn init_storage() -> Result<PathBuf, StorageError> {
    let app_dir = get_app_data_dir()?;
    fs::create_dir_all(&app_dir)?;
    fs::create_dir_all(app_dir.join("logs"))?;
    Ok(app_dir)
}

/// Append-only list of shipping boxes backed by a JSON file
#[derive(Debug)]
pub struct BoxStore {
    path: PathBuf,
    boxes: Vec<ShippingBox>,
}

impl BoxStore {
    /// Open the store, loading whatever the file holds. Any read failure
    /// starts an empty list.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let boxes = match load_boxes(&path) {
            Ok(boxes) => {
                tracing::info!("Loaded {} boxes from {}", boxes.len(), path.display());
                boxes
            }
            Err(e) => {
                tracing::warn!("Could not load boxes from {}: {}", path.display(), e);
                Vec::new()
            }
        };

        Self { path, boxes }
    }

    /// Create a record from `draft`, append it and flush the whole list.
    /// The record stays in memory even if the flush fails.
    pub fn add(&mut self, draft: BoxDraft) -> Result<ShippingBox, StorageError> {
        let record = ShippingBox::from_draft(draft);
        self.boxes.push(record.clone());

        tracing::info!(
            id = %record.id,
            country = %record.country,
            cost = record.shipping_cost,
            "Box added"
        );

        self.flush()?;
        Ok(record)
    }

    fn flush(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.boxes)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write next to the target, then swap it in
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    pub fn boxes(&self) -> &[ShippingBox] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn total_shipping_cost(&self) -> f64 {
        round_cents(self.boxes.iter().map(|b| b.shipping_cost).sum())
    }

    /// Total weight in kilograms, rounded to two decimals
    pub fn total_weight(&self) -> f64 {
        round_cents(self.boxes.iter().map(|b| b.weight).sum())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Load boxes from disk; a missing file is an empty list
fn load_boxes(path: &Path) -> Result<Vec<ShippingBox>, StorageError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shipping::{Country, Rgb};
    use tempfile::TempDir;

    fn draft(name: &str, weight: f64, country: Country) -> BoxDraft {
        BoxDraft {
            receiver_name: name.to_string(),
            weight,
            color: Rgb::new(26, 43, 60),
            country,
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = BoxStore::open(dir.path().join(BOXES_FILE));
        assert!(store.is_empty());
        assert_eq!(store.total_shipping_cost(), 0.0);
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(BOXES_FILE);
        fs::write(&path, "{ not json").unwrap();

        let store = BoxStore::open(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_persists_immediately() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(BOXES_FILE);
        let mut store = BoxStore::open(&path);

        let record = store.add(draft("Ada", 2.0, Country::China)).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(record.shipping_cost, 23.06);
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let on_disk: Vec<ShippingBox> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, vec![record]);
    }

    #[test]
    fn test_reload_restores_same_records_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(BOXES_FILE);

        let mut store = BoxStore::open(&path);
        store.add(draft("Ada", 1.0, Country::Sweden)).unwrap();
        store.add(draft("Grace", 2.5, Country::Brazil)).unwrap();
        store.add(draft("Linus", 0.0, Country::Australia)).unwrap();
        let saved = store.boxes().to_vec();
        drop(store);

        let reopened = BoxStore::open(&path);
        assert_eq!(reopened.boxes(), saved.as_slice());
    }

    #[test]
    fn test_totals() {
        let dir = TempDir::new().unwrap();
        let mut store = BoxStore::open(dir.path().join(BOXES_FILE));
        store.add(draft("Ada", 1.0, Country::Sweden)).unwrap();
        store.add(draft("Grace", 2.0, Country::China)).unwrap();

        assert_eq!(store.total_shipping_cost(), 30.41);
        assert_eq!(store.total_weight(), 3.0);
    }

    #[test]
    fn test_total_weight_rounded() {
        let dir = TempDir::new().unwrap();
        let mut store = BoxStore::open(dir.path().join(BOXES_FILE));
        store.add(draft("Ada", 0.1, Country::Sweden)).unwrap();
        store.add(draft("Grace", 0.2, Country::China)).unwrap();

        assert_eq!(store.total_weight(), 0.3);
    }

    #[test]
    fn test_oversized_weight_survives_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(BOXES_FILE);

        let mut store = BoxStore::open(&path);
        store.add(draft("Ada", 2.0, Country::China)).unwrap();
        let big = store.add(draft("Big", 1e306, Country::Australia)).unwrap();
        assert!(big.shipping_cost.is_finite());

        let reopened = BoxStore::open(&path);
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.boxes(), store.boxes());
    }

    #[test]
    fn test_flush_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join(BOXES_FILE);
        let mut store = BoxStore::open(&path);

        store.add(draft("Ada", 1.0, Country::Sweden)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_failed_flush_keeps_record_in_memory() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail
        let path = dir.path().join(BOXES_FILE);
        fs::create_dir_all(path.join("occupied")).unwrap();

        let mut store = BoxStore::open(&path);
        let result = store.add(draft("Ada", 1.0, Country::Sweden));

        assert!(result.is_err());
        assert_eq!(store.len(), 1);
    }
}
