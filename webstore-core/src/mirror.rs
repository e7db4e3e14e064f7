//! Local persistence mirror for cart and wishlist membership.
//!
//! Each store key is one JSON file in the data directory holding an array
//! of product-ID strings. The mirror is read once when a tracker is opened
//! and overwritten in full after every successful mutation. There is no
//! partial update, no versioning, and no migration path: anything that is
//! not a valid JSON array of strings degrades to the empty set.

use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::ProductId;

/// Which membership set a mirror file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Cart,
    Wishlist,
}

impl StoreKey {
    /// Filename for this key within the data directory.
    pub fn filename(&self) -> &'static str {
        match self {
            StoreKey::Cart => "cart.json",
            StoreKey::Wishlist => "wishlist.json",
        }
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKey::Cart => write!(f, "cart"),
            StoreKey::Wishlist => write!(f, "wishlist"),
        }
    }
}

/// Errors that can occur when writing a mirror file. Reads never fail; they
/// degrade to the empty set.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("failed to write mirror file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode {key} mirror: {source}")]
    Encode {
        key: StoreKey,
        source: serde_json::Error,
    },
}

/// File-backed mirror store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct MirrorStore {
    data_dir: PathBuf,
}

impl MirrorStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Full path of the mirror file for a key.
    pub fn path(&self, key: StoreKey) -> PathBuf {
        self.data_dir.join(key.filename())
    }

    /// Read the persisted set. Absent, unreadable, or malformed content
    /// yields the empty set.
    pub fn read(&self, key: StoreKey) -> HashSet<ProductId> {
        let contents = match std::fs::read_to_string(self.path(key)) {
            Ok(contents) => contents,
            Err(_) => return HashSet::new(),
        };

        match serde_json::from_str::<Vec<String>>(&contents) {
            Ok(ids) => ids.into_iter().map(ProductId::from).collect(),
            Err(_) => HashSet::new(),
        }
    }

    /// Overwrite the mirror file with the full set, creating the data
    /// directory if needed. IDs are written sorted so the file is stable.
    pub fn write(&self, key: StoreKey, items: &HashSet<ProductId>) -> Result<(), MirrorError> {
        let mut ids: Vec<&str> = items.iter().map(ProductId::as_str).collect();
        ids.sort_unstable();

        let json = serde_json::to_string(&ids).map_err(|source| MirrorError::Encode { key, source })?;

        let path = self.path(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| MirrorError::Write {
                path: path.clone(),
                source,
            })?;
        }

        std::fs::write(&path, json).map_err(|source| MirrorError::Write { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (MirrorStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = MirrorStore::new(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    fn ids(raw: &[&str]) -> HashSet<ProductId> {
        raw.iter().map(|s| ProductId::from(*s)).collect()
    }

    #[test]
    fn test_store_key_filenames() {
        assert_eq!(StoreKey::Cart.filename(), "cart.json");
        assert_eq!(StoreKey::Wishlist.filename(), "wishlist.json");
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let (store, _temp) = test_store();
        assert!(store.read(StoreKey::Cart).is_empty());
    }

    #[test]
    fn test_write_and_read_roundtrip() {
        let (store, _temp) = test_store();

        store.write(StoreKey::Wishlist, &ids(&["b", "a"])).unwrap();
        let loaded = store.read(StoreKey::Wishlist);

        assert_eq!(loaded, ids(&["a", "b"]));
    }

    #[test]
    fn test_write_is_sorted_and_stable() {
        let (store, _temp) = test_store();

        store.write(StoreKey::Cart, &ids(&["z", "a", "m"])).unwrap();
        let contents = std::fs::read_to_string(store.path(StoreKey::Cart)).unwrap();

        assert_eq!(contents, r#"["a","m","z"]"#);
    }

    #[test]
    fn test_read_hydrates_array() {
        let (store, _temp) = test_store();
        std::fs::write(store.path(StoreKey::Wishlist), r#"["a","b"]"#).unwrap();

        assert_eq!(store.read(StoreKey::Wishlist), ids(&["a", "b"]));
    }

    #[test]
    fn test_malformed_json_degrades_to_empty() {
        let (store, _temp) = test_store();
        std::fs::write(store.path(StoreKey::Cart), "{not json").unwrap();

        assert!(store.read(StoreKey::Cart).is_empty());
    }

    #[test]
    fn test_non_array_content_degrades_to_empty() {
        let (store, _temp) = test_store();
        std::fs::write(store.path(StoreKey::Cart), r#"{"items": ["a"]}"#).unwrap();

        assert!(store.read(StoreKey::Cart).is_empty());
    }

    #[test]
    fn test_write_creates_data_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("data");
        let store = MirrorStore::new(nested.clone());

        store.write(StoreKey::Cart, &ids(&["p1"])).unwrap();

        assert!(nested.exists());
        assert_eq!(store.read(StoreKey::Cart), ids(&["p1"]));
    }

    #[test]
    fn test_overwrite_replaces_contents() {
        let (store, _temp) = test_store();

        store.write(StoreKey::Cart, &ids(&["a", "b"])).unwrap();
        store.write(StoreKey::Cart, &ids(&["c"])).unwrap();

        assert_eq!(store.read(StoreKey::Cart), ids(&["c"]));
    }
}
