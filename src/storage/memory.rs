//! # In-Memory Store

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use futures_util::future::{BoxFuture, FutureExt};
use tokio::sync::RwLock;

use super::errors::StorageResult;
use super::store::{validate_key, validate_path, Entry, KeyValueStore};

/// Key-value store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    directories: RwLock<HashMap<Vec<String>, BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read<'a>(
        &'a self,
        path: &'a [String],
        key: &'a str,
    ) -> BoxFuture<'a, StorageResult<Option<Vec<u8>>>> {
        async move {
            validate_path(path)?;
            validate_key(key)?;
            let directories = self.directories.read().await;
            Ok(directories
                .get(path)
                .and_then(|entries| entries.get(key))
                .cloned())
        }
        .boxed()
    }

    fn read_range<'a>(
        &'a self,
        path: &'a [String],
        begin: &'a str,
        end: &'a str,
    ) -> BoxFuture<'a, StorageResult<Vec<Entry>>> {
        async move {
            validate_path(path)?;
            if begin >= end {
                return Ok(Vec::new());
            }
            let directories = self.directories.read().await;
            let Some(entries) = directories.get(path) else {
                return Ok(Vec::new());
            };
            Ok(entries
                .range::<str, _>((Bound::Included(begin), Bound::Excluded(end)))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect())
        }
        .boxed()
    }

    fn write<'a>(
        &'a self,
        path: &'a [String],
        key: &'a str,
        value: &'a [u8],
    ) -> BoxFuture<'a, StorageResult<()>> {
        async move {
            validate_path(path)?;
            validate_key(key)?;
            let mut directories = self.directories.write().await;
            directories
                .entry(path.to_vec())
                .or_default()
                .insert(key.to_string(), value.to_vec());
            Ok(())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_write_read() {
        let store = MemoryStore::new();
        let dir = path(&["db"]);

        store.write(&dir, "key", b"value").await.unwrap();

        assert_eq!(store.read(&dir, "key").await.unwrap(), Some(b"value".to_vec()));
        assert_eq!(store.read(&dir, "other").await.unwrap(), None);
        assert_eq!(store.read(&path(&["elsewhere"]), "key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_overwrite() {
        let store = MemoryStore::new();
        let dir = path(&["db"]);

        store.write(&dir, "key", b"old").await.unwrap();
        store.write(&dir, "key", b"new").await.unwrap();

        assert_eq!(store.read(&dir, "key").await.unwrap(), Some(b"new".to_vec()));
    }

    #[tokio::test]
    async fn test_read_range_is_half_open() {
        let store = MemoryStore::new();
        let dir = path(&["db"]);
        for key in ["a", "b", "c", "d"] {
            store.write(&dir, key, key.as_bytes()).await.unwrap();
        }

        let keys: Vec<String> = store
            .read_range(&dir, "b", "d")
            .await
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect();

        assert_eq!(keys, vec!["b".to_string(), "c".to_string()]);
        assert!(store.read_range(&dir, "d", "a").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_invalid_key() {
        let store = MemoryStore::new();
        assert_eq!(
            store.write(&path(&["db"]), "../escape", b"x").await,
            Err(StorageError::InvalidKey("../escape".into()))
        );
    }
}
