//! # Local Filesystem Store
//!
//! One directory per path segment under a root directory. Records of a path
//! live in its `.keys` directory, one file per key; segment and key names
//! never start with `.`, so the two can not collide.
//!
//! Writes go to a temporary file that is synced and then renamed over the
//! record, so a reader sees either the old or the new value.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use futures_util::future::{BoxFuture, FutureExt};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::errors::{StorageError, StorageResult};
use super::record::{decode_record, encode_record};
use super::store::{validate_key, validate_path, Entry, KeyValueStore};

const KEYS_DIR: &str = ".keys";

/// Checksummed file-per-key store
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
    verify_checksums: bool,
}

impl LocalStore {
    /// Create a store rooted at `root`; the directory is created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            verify_checksums: true,
        }
    }

    /// Enable or disable checksum verification on read
    pub fn with_checksums(mut self, verify: bool) -> Self {
        self.verify_checksums = verify;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn keys_dir(&self, path: &[String]) -> PathBuf {
        let mut dir = self.root.clone();
        dir.extend(path);
        dir.push(KEYS_DIR);
        dir
    }

    async fn read_record(&self, file: &Path, key: &str) -> StorageResult<Option<Vec<u8>>> {
        match fs::read(file).await {
            Ok(bytes) => decode_record(key, &bytes, self.verify_checksums).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(file.display(), e)),
        }
    }

    async fn list_keys(&self, dir: &Path) -> StorageResult<Vec<String>> {
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(dir.display(), e)),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::io(dir.display(), e))?
        {
            // Temporary files start with '.'; keys never do.
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with('.') {
                    keys.push(name.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

impl KeyValueStore for LocalStore {
    fn read<'a>(
        &'a self,
        path: &'a [String],
        key: &'a str,
    ) -> BoxFuture<'a, StorageResult<Option<Vec<u8>>>> {
        async move {
            validate_path(path)?;
            validate_key(key)?;
            let file = self.keys_dir(path).join(key);
            self.read_record(&file, key).await
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
            let dir = self.keys_dir(path);

            let mut entries = Vec::new();
            for key in self.list_keys(&dir).await? {
                if key.as_str() < begin || key.as_str() >= end {
                    continue;
                }
                // A key removed between listing and reading is skipped.
                if let Some(value) = self.read_record(&dir.join(&key), &key).await? {
                    entries.push((key, value));
                }
            }
            Ok(entries)
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
            let dir = self.keys_dir(path);
            fs::create_dir_all(&dir)
                .await
                .map_err(|e| StorageError::io(dir.display(), e))?;

            let target = dir.join(key);
            // Unique per writer so concurrent writes of one key never share a file.
            let temp = dir.join(format!(".{}.{}.tmp", key, Uuid::new_v4()));
            let record = encode_record(value);

            let mut file = fs::File::create(&temp)
                .await
                .map_err(|e| StorageError::io(temp.display(), e))?;
            file.write_all(&record)
                .await
                .map_err(|e| StorageError::io(temp.display(), e))?;
            file.sync_all()
                .await
                .map_err(|e| StorageError::io(temp.display(), e))?;
            drop(file);

            fs::rename(&temp, &target)
                .await
                .map_err(|e| StorageError::io(target.display(), e))
        }
        .boxed()
    }
}
