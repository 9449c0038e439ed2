//! Flat-file object store: one encrypted blob per object under a root
//! directory.
//!
//! Object names are mapped to file names through SHA-256, so a hostile name
//! (`../../etc/passwd`, embedded NULs, very long names) can never address a
//! file outside the root. Writes are staged to a uniquely named temp file in
//! the same directory and renamed into place; rename is atomic on the
//! filesystems this targets, so readers see either the previous blob or the
//! new one in full.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use super::{ObjectStore, StoreError};

/// Suffix appended to every blob file.
const BLOB_SUFFIX: &str = ".enc";

/// Filesystem-backed [`ObjectStore`].
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open the store rooted at `root`, creating the directory if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Map a logical name to its blob path. Stable, and collision-free for
    /// distinct names.
    fn blob_path(&self, name: &str) -> PathBuf {
        let digest = Sha256::digest(name.as_bytes());
        self.root.join(format!("{}{BLOB_SUFFIX}", hex::encode(digest)))
    }
}

#[async_trait]
impl ObjectStore for FsStore {
    async fn put(&self, name: &str, blob: &[u8]) -> Result<(), StoreError> {
        let path = self.blob_path(name);
        let tmp = self.root.join(format!(".{}.tmp", Uuid::new_v4()));

        tokio::fs::write(&tmp, blob).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        debug!(name, bytes = blob.len(), "blob stored");
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        match tokio::fs::read(self.blob_path(name)).await {
            Ok(blob) => Ok(blob),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FsStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path()).unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn put_get_round_trip() {
        let (_dir, store) = temp_store();
        store.put("report.pdf", b"envelope bytes").await.unwrap();
        assert_eq!(store.get("report.pdf").await.unwrap(), b"envelope bytes");
    }

    #[tokio::test]
    async fn missing_object_is_not_found() {
        let (_dir, store) = temp_store();
        assert!(matches!(
            store.get("nothing-here").await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn put_overwrites_existing_blob() {
        let (_dir, store) = temp_store();
        store.put("name", b"first").await.unwrap();
        store.put("name", b"second").await.unwrap();
        assert_eq!(store.get("name").await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn distinct_names_do_not_collide() {
        let (_dir, store) = temp_store();
        store.put("a", b"blob a").await.unwrap();
        store.put("b", b"blob b").await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), b"blob a");
        assert_eq!(store.get("b").await.unwrap(), b"blob b");
    }

    #[tokio::test]
    async fn hostile_names_stay_inside_root() {
        let (dir, store) = temp_store();
        for name in ["../escape", "../../etc/passwd", "a/b/c", "."] {
            assert!(store.blob_path(name).starts_with(dir.path()));
            store.put(name, b"contained").await.unwrap();
        }
        // Every blob landed directly in the root directory.
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 4);
    }

    #[tokio::test]
    async fn put_leaves_no_temp_files() {
        let (dir, store) = temp_store();
        store.put("name", b"blob").await.unwrap();
        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].ends_with(BLOB_SUFFIX));
    }

    #[tokio::test]
    async fn new_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("store");
        let store = FsStore::new(&nested).unwrap();
        store.put("x", b"y").await.unwrap();
        assert!(nested.is_dir());
    }
}
