//! services/api/src/adapters/object_store.rs
//!
//! Filesystem-backed implementation of the `ObjectStore` port. Blobs live
//! under a configured root directory and are served by whatever fronts
//! that directory (reverse proxy, CDN); this adapter only derives the
//! public URL from a configured base.

use async_trait::async_trait;
use bytes::Bytes;
use courseware_core::ports::{ObjectStore, PortError, PortResult};
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

/// Writes blobs under `root` and derives retrieval URLs from
/// `public_base_url`.
#[derive(Clone)]
pub struct FsObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl FsObjectStore {
    pub fn new(root: PathBuf, public_base_url: String) -> Self {
        Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn path_for(&self, key: &str) -> PortResult<PathBuf> {
        // Keys are generated server-side, but never follow one that
        // could escape the root.
        if key.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
            return Err(PortError::Storage(format!("malformed storage key '{}'", key)));
        }
        Ok(self.root.join(key))
    }
}

fn storage_err(e: std::io::Error) -> PortError {
    PortError::Storage(e.to_string())
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn put(&self, key: &str, content_type: &str, bytes: Bytes) -> PortResult<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(storage_err)?;
        }

        // Write to a temp name first so a partially written blob is never
        // observable under its final key.
        let tmp = path.with_extension(format!("tmp-{}", Uuid::new_v4()));
        tokio::fs::write(&tmp, &bytes).await.map_err(storage_err)?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(storage_err(e));
        }

        debug!(key, content_type, size = bytes.len(), "blob stored");
        Ok(())
    }

    async fn delete(&self, key: &str) -> PortResult<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // Deleting an absent blob is a no-op, not an error.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_err(e)),
        }
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}
