//! Filesystem-backed image store.
//!
//! Records live directly under a single content root directory. Uploads are
//! written to a hidden temporary file in the same directory and renamed into
//! place once fully flushed, so a record is either complete or absent:
//!
//! ```text
//! <root>/.upload-<identifier>.tmp   -- while the copy runs
//! <root>/<identifier><extension>    -- after rename
//! ```
//!
//! Nothing here is synchronized; concurrent calls rely on the atomicity of
//! create, rename, and unlink on the underlying filesystem.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncRead;
use tracing::{debug, info, warn};

use super::identifier::generate_identifier;
use super::name::{extension_of, RecordName};
use super::store::{ImageContent, ImageStore};
use crate::error::StorageError;

/// Prefix of in-flight upload files. Never a valid record name.
const TEMP_PREFIX: &str = ".upload-";

/// An [`ImageStore`] over a local directory.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    /// Create a store rooted at `root`. The directory is not touched.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The content root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the content root (and parents) if it does not exist.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    fn record_path(&self, name: &RecordName) -> PathBuf {
        self.root.join(name.as_str())
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store<R>(
        &self,
        mut content: R,
        original_name: &str,
    ) -> Result<RecordName, StorageError>
    where
        R: AsyncRead + Send + Unpin,
    {
        let extension = extension_of(original_name);
        let identifier = generate_identifier()?;
        let name = RecordName::new(&identifier, extension)
            .ok_or_else(|| StorageError::InvalidExtension(extension.to_string()))?;

        let write_error = |message: String| StorageError::Write {
            name: name.to_string(),
            message,
        };

        let temp_path = self
            .root
            .join(format!("{}{}.tmp", TEMP_PREFIX, identifier));
        let mut pending = PendingUpload::new(temp_path.clone());

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .await
            .map_err(|e| write_error(format!("create: {}", e)))?;

        let bytes = tokio::io::copy(&mut content, &mut file)
            .await
            .map_err(|e| write_error(format!("copy: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| write_error(format!("sync: {}", e)))?;
        drop(file);

        fs::rename(&temp_path, self.record_path(&name))
            .await
            .map_err(|e| write_error(format!("rename: {}", e)))?;
        pending.commit();

        info!(name = %name, bytes, "Stored image");
        Ok(name)
    }

    async fn list(&self) -> Result<Vec<RecordName>, StorageError> {
        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|e| StorageError::List(e.to_string()))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::List(e.to_string()))?
        {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str().and_then(RecordName::parse) else {
                continue;
            };

            match entry.file_type().await {
                Ok(file_type) if file_type.is_file() => names.push(name),
                Ok(_) => {}
                Err(e) => return Err(StorageError::List(e.to_string())),
            }
        }

        names.sort();
        debug!(count = names.len(), "Listed images");
        Ok(names)
    }

    async fn fetch(&self, name: &RecordName) -> Result<ImageContent, StorageError> {
        let path = self.record_path(name);

        let read_error = |e: std::io::Error| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::NotFound(name.to_string())
            } else {
                StorageError::Read {
                    name: name.to_string(),
                    message: e.to_string(),
                }
            }
        };

        let file = File::open(&path).await.map_err(read_error)?;
        let metadata = file.metadata().await.map_err(read_error)?;
        if !metadata.is_file() {
            return Err(StorageError::NotFound(name.to_string()));
        }

        Ok(ImageContent {
            name: name.clone(),
            len: metadata.len(),
            reader: Box::new(file),
        })
    }

    async fn delete(&self, name: &RecordName) -> Result<(), StorageError> {
        fs::remove_file(self.record_path(name))
            .await
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    StorageError::NotFound(name.to_string())
                } else {
                    StorageError::Remove {
                        name: name.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        info!(name = %name, "Deleted image");
        Ok(())
    }
}

/// Removes an in-flight upload file unless the upload was committed.
struct PendingUpload {
    path: PathBuf,
    committed: bool,
}

impl PendingUpload {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            committed: false,
        }
    }

    fn commit(&mut self) {
        self.committed = true;
    }
}

impl Drop for PendingUpload {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed partial upload"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                "Failed to remove partial upload: {}",
                e
            ),
        }
    }
}
