use std::fmt;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::name::RecordName;
use crate::error::StorageError;

/// An opened record ready to be streamed to a client.
pub struct ImageContent {
    /// Name of the record that was opened
    pub name: RecordName,

    /// Size in bytes at the time of opening
    pub len: u64,

    /// The record's bytes
    pub reader: Box<dyn AsyncRead + Send + Unpin>,
}

impl fmt::Debug for ImageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageContent")
            .field("name", &self.name)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

/// Storage backend for image records.
///
/// The gallery and the HTTP layer only talk to this trait, so tests can swap in
/// a store with scripted failures.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `content` as a new record.
    ///
    /// The extension is taken from `original_name`; the rest of that name is
    /// discarded. Either a complete record exists afterwards or none does.
    ///
    /// # Returns
    /// The name of the new record.
    async fn store<R>(&self, content: R, original_name: &str) -> Result<RecordName, StorageError>
    where
        R: AsyncRead + Send + Unpin;

    /// List every record, ordered by name ascending.
    async fn list(&self) -> Result<Vec<RecordName>, StorageError>;

    /// Open a record for reading.
    async fn fetch(&self, name: &RecordName) -> Result<ImageContent, StorageError>;

    /// Remove a record.
    async fn delete(&self, name: &RecordName) -> Result<(), StorageError>;
}
