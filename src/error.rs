use thiserror::Error;

use crate::storage::RandomSourceError;

/// Errors from the storage layer.
///
/// Each failure keeps its own kind internally; the HTTP layer collapses all of
/// them except `NotFound` and `InvalidExtension` into one generic response.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// No identifier could be generated
    #[error("Random source error: {0}")]
    RandomSource(String),

    /// Creating, filling, or publishing the record file failed
    #[error("Failed to write {name}: {message}")]
    Write { name: String, message: String },

    /// The content root could not be enumerated
    #[error("Failed to list content root: {0}")]
    List(String),

    /// No record with this name
    #[error("Image not found: {0}")]
    NotFound(String),

    /// The record exists but could not be opened
    #[error("Failed to read {name}: {message}")]
    Read { name: String, message: String },

    /// The record could not be removed
    #[error("Failed to remove {name}: {message}")]
    Remove { name: String, message: String },

    /// The uploaded filename carries an extension that cannot be addressed
    #[error("Unsupported file extension: {0:?}")]
    InvalidExtension(String),
}

impl From<RandomSourceError> for StorageError {
    fn from(err: RandomSourceError) -> Self {
        StorageError::RandomSource(err.0)
    }
}

/// Errors raised while accepting an upload form.
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    /// The form has no `image` field
    #[error("Missing form field: {0}")]
    MissingField(&'static str),

    /// The multipart body could not be parsed
    #[error("Malformed multipart body: {0}")]
    Multipart(String),

    /// Storing the upload failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}
