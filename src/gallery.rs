//! Read-only projections of the stored records.
//!
//! The public and admin pages show the same data; they differ only in the
//! template and the actions offered next to each image.

use std::sync::Arc;

use crate::error::StorageError;
use crate::storage::{ImageStore, RecordName};

/// Builds image listings from an [`ImageStore`].
pub struct Gallery<S: ImageStore> {
    store: Arc<S>,
}

impl<S: ImageStore> Gallery<S> {
    /// Create a gallery over a shared store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Listing for the public `/images` page.
    pub async fn public_listing(&self) -> Result<Vec<RecordName>, StorageError> {
        self.store.list().await
    }

    /// Listing for the `/admin` page.
    pub async fn admin_listing(&self) -> Result<Vec<RecordName>, StorageError> {
        self.store.list().await
    }
}

impl<S: ImageStore> Clone for Gallery<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}
