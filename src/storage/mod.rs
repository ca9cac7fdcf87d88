//! Storage layer for uploaded images.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         HTTP handlers / Gallery         │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │           ImageStore Trait              │
//! │   (store / list / fetch / delete)       │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │          LocalImageStore                │
//! │  (content root, temp file + rename)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! A record has no metadata beyond its filename, which is an
//! [`Identifier`] plus the extension of the uploaded file. [`RecordName`]
//! is the only way to address a record, which keeps request paths from
//! escaping the content root.
//!
//! # Usage
//!
//! ```ignore
//! use image_gallery::storage::{ImageStore, LocalImageStore};
//!
//! let store = LocalImageStore::new("uploads");
//! store.ensure_root().await?;
//!
//! let name = store.store(&b"\xFF\xD8"[..], "photo.PNG").await?;
//! assert!(store.list().await?.contains(&name));
//! ```

mod identifier;
mod local;
mod name;
mod store;

pub use identifier::{
    generate_identifier, is_identifier, Identifier, RandomSourceError, IDENTIFIER_BYTES,
    IDENTIFIER_LEN,
};
pub use local::LocalImageStore;
pub use name::{extension_of, is_valid_extension, RecordName, MAX_EXTENSION_LEN};
pub use store::{ImageContent, ImageStore};
