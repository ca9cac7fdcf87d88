//! # Image Gallery
//!
//! A small web gallery: an administrator uploads and deletes images, anyone
//! can browse and view them.
//!
//! Every upload is stored as a single file under a content root, named by a
//! random 128-bit identifier plus the extension of the uploaded filename. The
//! directory listing *is* the database.
//!
//! ## Features
//!
//! - **Collision-resistant names**: identifiers come from the OS CSPRNG
//! - **All-or-nothing uploads**: files are written to a temporary path and
//!   renamed into place only after the full copy succeeds
//! - **Traversal-proof addressing**: request paths must match the record name
//!   shape before they are joined onto the content root
//! - **Basic authentication**: admin routes check a configured credential on
//!   every request
//!
//! ## Architecture
//!
//! - [`storage`] - Identifier generator, record names, and the image store
//! - [`gallery`] - Public and admin listings
//! - [`server`] - Axum-based HTTP server, auth gate, and HTML pages
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use image_gallery::{create_router, Credentials, LocalImageStore, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let store = LocalImageStore::new("uploads");
//!     store.ensure_root().await?;
//!
//!     let config = RouterConfig::new(Credentials::new("admin", "s3cret"));
//!     let router = create_router(store, config);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8088").await?;
//!     axum::serve(listener, router).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod gallery;
pub mod server;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use error::{StorageError, UploadError};
pub use gallery::Gallery;
pub use server::{
    basic_auth_middleware, create_router, AppState, AuthError, BasicAuth, Credentials,
    ErrorResponse, HealthResponse, RouterConfig,
};
pub use storage::{
    extension_of, generate_identifier, Identifier, ImageContent, ImageStore, LocalImageStore,
    RandomSourceError, RecordName,
};
