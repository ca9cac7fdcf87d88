//! Router configuration for the gallery.
//!
//! This module defines the HTTP routes and applies middleware for
//! authentication, upload size limits, and request tracing.
//!
//! # Route Structure
//!
//! ```text
//! /                          - Home page (public)
//! /health                    - Health check (public)
//! /images                    - Gallery listing (public)
//! /images/{name}             - Image bytes (public)
//! /assets/*                  - Static files (public)
//! /admin                     - Admin listing (protected)
//! /upload                    - Upload, POST only (protected)
//! /admin/delete/{name}       - Delete, GET or POST (protected)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use image_gallery::server::auth::Credentials;
//! use image_gallery::server::routes::{create_router, RouterConfig};
//! use image_gallery::storage::LocalImageStore;
//!
//! let store = LocalImageStore::new("uploads");
//! let config = RouterConfig::new(Credentials::new("admin", "s3cret"))
//!     .with_max_upload_size(8 * 1024 * 1024);
//!
//! let router = create_router(store, config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8088").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::path::PathBuf;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::auth::{basic_auth_middleware, BasicAuth, Credentials, DEFAULT_REALM};
use super::handlers::{
    admin_handler, delete_handler, health_handler, home_handler, image_handler, images_handler,
    upload_handler, AppState,
};
use crate::storage::ImageStore;

/// Default upload body limit (32 MiB).
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 32 * 1024 * 1024;

/// Default Cache-Control max-age for image bytes (1 hour).
pub const DEFAULT_CACHE_MAX_AGE: u32 = 3600;

/// Default directory served under `/assets`.
pub const DEFAULT_ASSETS_DIR: &str = "assets";

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Admin credential required on protected routes
    pub credentials: Credentials,

    /// Realm announced in the Basic auth challenge
    pub realm: String,

    /// Maximum accepted upload body size in bytes
    pub max_upload_size: usize,

    /// Cache-Control max-age in seconds for image bytes
    pub cache_max_age: u32,

    /// Directory served under `/assets`
    pub assets_dir: PathBuf,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a new router configuration with the given admin credential.
    ///
    /// By default:
    /// - The realm is [`DEFAULT_REALM`]
    /// - Uploads are limited to 32 MiB
    /// - Cache max-age is 1 hour (3600 seconds)
    /// - Assets are served from `./assets`
    /// - Tracing is enabled
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            realm: DEFAULT_REALM.to_string(),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            cache_max_age: DEFAULT_CACHE_MAX_AGE,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            enable_tracing: true,
        }
    }

    /// Set the Basic auth realm.
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }

    /// Set the maximum upload body size in bytes.
    pub fn with_max_upload_size(mut self, bytes: usize) -> Self {
        self.max_upload_size = bytes;
        self
    }

    /// Set the Cache-Control max-age in seconds.
    pub fn with_cache_max_age(mut self, seconds: u32) -> Self {
        self.cache_max_age = seconds;
        self
    }

    /// Set the directory served under `/assets`.
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// This function builds the complete Axum router with:
/// - Public routes (home, gallery, image bytes, health, assets)
/// - Protected routes (admin page, upload, delete) behind Basic auth
/// - An upload body limit
/// - Request tracing (optional)
pub fn create_router<S>(store: S, config: RouterConfig) -> Router
where
    S: ImageStore + 'static,
{
    let app_state = AppState::with_cache_max_age(store, config.cache_max_age);
    let auth = BasicAuth::new(config.credentials.clone()).with_realm(&config.realm);

    let router = Router::new()
        .merge(build_protected_routes(app_state.clone(), auth, &config))
        .merge(build_public_routes(app_state, &config));

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Admin routes. Auth runs before any handler, so a rejected request never
/// reads its body or touches the store.
fn build_protected_routes<S>(app_state: AppState<S>, auth: BasicAuth, config: &RouterConfig) -> Router
where
    S: ImageStore + 'static,
{
    Router::new()
        .route(
            "/upload",
            post(upload_handler::<S>).layer(DefaultBodyLimit::max(config.max_upload_size)),
        )
        .route("/admin", get(admin_handler::<S>))
        .route(
            "/admin/delete/{name}",
            get(delete_handler::<S>).post(delete_handler::<S>),
        )
        .route_layer(middleware::from_fn_with_state(auth, basic_auth_middleware))
        .with_state(app_state)
}

fn build_public_routes<S>(app_state: AppState<S>, config: &RouterConfig) -> Router
where
    S: ImageStore + 'static,
{
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/images", get(images_handler::<S>))
        .route("/images/{name}", get(image_handler::<S>))
        .nest_service("/assets", ServeDir::new(&config.assets_dir))
        .with_state(app_state)
}

// =============================================================================
// Tests
// =============================================================================
