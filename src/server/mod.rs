//! HTTP server layer for the gallery.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │      GET /images   GET /images/{name}   POST /upload   ...      │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌───────────┐  ┌──────────┐  │
//! │  │  handlers   │  │    auth     │  │ templates │  │  routes  │  │
//! │  │ (requests)  │  │ (basic auth)│  │  (HTML)   │  │ (router) │  │
//! │  └─────────────┘  └─────────────┘  └───────────┘  └──────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod templates;

pub use auth::{basic_auth_middleware, AuthError, BasicAuth, Credentials, DEFAULT_REALM};
pub use handlers::{
    admin_handler, delete_handler, health_handler, home_handler, image_handler, images_handler,
    upload_handler, AppState, ErrorResponse, HealthResponse, ADMIN_PATH, UPLOAD_FIELD,
};
pub use routes::{
    create_router, RouterConfig, DEFAULT_ASSETS_DIR, DEFAULT_CACHE_MAX_AGE,
    DEFAULT_MAX_UPLOAD_SIZE,
};
pub use templates::{render_admin, render_home, render_images};
