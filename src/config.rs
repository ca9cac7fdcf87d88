//! Configuration management for the gallery server.
//!
//! This module provides a flexible configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables with `GALLERY_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Example
//!
//! ```ignore
//! use image_gallery::config::Config;
//!
//! // Parse from command line and environment
//! let config = Config::parse();
//!
//! println!("Listening on {}", config.bind_address());
//! println!("Content root: {}", config.content_root.display());
//! ```
//!
//! # Environment Variables
//!
//! - `GALLERY_HOST` - Server bind address (default: 0.0.0.0)
//! - `GALLERY_PORT` - Server port (default: 8088)
//! - `GALLERY_CONTENT_ROOT` - Directory holding uploaded images (default: uploads)
//! - `GALLERY_ASSETS_DIR` - Directory served under /assets (default: assets)
//! - `GALLERY_ADMIN_USERNAME` - Admin username (default: admin)
//! - `GALLERY_ADMIN_PASSWORD` - Admin password (required)
//! - `GALLERY_AUTH_REALM` - Realm shown in the login prompt
//! - `GALLERY_MAX_UPLOAD_SIZE` - Upload body limit in bytes (default: 32 MiB)
//! - `GALLERY_CACHE_MAX_AGE` - HTTP cache max-age seconds for images (default: 3600)

use std::path::PathBuf;

use clap::Parser;

use crate::server::auth::{Credentials, DEFAULT_REALM};
use crate::server::routes::{
    RouterConfig, DEFAULT_ASSETS_DIR, DEFAULT_CACHE_MAX_AGE, DEFAULT_MAX_UPLOAD_SIZE,
};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8088;

/// Default content root.
pub const DEFAULT_CONTENT_ROOT: &str = "uploads";

/// Default admin username.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

// =============================================================================
// CLI Arguments
// =============================================================================

/// Image Gallery - upload, browse, and delete images.
///
/// Serves a public gallery of the images in the content root and an admin
/// area, protected by HTTP Basic authentication, for uploads and deletions.
#[derive(Parser, Debug, Clone)]
#[command(name = "image-gallery")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "GALLERY_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "GALLERY_PORT")]
    pub port: u16,

    // =========================================================================
    // Storage Configuration
    // =========================================================================
    /// Directory holding uploaded images. Created on startup if missing.
    #[arg(long, default_value = DEFAULT_CONTENT_ROOT, env = "GALLERY_CONTENT_ROOT")]
    pub content_root: PathBuf,

    /// Directory served under /assets.
    #[arg(long, default_value = DEFAULT_ASSETS_DIR, env = "GALLERY_ASSETS_DIR")]
    pub assets_dir: PathBuf,

    /// Maximum upload body size in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_SIZE, env = "GALLERY_MAX_UPLOAD_SIZE")]
    pub max_upload_size: usize,

    /// HTTP Cache-Control max-age in seconds for image bytes.
    #[arg(long, default_value_t = DEFAULT_CACHE_MAX_AGE, env = "GALLERY_CACHE_MAX_AGE")]
    pub cache_max_age: u32,

    // =========================================================================
    // Authentication Configuration
    // =========================================================================
    /// Username for the admin area.
    #[arg(long, default_value = DEFAULT_ADMIN_USERNAME, env = "GALLERY_ADMIN_USERNAME")]
    pub admin_username: String,

    /// Password for the admin area.
    ///
    /// Required. The server refuses to start without one.
    #[arg(long, env = "GALLERY_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    /// Realm shown in the browser's login prompt.
    #[arg(long, default_value = DEFAULT_REALM, env = "GALLERY_AUTH_REALM")]
    pub auth_realm: String,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        match self.admin_password.as_deref() {
            None | Some("") => {
                return Err("Admin password is required. \
                     Set --admin-password or GALLERY_ADMIN_PASSWORD"
                    .to_string());
            }
            Some(_) => {}
        }

        if self.admin_username.is_empty() {
            return Err("Admin username must not be empty".to_string());
        }

        if self.admin_username.contains(':') {
            return Err("Admin username must not contain ':'".to_string());
        }

        if self.content_root.as_os_str().is_empty() {
            return Err(
                "Content root is required. Set --content-root or GALLERY_CONTENT_ROOT".to_string(),
            );
        }

        if self.max_upload_size == 0 {
            return Err("max_upload_size must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The admin credential (call validate() first).
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.admin_username.clone(),
            self.admin_password.clone().unwrap_or_default(),
        )
    }

    /// Build the router configuration.
    pub fn router_config(&self) -> RouterConfig {
        RouterConfig::new(self.credentials())
            .with_realm(self.auth_realm.clone())
            .with_max_upload_size(self.max_upload_size)
            .with_cache_max_age(self.cache_max_age)
            .with_assets_dir(self.assets_dir.clone())
            .with_tracing(!self.no_tracing)
    }
}

// =============================================================================
// Tests
// =============================================================================
