//! HTTP Basic authentication for admin routes.
//!
//! Upload, delete, and the admin page sit behind a single static credential
//! supplied at startup. Every request is checked on its own; there are no
//! sessions or tokens:
//!
//! ```text
//! request ──► Unauthenticated ──(credentials match)──► Authenticated ──► handler
//!                   │
//!                   └──(missing / malformed / wrong)──► 401 + WWW-Authenticate
//! ```
//!
//! # Security Properties
//!
//! - **Constant-time comparison**: username and password are compared with
//!   `subtle` so response timing does not reveal partial matches
//! - **No side effects on failure**: the wrapped handler is never invoked,
//!   so a rejected upload never reads its body
//!
//! # Example
//!
//! ```rust
//! use image_gallery::server::auth::{BasicAuth, Credentials};
//!
//! let auth = BasicAuth::new(Credentials::new("admin", "s3cret"));
//!
//! assert!(auth.authorize(&Credentials::new("admin", "s3cret")).is_ok());
//! assert!(auth.authorize(&Credentials::new("admin", "guess")).is_err());
//! ```

use std::fmt;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::{debug, warn};

use super::handlers::ErrorResponse;

/// Realm sent in the `WWW-Authenticate` challenge unless configured otherwise.
pub const DEFAULT_REALM: &str = "Please enter your username and password for admin access.";

// =============================================================================
// Types
// =============================================================================

/// Authentication failures. All of them answer `401 Unauthorized`.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// No `Authorization` header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Header present but not a decodable Basic credential
    #[error("Malformed credentials")]
    MalformedCredentials,

    /// Username or password does not match
    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl AuthError {
    fn error_type(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "missing_credentials",
            AuthError::MalformedCredentials => "malformed_credentials",
            AuthError::InvalidCredentials => "invalid_credentials",
        }
    }
}

/// A username/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Decode credentials from an `Authorization: Basic <base64>` header value.
    ///
    /// The scheme is matched case-insensitively. The decoded text is split at
    /// the first `:`, so passwords may contain colons.
    pub fn from_authorization_header(value: &HeaderValue) -> Result<Self, AuthError> {
        let value = value.to_str().map_err(|_| AuthError::MalformedCredentials)?;

        let (scheme, encoded) = value
            .split_once(' ')
            .ok_or(AuthError::MalformedCredentials)?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return Err(AuthError::MalformedCredentials);
        }

        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| AuthError::MalformedCredentials)?;
        let decoded = String::from_utf8(decoded).map_err(|_| AuthError::MalformedCredentials)?;

        let (username, password) = decoded
            .split_once(':')
            .ok_or(AuthError::MalformedCredentials)?;

        Ok(Credentials::new(username, password))
    }

    /// Encode as an `Authorization` header value.
    pub fn to_header_value(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", encoded)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Basic Auth Gate
// =============================================================================

/// Checks request credentials against the configured admin credential.
#[derive(Clone)]
pub struct BasicAuth {
    expected: Arc<Credentials>,
    realm: Arc<str>,
}

impl BasicAuth {
    /// Create a gate for the given credential with the default realm.
    pub fn new(expected: Credentials) -> Self {
        Self {
            expected: Arc::new(expected),
            realm: Arc::from(DEFAULT_REALM),
        }
    }

    /// Set the realm announced in challenges.
    pub fn with_realm(mut self, realm: impl AsRef<str>) -> Self {
        self.realm = Arc::from(realm.as_ref());
        self
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Compare supplied credentials byte-for-byte with the expected ones.
    pub fn authorize(&self, supplied: &Credentials) -> Result<(), AuthError> {
        let username_ok = supplied
            .username
            .as_bytes()
            .ct_eq(self.expected.username.as_bytes());
        let password_ok = supplied
            .password
            .as_bytes()
            .ct_eq(self.expected.password.as_bytes());

        if (username_ok & password_ok).into() {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Authorize a request from its headers.
    pub fn authorize_headers(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let value = headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingCredentials)?;
        let supplied = Credentials::from_authorization_header(value)?;
        self.authorize(&supplied)
    }

    /// The `WWW-Authenticate` header value for this realm.
    pub fn challenge_header(&self) -> HeaderValue {
        let realm = self.realm.replace('\\', "\\\\").replace('"', "\\\"");
        HeaderValue::from_str(&format!("Basic realm=\"{}\"", realm))
            .unwrap_or_else(|_| HeaderValue::from_static("Basic"))
    }

    /// Build the 401 response asking the client for credentials.
    pub fn challenge(&self, err: AuthError) -> Response {
        let status = StatusCode::UNAUTHORIZED;
        let error_type = err.error_type();

        // Wrong credentials may be a guessing attempt; a missing header is
        // just the browser's first request.
        match err {
            AuthError::InvalidCredentials => warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Authentication failed: {}",
                err
            ),
            _ => debug!(
                error_type = error_type,
                status = status.as_u16(),
                "Authentication failed: {}",
                err
            ),
        }

        let body = ErrorResponse::with_status(error_type, "Unauthorized", status);
        let mut response = (status, Json(body)).into_response();
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, self.challenge_header());
        response
    }
}

// =============================================================================
// Axum Middleware
// =============================================================================

/// Axum middleware that only lets authenticated requests through.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, middleware, routing::get};
/// use image_gallery::server::auth::{basic_auth_middleware, BasicAuth, Credentials};
///
/// let auth = BasicAuth::new(Credentials::new("admin", "s3cret"));
/// let app = Router::new()
///     .route("/admin", get(admin_handler))
///     .route_layer(middleware::from_fn_with_state(auth, basic_auth_middleware));
/// ```
pub async fn basic_auth_middleware(
    State(auth): State<BasicAuth>,
    request: Request,
    next: Next,
) -> Response {
    match auth.authorize_headers(request.headers()) {
        Ok(()) => {
            debug!(path = %request.uri().path(), "Authenticated admin request");
            next.run(request).await
        }
        Err(err) => auth.challenge(err),
    }
}

// =============================================================================
// Tests
// =============================================================================
