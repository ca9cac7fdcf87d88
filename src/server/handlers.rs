//! HTTP request handlers for the gallery.
//!
//! # Endpoints
//!
//! - `GET /` - Home page
//! - `GET /images` - Public image listing
//! - `GET /images/{name}` - Raw image bytes
//! - `GET /admin` - Admin listing with upload form (protected)
//! - `POST /upload` - Multipart upload (protected)
//! - `GET|POST /admin/delete/{name}` - Delete an image (protected)
//! - `GET /health` - Health check

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use futures::TryStreamExt;
use serde::Serialize;
use tokio_util::io::{ReaderStream, StreamReader};
use tracing::{debug, error, warn};

use crate::error::{StorageError, UploadError};
use crate::gallery::Gallery;
use crate::storage::{ImageStore, RecordName};

use super::templates;

/// Name of the multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "image";

/// Where upload and delete redirect to.
pub const ADMIN_PATH: &str = "/admin";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state, passed to handlers via Axum's State extractor.
pub struct AppState<S: ImageStore> {
    /// The image store
    pub store: Arc<S>,

    /// Listings over the same store
    pub gallery: Gallery<S>,

    /// Cache-Control max-age for image bytes, in seconds
    pub cache_max_age: u32,
}

impl<S: ImageStore> AppState<S> {
    /// Create a new application state with the given store.
    pub fn new(store: S) -> Self {
        Self::with_cache_max_age(store, 3600)
    }

    /// Create a new application state with custom cache max-age.
    pub fn with_cache_max_age(store: S, cache_max_age: u32) -> Self {
        let store = Arc::new(store);
        Self {
            gallery: Gallery::new(Arc::clone(&store)),
            store,
            cache_max_age,
        }
    }
}

impl<S: ImageStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            gallery: self.gallery.clone(),
            cache_max_age: self.cache_max_age,
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "not_found", "internal_error")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: None,
        }
    }

    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert StorageError to HTTP response.
///
/// Clients only ever see "not found", "bad extension", or a generic failure;
/// the specific cause goes to the log.
impl IntoResponse for StorageError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            StorageError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", "Not Found"),
            StorageError::InvalidExtension(_) => (
                StatusCode::BAD_REQUEST,
                "invalid_extension",
                "Unsupported file extension",
            ),
            StorageError::RandomSource(_)
            | StorageError::Write { .. }
            | StorageError::List(_)
            | StorageError::Read { .. }
            | StorageError::Remove { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal Server Error",
            ),
        };

        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Server error: {}",
                self
            );
        } else if status == StatusCode::NOT_FOUND {
            debug!(
                error_type = error_type,
                status = status.as_u16(),
                "Resource not found: {}",
                self
            );
        } else {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                self
            );
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);
        (status, Json(error_response)).into_response()
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let error_type = match &self {
            UploadError::Storage(err) => return err.clone().into_response(),
            UploadError::MissingField(_) => "missing_field",
            UploadError::Multipart(_) => "invalid_multipart",
        };
        let status = StatusCode::BAD_REQUEST;

        warn!(
            error_type = error_type,
            status = status.as_u16(),
            "Rejected upload: {}",
            self
        );

        let error_response = ErrorResponse::with_status(error_type, self.to_string(), status);
        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle home page requests.
///
/// # Endpoint
///
/// `GET /`
pub async fn home_handler() -> Html<String> {
    Html(templates::render_home())
}

/// Handle the public image listing.
///
/// # Endpoint
///
/// `GET /images`
///
/// # Errors
///
/// - `500 Internal Server Error`: The content root could not be read
pub async fn images_handler<S: ImageStore>(
    State(state): State<AppState<S>>,
) -> Result<Html<String>, StorageError> {
    let images = state.gallery.public_listing().await?;
    Ok(Html(templates::render_images(&images)))
}

/// Handle image requests, streaming the stored bytes.
///
/// # Endpoint
///
/// `GET /images/{name}`
///
/// # Path Parameters
///
/// - `name`: Record name as shown in the listing
///
/// # Response
///
/// `200 OK` with the raw bytes, `Content-Type` guessed from the extension.
///
/// # Errors
///
/// - `404 Not Found`: No such record, or the name is not a record name
/// - `500 Internal Server Error`: The record could not be opened
pub async fn image_handler<S: ImageStore>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<Response, StorageError> {
    let name = RecordName::parse(&name).ok_or(StorageError::NotFound(name))?;
    let content = state.store.fetch(&name).await?;

    let content_type = mime_guess::from_path(content.name.as_str()).first_or_octet_stream();

    let response = (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_LENGTH, content.len.to_string()),
            (
                header::CACHE_CONTROL,
                format!("public, max-age={}", state.cache_max_age),
            ),
        ],
        Body::from_stream(ReaderStream::new(content.reader)),
    )
        .into_response();

    Ok(response)
}

/// Handle the admin listing.
///
/// # Endpoint
///
/// `GET /admin` (requires authentication)
pub async fn admin_handler<S: ImageStore>(
    State(state): State<AppState<S>>,
) -> Result<Html<String>, StorageError> {
    let images = state.gallery.admin_listing().await?;
    Ok(Html(templates::render_admin(&images)))
}

/// Handle uploads.
///
/// # Endpoint
///
/// `POST /upload` (requires authentication)
///
/// Expects a `multipart/form-data` body with a file in the `image` field. Only
/// the extension of the submitted filename is kept.
///
/// # Response
///
/// `303 See Other` redirecting to `/admin`.
///
/// # Errors
///
/// - `400 Bad Request`: No `image` field, malformed body, or unusable extension
/// - `500 Internal Server Error`: The file could not be written
pub async fn upload_handler<S: ImageStore>(
    State(state): State<AppState<S>>,
    mut multipart: Multipart,
) -> Result<Redirect, UploadError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let reader = StreamReader::new(field.map_err(|e| std::io::Error::other(e.to_string())));
        let reader = std::pin::pin!(reader);

        let name = state.store.store(reader, &original_name).await?;
        debug!(name = %name, original_name = %original_name, "Upload complete");

        return Ok(Redirect::to(ADMIN_PATH));
    }

    Err(UploadError::MissingField(UPLOAD_FIELD))
}

/// Handle delete requests.
///
/// # Endpoint
///
/// `GET /admin/delete/{name}` or `POST /admin/delete/{name}` (requires authentication)
///
/// # Response
///
/// `303 See Other` redirecting to `/admin`.
///
/// # Errors
///
/// - `404 Not Found`: No such record
/// - `500 Internal Server Error`: The record could not be removed
pub async fn delete_handler<S: ImageStore>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<Redirect, StorageError> {
    let name = RecordName::parse(&name).ok_or(StorageError::NotFound(name))?;
    state.store.delete(&name).await?;
    Ok(Redirect::to(ADMIN_PATH))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
