//! Shared fixtures for integration tests.

use std::path::Path;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tokio::io::AsyncRead;
use tower::ServiceExt;

use image_gallery::{
    create_router, Credentials, ImageContent, ImageStore, LocalImageStore, RecordName,
    RouterConfig, StorageError,
};

pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "----gallery-test-boundary";

/// A record name that is well formed but never stored.
pub const UNKNOWN_NAME: &str = "3f2b8c1e-9a4d-4e7f-b2c1-0d9e8f7a6b5c.png";

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_USERNAME, TEST_PASSWORD)
}

/// `Authorization` header value for the test admin.
pub fn admin_auth() -> String {
    test_credentials().to_header_value()
}

// =============================================================================
// Test Application
// =============================================================================

/// A router over a scratch content root and assets directory.
pub struct TestApp {
    pub content_root: TempDir,
    pub assets: TempDir,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(|config| config)
    }

    pub fn with_config(customize: impl FnOnce(RouterConfig) -> RouterConfig) -> Self {
        let content_root = TempDir::new().unwrap();
        let assets = TempDir::new().unwrap();
        std::fs::write(assets.path().join("style.css"), "body { margin: 0; }").unwrap();

        let config = RouterConfig::new(test_credentials())
            .with_assets_dir(assets.path())
            .with_tracing(false);
        let router = create_router(LocalImageStore::new(content_root.path()), customize(config));

        Self {
            content_root,
            assets,
            router,
        }
    }

    pub fn root(&self) -> &Path {
        self.content_root.path()
    }

    /// Names of everything in the content root, sorted.
    pub fn content_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Place a file in the content root directly, bypassing the router.
    pub fn seed(&self, name: &str, data: &[u8]) {
        std::fs::write(self.root().join(name), data).unwrap();
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn get_as_admin(&self, uri: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, admin_auth())
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Upload a file as the admin. Returns the response.
    pub async fn upload(&self, filename: &str, data: &[u8]) -> Response<Body> {
        self.send(upload_request(Some(&admin_auth()), "image", filename, data))
            .await
    }
}

// =============================================================================
// Request Builders
// =============================================================================

/// Build a `multipart/form-data` body with one file field.
pub fn multipart_body(field: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Build a `POST /upload` request, optionally with an `Authorization` header.
pub fn upload_request(
    authorization: Option<&str>,
    field: &str,
    filename: &str,
    data: &[u8],
) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder
        .body(Body::from(multipart_body(field, filename, data)))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// =============================================================================
// Failing Store
// =============================================================================

/// An [`ImageStore`] whose every operation fails with an I/O-style error.
pub struct FailingStore;

#[async_trait]
impl ImageStore for FailingStore {
    async fn store<R>(&self, _content: R, _original_name: &str) -> Result<RecordName, StorageError>
    where
        R: AsyncRead + Send + Unpin,
    {
        Err(StorageError::Write {
            name: "pending".to_string(),
            message: "disk full".to_string(),
        })
    }

    async fn list(&self) -> Result<Vec<RecordName>, StorageError> {
        Err(StorageError::List("permission denied".to_string()))
    }

    async fn fetch(&self, name: &RecordName) -> Result<ImageContent, StorageError> {
        Err(StorageError::Read {
            name: name.to_string(),
            message: "permission denied".to_string(),
        })
    }

    async fn delete(&self, name: &RecordName) -> Result<(), StorageError> {
        Err(StorageError::Remove {
            name: name.to_string(),
            message: "read-only filesystem".to_string(),
        })
    }
}

/// A router over [`FailingStore`].
pub fn failing_router() -> Router {
    create_router(
        FailingStore,
        RouterConfig::new(test_credentials()).with_tracing(false),
    )
}
