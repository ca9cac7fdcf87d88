//! Image Gallery - upload, browse, and delete images.
//!
//! This binary starts the HTTP server and configures all components.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use image_gallery::{config::Config, create_router, ImageStore, LocalImageStore};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Image Gallery v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Content root: {}", config.content_root.display());
    info!("  Assets dir: {}", config.assets_dir.display());
    info!("  Admin user: {}", config.admin_username);
    info!(
        "  Upload limit: {:.1} MiB",
        config.max_upload_size as f64 / (1024.0 * 1024.0)
    );

    if !config.assets_dir.is_dir() {
        warn!(
            "  Assets directory '{}' does not exist; /assets will return 404",
            config.assets_dir.display()
        );
    }

    // Prepare the content root
    let store = LocalImageStore::new(&config.content_root);
    if let Err(e) = store.ensure_root().await {
        error!(
            "Failed to create content root '{}': {}",
            config.content_root.display(),
            e
        );
        return ExitCode::FAILURE;
    }

    match store.list().await {
        Ok(images) => info!("  Found {} image(s)", images.len()),
        Err(e) => {
            error!("Content root is not readable: {}", e);
            return ExitCode::FAILURE;
        }
    }

    let router = create_router(store, config.router_config());

    // Bind and serve
    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Gallery:  http://{}/images", addr);
    info!("  Admin:    http://{}/admin", addr);
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "image_gallery=debug,tower_http=debug"
    } else {
        "image_gallery=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
