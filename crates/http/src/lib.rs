//! HTTP server facade for FOLIO with Axum, error handling, and OpenAPI support.

use anyhow::Context;
use axum::{routing::get, Router};

use folio_kernel::ModuleRegistry;

pub mod error;
pub mod router;

pub use error::AppError;
use router::RouterBuilder;

/// Assemble the application router: global middleware, health route, module
/// routes under `/api`, and merged OpenAPI docs.
///
/// The caller may attach further state with [`RouterBuilder::with_extension`]
/// before calling [`RouterBuilder::build`].
pub fn build_router(
    registry: &ModuleRegistry,
    settings: &folio_kernel::settings::Settings,
) -> RouterBuilder {
    let mut builder = RouterBuilder::new()
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms)
        .route("/healthz", get(health_check));

    for module in registry.modules() {
        builder = builder.mount_module(module.name(), module.routes());
    }

    builder.with_openapi(registry)
}

/// Bind and serve the given router until the process is stopped
pub async fn start_server(
    app: Router,
    settings: &folio_kernel::settings::Settings,
) -> anyhow::Result<()> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", settings.server.host, settings.server.port))
            .await
            .context("failed to bind to address")?;

    tracing::info!(
        "HTTP server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}
