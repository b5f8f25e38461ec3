//! Router builder for the FOLIO HTTP server.

use axum::{routing::get, Extension, Router};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use folio_kernel::ModuleRegistry;

type LayerFn = Box<dyn FnOnce(Router) -> Router>;

/// Builder for constructing the main HTTP router.
///
/// Module routers are merged and nested under `/api`; middleware is recorded
/// here and applied in [`RouterBuilder::build`], after every route has been
/// mounted, so the layers wrap the whole application.
pub struct RouterBuilder {
    router: Router,
    api: Router,
    tracing: bool,
    cors: bool,
    request_id: bool,
    timeout_ms: Option<u64>,
    extensions: Vec<LayerFn>,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            api: Router::new(),
            tracing: false,
            cors: false,
            request_id: false,
            timeout_ms: None,
            extensions: Vec::new(),
        }
    }

    /// Add a root-level route (outside the `/api` prefix)
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Merge a module's router into the `/api` tree
    pub fn mount_module(mut self, module_name: &str, module_router: Router) -> Self {
        tracing::info!(module = module_name, "mounting module routes under /api");
        self.api = self.api.merge(module_router);
        self
    }

    /// Enable request tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.tracing = true;
        self
    }

    /// Enable permissive CORS middleware
    pub fn with_cors(mut self) -> Self {
        self.cors = true;
        self
    }

    /// Enable request ID middleware
    pub fn with_request_id(mut self) -> Self {
        self.request_id = true;
        self
    }

    /// Enable request timeout middleware
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Attach shared state as a request extension visible to every handler
    pub fn with_extension<T>(mut self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.extensions
            .push(Box::new(move |router| router.layer(Extension(value))));
        self
    }

    /// Add OpenAPI documentation by collecting specs from all modules
    pub fn with_openapi(mut self, registry: &ModuleRegistry) -> Self {
        // Start with base OpenAPI spec
        let mut openapi_spec = serde_json::json!({
            "openapi": "3.0.0",
            "info": {
                "title": "FOLIO API",
                "version": "1.0.0",
                "description": "Book catalog and review service"
            },
            "paths": {},
            "components": {
                "schemas": {}
            }
        });

        // Add common error response schema
        openapi_spec["components"]["schemas"]["ErrorResponse"] = serde_json::json!({
            "type": "object",
            "properties": {
                "message": {
                    "type": "string"
                },
                "error": {
                    "type": "string",
                    "description": "Underlying cause, present on server errors"
                }
            },
            "required": ["message"]
        });

        // Add server health endpoint
        openapi_spec["paths"]["/healthz"] = serde_json::json!({
            "get": {
                "summary": "Health check",
                "responses": {
                    "200": {
                        "description": "OK",
                        "content": {
                            "text/plain": {
                                "schema": {
                                    "type": "string"
                                }
                            }
                        }
                    }
                }
            }
        });

        // Collect OpenAPI specs from all modules
        for module in registry.modules() {
            if let Some(module_spec) = module.openapi() {
                // Merge paths from module, prefixed with the /api mount point
                if let Some(paths) = module_spec.get("paths") {
                    if let Some(paths_obj) = paths.as_object() {
                        for (path, path_item) in paths_obj {
                            let prefixed_path = format!("/api{}", path);
                            openapi_spec["paths"][prefixed_path] = path_item.clone();
                        }
                    }
                }

                // Merge schemas from module
                if let Some(components) = module_spec.get("components") {
                    if let Some(schemas) = components.get("schemas") {
                        if let Some(schemas_obj) = schemas.as_object() {
                            for (schema_name, schema_def) in schemas_obj {
                                openapi_spec["components"]["schemas"][schema_name] =
                                    schema_def.clone();
                            }
                        }
                    }
                }
            }
        }

        // Deserialize our JSON spec into a proper utoipa OpenApi object
        // so SwaggerUI can serve it
        let openapi_obj: utoipa::openapi::OpenApi = serde_json::from_value(openapi_spec.clone())
            .unwrap_or_else(|_| {
                utoipa::openapi::OpenApiBuilder::new()
                    .info(
                        utoipa::openapi::InfoBuilder::new()
                            .title("FOLIO API")
                            .version("1.0.0")
                            .build(),
                    )
                    .build()
            });

        self.router = self.router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi_obj),
        );

        // Also serve the raw JSON spec at /docs/openapi.json for external consumers
        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(openapi_spec.clone()) }),
        );

        self
    }

    /// Build the final router, applying middleware around the full route set
    pub fn build(self) -> Router {
        let mut router = self.router.nest("/api", self.api);

        if self.tracing {
            router = router.layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().include_headers(true))
                    .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                    .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
            );
        }

        if self.cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.request_id {
            router = router.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));
        }

        if let Some(timeout_ms) = self.timeout_ms {
            router = router.layer(TimeoutLayer::new(Duration::from_millis(timeout_ms)));
        }

        for apply in self.extensions {
            router = apply(router);
        }

        router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[tokio::test]
    async fn builder_accepts_root_routes() {
        let _router = RouterBuilder::new()
            .route("/test", get(|| async { "test" }))
            .build();
    }

    #[tokio::test]
    async fn builder_mounts_module_routers() {
        let module_router = Router::new().route("/books", get(|| async { "books" }));

        let _router = RouterBuilder::new()
            .mount_module("books", module_router)
            .build();
    }

    #[tokio::test]
    async fn builder_applies_middleware_chain() {
        let _router = RouterBuilder::new()
            .with_tracing()
            .with_cors()
            .with_request_id()
            .with_timeout(5000)
            .route("/health", get(|| async { "ok" }))
            .build();
    }
}
