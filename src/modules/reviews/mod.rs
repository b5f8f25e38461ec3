pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    routing::{post, put},
    Router,
};
use serde_json::json;

use folio_kernel::{InitCtx, Module};

use service::ReviewService;

/// Reviews module: user-scoped review creation and ownership-gated mutation.
pub struct ReviewsModule {
    service: Arc<ReviewService>,
}

impl ReviewsModule {
    pub fn new(service: Arc<ReviewService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Module for ReviewsModule {
    fn name(&self) -> &'static str {
        "reviews"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "reviews module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/books/{id}/reviews", post(routes::add_review))
            .route(
                "/reviews/{id}",
                put(routes::update_review).delete(routes::delete_review),
            )
            .with_state(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/books/{id}/reviews": {
                    "post": {
                        "summary": "Add a review to a book",
                        "tags": ["Reviews"],
                        "parameters": [
                            {"name": "id", "in": "path", "required": true, "schema": {"type": "string", "format": "uuid"}}
                        ],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {
                                            "rating": {"type": "integer", "minimum": 1, "maximum": 5},
                                            "comment": {"type": "string"}
                                        },
                                        "required": ["rating", "comment"]
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Review created",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "message": {"type": "string"},
                                                "review": {"$ref": "#/components/schemas/Review"}
                                            }
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Invalid rating/comment or duplicate review",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/ErrorResponse"}
                                    }
                                }
                            },
                            "404": {
                                "description": "Book not found",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/ErrorResponse"}
                                    }
                                }
                            }
                        }
                    }
                },
                "/reviews/{id}": {
                    "put": {
                        "summary": "Update your own review",
                        "tags": ["Reviews"],
                        "parameters": [
                            {"name": "id", "in": "path", "required": true, "schema": {"type": "string", "format": "uuid"}}
                        ],
                        "responses": {
                            "200": {
                                "description": "Review updated",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "message": {"type": "string"},
                                                "review": {"$ref": "#/components/schemas/Review"}
                                            }
                                        }
                                    }
                                }
                            },
                            "403": {
                                "description": "Not the review owner",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/ErrorResponse"}
                                    }
                                }
                            },
                            "404": {
                                "description": "Review not found",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/ErrorResponse"}
                                    }
                                }
                            }
                        }
                    },
                    "delete": {
                        "summary": "Delete your own review",
                        "tags": ["Reviews"],
                        "parameters": [
                            {"name": "id", "in": "path", "required": true, "schema": {"type": "string", "format": "uuid"}}
                        ],
                        "responses": {
                            "200": {
                                "description": "Review deleted",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "message": {"type": "string"}
                                            }
                                        }
                                    }
                                }
                            },
                            "403": {
                                "description": "Not the review owner",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/ErrorResponse"}
                                    }
                                }
                            },
                            "404": {
                                "description": "Review not found",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/ErrorResponse"}
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Review": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string", "format": "uuid"},
                            "bookId": {"type": "string", "format": "uuid"},
                            "userId": {"type": "string", "format": "uuid"},
                            "rating": {"type": "integer"},
                            "comment": {"type": "string"},
                            "createdAt": {"type": "string", "format": "date-time"},
                            "updatedAt": {"type": "string", "format": "date-time"},
                            "user": {
                                "type": "object",
                                "properties": {
                                    "username": {"type": "string"},
                                    "email": {"type": "string"}
                                }
                            }
                        },
                        "required": ["id", "bookId", "userId", "rating", "comment"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "reviews module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "reviews module stopped");
        Ok(())
    }
}

/// Create a new instance of the reviews module
pub fn create_module(service: Arc<ReviewService>) -> Arc<dyn Module> {
    Arc::new(ReviewsModule::new(service))
}
