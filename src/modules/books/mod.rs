pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use serde_json::json;

use folio_kernel::{InitCtx, Module};

use service::BookService;

/// Books module: catalog creation, listing, search, and the detail view.
pub struct BooksModule {
    service: Arc<BookService>,
}

impl BooksModule {
    pub fn new(service: Arc<BookService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route(
                "/books",
                get(routes::list_books).post(routes::add_book),
            )
            .route("/books/{id}", get(routes::get_book))
            .route("/search", get(routes::search_books))
            .with_state(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/books": {
                    "get": {
                        "summary": "List books with pagination and optional author/genre filters",
                        "tags": ["Books"],
                        "parameters": [
                            {"name": "page", "in": "query", "schema": {"type": "string"}},
                            {"name": "limit", "in": "query", "schema": {"type": "string"}},
                            {"name": "author", "in": "query", "schema": {"type": "string"}},
                            {"name": "genre", "in": "query", "schema": {"type": "string"}}
                        ],
                        "responses": {
                            "200": {
                                "description": "Page of books with pagination metadata",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "books": {
                                                    "type": "array",
                                                    "items": {"$ref": "#/components/schemas/Book"}
                                                },
                                                "pagination": {"$ref": "#/components/schemas/Pagination"}
                                            }
                                        }
                                    }
                                }
                            },
                            "401": {
                                "description": "Not authenticated",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/ErrorResponse"}
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Add a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {
                                            "title": {"type": "string"},
                                            "author": {"type": "string"},
                                            "genre": {"type": "string"},
                                            "price": {"type": "number"}
                                        },
                                        "required": ["title", "author", "genre", "price"]
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Book created",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "message": {"type": "string"},
                                                "book": {"$ref": "#/components/schemas/Book"}
                                            }
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Missing fields or duplicate title",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/ErrorResponse"}
                                    }
                                }
                            }
                        }
                    }
                },
                "/books/{id}": {
                    "get": {
                        "summary": "Book detail with reviews and derived average rating",
                        "tags": ["Books"],
                        "parameters": [
                            {"name": "id", "in": "path", "required": true, "schema": {"type": "string", "format": "uuid"}}
                        ],
                        "responses": {
                            "200": {
                                "description": "Book with its review set",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "book": {"$ref": "#/components/schemas/Book"},
                                                "averageRating": {"type": "number"},
                                                "totalReviews": {"type": "integer"},
                                                "reviews": {
                                                    "type": "array",
                                                    "items": {"$ref": "#/components/schemas/Review"}
                                                }
                                            }
                                        }
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
                "/search": {
                    "get": {
                        "summary": "Search books by title or author",
                        "tags": ["Books"],
                        "parameters": [
                            {"name": "q", "in": "query", "required": true, "schema": {"type": "string"}},
                            {"name": "page", "in": "query", "schema": {"type": "string"}},
                            {"name": "limit", "in": "query", "schema": {"type": "string"}}
                        ],
                        "responses": {
                            "200": {
                                "description": "Matching books with pagination metadata",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "searchQuery": {"type": "string"},
                                                "books": {
                                                    "type": "array",
                                                    "items": {"$ref": "#/components/schemas/Book"}
                                                },
                                                "pagination": {"$ref": "#/components/schemas/Pagination"}
                                            }
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Missing search query",
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
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string", "format": "uuid"},
                            "title": {"type": "string"},
                            "author": {"type": "string"},
                            "genre": {"type": "string"},
                            "price": {"type": "number"},
                            "createdAt": {"type": "string", "format": "date-time"},
                            "updatedAt": {"type": "string", "format": "date-time"}
                        },
                        "required": ["id", "title", "author", "genre", "price", "createdAt", "updatedAt"]
                    },
                    "Pagination": {
                        "type": "object",
                        "properties": {
                            "currentPage": {"type": "integer"},
                            "totalPages": {"type": "integer"},
                            "totalBooks": {"type": "integer"},
                            "hasNext": {"type": "boolean"},
                            "hasPrev": {"type": "boolean"}
                        },
                        "required": ["currentPage", "totalPages", "totalBooks", "hasNext", "hasPrev"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(service: Arc<BookService>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(service))
}
