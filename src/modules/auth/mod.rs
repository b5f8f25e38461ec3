pub mod models;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    routing::{get, post},
    Router,
};
use serde_json::json;

use folio_authz::AuthContext;
use folio_kernel::{InitCtx, Module};

/// Auth module: account creation and session lifecycle over the access
/// guard's user directory.
pub struct AuthModule {
    ctx: AuthContext,
}

impl AuthModule {
    pub fn new(ctx: AuthContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Module for AuthModule {
    fn name(&self) -> &'static str {
        "auth"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            session_cookie = %self.ctx.cookie_name,
            "auth module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/auth/signup", post(routes::signup))
            .route("/auth/login", post(routes::login))
            .route("/auth/logout", post(routes::logout))
            .route("/auth/check", get(routes::check))
            .with_state(self.ctx.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/auth/signup": {
                    "post": {
                        "summary": "Create an account and open a session",
                        "tags": ["Auth"],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {
                                            "username": {"type": "string"},
                                            "email": {"type": "string", "format": "email"},
                                            "password": {"type": "string"}
                                        },
                                        "required": ["username", "email", "password"]
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Account created; session cookie set",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/AuthUser"}
                                    }
                                }
                            },
                            "400": {
                                "description": "Missing fields or username/email already taken",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/ErrorResponse"}
                                    }
                                }
                            }
                        }
                    }
                },
                "/auth/login": {
                    "post": {
                        "summary": "Open a session",
                        "tags": ["Auth"],
                        "responses": {
                            "200": {
                                "description": "Logged in; session cookie set",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/AuthUser"}
                                    }
                                }
                            },
                            "401": {
                                "description": "Invalid credentials",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/ErrorResponse"}
                                    }
                                }
                            }
                        }
                    }
                },
                "/auth/logout": {
                    "post": {
                        "summary": "Revoke the current session",
                        "tags": ["Auth"],
                        "responses": {
                            "200": {
                                "description": "Session revoked; cookie cleared"
                            }
                        }
                    }
                },
                "/auth/check": {
                    "get": {
                        "summary": "Return the authenticated user",
                        "tags": ["Auth"],
                        "responses": {
                            "200": {
                                "description": "Current user projection",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/AuthUser"}
                                    }
                                }
                            },
                            "401": {
                                "description": "No valid session",
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
                    "AuthUser": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string", "format": "uuid"},
                            "username": {"type": "string"},
                            "email": {"type": "string", "format": "email"}
                        },
                        "required": ["id", "username", "email"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "auth module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "auth module stopped");
        Ok(())
    }
}

/// Create a new instance of the auth module
pub fn create_module(ctx: AuthContext) -> Arc<dyn Module> {
    Arc::new(AuthModule::new(ctx))
}
