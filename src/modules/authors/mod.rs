pub mod models;
pub mod repository;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use folio_kernel::{InitCtx, Module};
use serde_json::json;

use super::openapi::{array_of, json_body, nullable, operation, path_id, query, schema_ref};
use service::AuthorService;

const TAG: &str = "Authors";

/// Authors slice mounted under `/api/authors`.
pub struct AuthorsModule {
    service: AuthorService,
}

impl AuthorsModule {
    pub fn new(service: AuthorService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let string = json!({ "type": "string" });
        let id = || vec![path_id("id")];

        Some(json!({
            "paths": {
                "/": {
                    "get": operation(TAG, "List authors", vec![], None, array_of("Author"), &[]),
                    "post": operation(TAG, "Create an author", vec![], Some(json_body("AuthorInput")), schema_ref("Author"), &[422])
                },
                "/{id}": {
                    "get": operation(TAG, "Get an author", id(), None, nullable("Author"), &[]),
                    "patch": operation(TAG, "Update an author", id(), Some(json_body("AuthorUpdateInput")), schema_ref("Author"), &[404, 422]),
                    "delete": operation(TAG, "Delete an author and its books", id(), None, json!({ "type": "boolean" }), &[])
                },
                "/by-email": {
                    "get": operation(TAG, "Find an author by email", vec![query("email", string.clone())], None, nullable("Author"), &[])
                },
                "/by-name": {
                    "get": operation(TAG, "Search authors by name", vec![query("name", string.clone())], None, array_of("Author"), &[])
                },
                "/by-nationality": {
                    "get": operation(TAG, "List authors of a nationality", vec![query("nationality", string)], None, array_of("Author"), &[])
                },
                "/with-books": {
                    "get": operation(TAG, "List authors with their books", vec![], None, array_of("AuthorWithBooks"), &[])
                },
                "/{id}/with-books": {
                    "get": operation(TAG, "Get an author with its books", id(), None, nullable("AuthorWithBooks"), &[])
                }
            },
            "components": {
                "schemas": {
                    "Author": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "name": { "type": "string" },
                            "email": { "type": "string", "description": "Unique across authors" },
                            "bio": { "type": ["string", "null"] },
                            "birthDate": { "type": ["string", "null"], "example": "1965-07-31T08:30:00" },
                            "nationality": { "type": ["string", "null"] }
                        },
                        "required": ["id", "name", "email"]
                    },
                    "AuthorWithBooks": {
                        "allOf": [
                            schema_ref("Author"),
                            {
                                "type": "object",
                                "properties": { "books": array_of("Book") },
                                "required": ["books"]
                            }
                        ]
                    },
                    "AuthorInput": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "email": { "type": "string" },
                            "bio": { "type": "string" },
                            "birthDate": { "type": "string", "description": "yyyy-MM-ddTHH:mm:ss" },
                            "nationality": { "type": "string" }
                        },
                        "required": ["name", "email"]
                    },
                    "AuthorUpdateInput": {
                        "type": "object",
                        "description": "Only non-null fields are applied",
                        "properties": {
                            "name": { "type": ["string", "null"] },
                            "email": { "type": ["string", "null"] },
                            "bio": { "type": ["string", "null"] },
                            "birthDate": { "type": ["string", "null"] },
                            "nationality": { "type": ["string", "null"] }
                        }
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module stopped");
        Ok(())
    }
}

pub fn create_module(service: AuthorService) -> Arc<dyn Module> {
    Arc::new(AuthorsModule::new(service))
}
