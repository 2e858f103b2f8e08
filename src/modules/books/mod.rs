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
use service::BookService;

const TAG: &str = "Books";

/// Books slice mounted under `/api/books`.
pub struct BooksModule {
    service: BookService,
}

impl BooksModule {
    pub fn new(service: BookService) -> Self {
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
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let string = json!({ "type": "string" });
        let number = json!({ "type": "number" });
        let id = || vec![path_id("id")];

        Some(json!({
            "paths": {
                "/": {
                    "get": operation(TAG, "List books", vec![], None, array_of("Book"), &[]),
                    "post": operation(TAG, "Create a book", vec![], Some(json_body("BookInput")), schema_ref("BookWithAuthor"), &[422])
                },
                "/{id}": {
                    "get": operation(TAG, "Get a book", id(), None, nullable("Book"), &[]),
                    "patch": operation(TAG, "Update a book", id(), Some(json_body("BookUpdateInput")), schema_ref("BookWithAuthor"), &[404, 422]),
                    "delete": operation(TAG, "Delete a book", id(), None, json!({ "type": "boolean" }), &[])
                },
                "/by-title": {
                    "get": operation(TAG, "Search books by title", vec![query("title", string.clone())], None, array_of("Book"), &[])
                },
                "/search": {
                    "get": operation(TAG, "Search titles and descriptions", vec![query("keyword", string.clone())], None, array_of("Book"), &[])
                },
                "/by-author/{author_id}": {
                    "get": operation(TAG, "List books of an author", vec![path_id("author_id")], None, array_of("Book"), &[])
                },
                "/by-price": {
                    "get": operation(TAG, "List books in a price range", vec![query("min", number.clone()), query("max", number)], None, array_of("Book"), &[])
                },
                "/with-author": {
                    "get": operation(TAG, "List books with their authors", vec![], None, array_of("BookWithAuthor"), &[])
                },
                "/{id}/with-author": {
                    "get": operation(TAG, "Get a book with its author", id(), None, nullable("BookWithAuthor"), &[])
                },
                "/by-author-name": {
                    "get": operation(TAG, "List books by author name", vec![query("name", string.clone())], None, array_of("Book"), &[])
                },
                "/by-author-nationality": {
                    "get": operation(TAG, "List books by author nationality", vec![query("nationality", string)], None, array_of("Book"), &[])
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "title": { "type": "string" },
                            "isbn": { "type": ["string", "null"] },
                            "description": { "type": ["string", "null"] },
                            "price": { "type": ["number", "null"] },
                            "pageCount": { "type": ["integer", "null"], "format": "int32" },
                            "publishedDate": { "type": ["string", "null"], "example": "2020-03-15T10:00:00" },
                            "authorId": { "type": "integer", "format": "int64" }
                        },
                        "required": ["id", "title", "authorId"]
                    },
                    "BookWithAuthor": {
                        "allOf": [
                            schema_ref("Book"),
                            {
                                "type": "object",
                                "properties": { "author": schema_ref("Author") },
                                "required": ["author"]
                            }
                        ]
                    },
                    "BookInput": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "isbn": { "type": "string" },
                            "description": { "type": "string" },
                            "price": { "type": "number" },
                            "pageCount": { "type": "integer", "format": "int32" },
                            "publishedDate": { "type": "string", "description": "yyyy-MM-ddTHH:mm:ss" },
                            "authorId": { "type": "integer", "format": "int64" }
                        },
                        "required": ["title", "authorId"]
                    },
                    "BookUpdateInput": {
                        "type": "object",
                        "description": "Only non-null fields are applied; authorId moves the book to another author",
                        "properties": {
                            "title": { "type": ["string", "null"] },
                            "isbn": { "type": ["string", "null"] },
                            "description": { "type": ["string", "null"] },
                            "price": { "type": ["number", "null"] },
                            "pageCount": { "type": ["integer", "null"] },
                            "publishedDate": { "type": ["string", "null"] },
                            "authorId": { "type": ["integer", "null"] }
                        }
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

pub fn create_module(service: BookService) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(service))
}
