pub mod models;
pub mod routes;
pub mod store;
pub mod validation;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use catalog_kernel::{settings::CatalogSettings, InitCtx, Module};
use serde_json::json;

use store::BookStore;

/// Books module: CRUD over the catalog plus live validation endpoints
pub struct BooksModule {
    store: Arc<BookStore>,
}

impl BooksModule {
    pub fn new(settings: &CatalogSettings) -> Self {
        Self {
            store: Arc::new(BookStore::new(settings.max_books)),
        }
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
            max_books = ctx.settings.catalog.max_books,
            validated_fields = ?validation::known_fields().collect::<Vec<_>>(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(Arc::clone(&self.store))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let books = self.store.len().await;
        tracing::info!(
            module = self.name(),
            books,
            "books module stopped"
        );
        Ok(())
    }
}

fn json_body(schema: &str) -> serde_json::Value {
    json!({
        "content": {
            "application/json": {
                "schema": { "$ref": format!("#/components/schemas/{schema}") }
            }
        }
    })
}

fn response(description: &str, schema: &str) -> serde_json::Value {
    let mut response = json_body(schema);
    response["description"] = json!(description);
    response
}

fn openapi_fragment() -> serde_json::Value {
    let id_param = json!([{
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    }]);
    let text_field = json!({ "type": "string" });

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "List of books",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            }
                        }
                    }
                },
                "post": {
                    "summary": "Create a book",
                    "tags": ["Books"],
                    "requestBody": json_body("BookInput"),
                    "responses": {
                        "201": response("Created book", "Book"),
                        "409": response("Catalog is full", "ErrorResponse"),
                        "422": response("Validation error", "ErrorResponse")
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": "Get a book",
                    "tags": ["Books"],
                    "parameters": id_param,
                    "responses": {
                        "200": response("Book", "Book"),
                        "404": response("Book not found", "ErrorResponse")
                    }
                },
                "put": {
                    "summary": "Replace a book",
                    "tags": ["Books"],
                    "parameters": id_param,
                    "requestBody": json_body("BookInput"),
                    "responses": {
                        "200": response("Updated book", "Book"),
                        "404": response("Book not found", "ErrorResponse"),
                        "422": response("Validation error", "ErrorResponse")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": id_param,
                    "responses": {
                        "204": { "description": "Deleted" },
                        "404": response("Book not found", "ErrorResponse")
                    }
                }
            },
            "/validate": {
                "post": {
                    "summary": "Validate a whole book record",
                    "tags": ["Books"],
                    "requestBody": json_body("BookInput"),
                    "responses": {
                        "200": response("Validation result", "ValidationResult")
                    }
                }
            },
            "/validate/field": {
                "post": {
                    "summary": "Validate a single form field",
                    "tags": ["Books"],
                    "requestBody": json_body("FieldCheck"),
                    "responses": {
                        "200": response("Validation result", "ValidationResult")
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Books health check",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "BookDetail": {
                    "type": "object",
                    "properties": {
                        "pageCount": text_field,
                        "coverImageUrl": text_field,
                        "description": text_field,
                        "language": text_field,
                        "publisher": text_field,
                        "edition": text_field
                    }
                },
                "BookInput": {
                    "type": "object",
                    "properties": {
                        "title": text_field,
                        "author": text_field,
                        "isbn": text_field,
                        "price": text_field,
                        "publishDate": text_field,
                        "detail": { "$ref": "#/components/schemas/BookDetail" }
                    }
                },
                "Book": {
                    "allOf": [
                        { "$ref": "#/components/schemas/BookInput" },
                        {
                            "type": "object",
                            "properties": { "id": text_field },
                            "required": ["id"]
                        }
                    ]
                },
                "FieldCheck": {
                    "type": "object",
                    "properties": {
                        "field": text_field,
                        "value": text_field
                    },
                    "required": ["field"]
                },
                "ValidationResult": {
                    "type": "object",
                    "properties": {
                        "isValid": { "type": "boolean" },
                        "message": text_field,
                        "field": text_field
                    },
                    "required": ["isValid"]
                }
            }
        }
    })
}

/// Create a new instance of the books module
pub fn create_module(settings: &CatalogSettings) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(settings))
}
