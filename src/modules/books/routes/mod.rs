use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use catalog_http::AppError;
use serde_json::json;

use super::models::{Book, BookInput, FieldCheck};
use super::store::{BookStore, StoreError};
use super::validation::{self, ValidationResult};

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => AppError::not_found(err.to_string()),
            StoreError::CapacityReached(_) => AppError::conflict(err.to_string()),
        }
    }
}

/// Build the books router over a shared store.
pub fn router(store: Arc<BookStore>) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/health", get(health_check))
        .route("/validate", post(validate_book))
        .route("/validate/field", post(validate_field))
        .route(
            "/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(store)
}

/// Turn a failed check into a 422 carrying the offending field.
fn rejection(result: ValidationResult) -> AppError {
    let message = result.message.unwrap_or(validation::messages::RECORD_REQUIRED);
    let detail = match result.field {
        Some(field) => json!({ "field": field, "message": message }),
        None => json!({ "message": message }),
    };
    AppError::validation(vec![detail], message)
}

fn checked(record: Option<BookInput>) -> Result<BookInput, AppError> {
    let result = validation::validate_book(record.as_ref());
    match record {
        Some(record) if result.is_valid => Ok(record),
        _ => {
            tracing::debug!(field = ?result.field, "book rejected by validation");
            Err(rejection(result))
        }
    }
}

async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn list_books(State(store): State<Arc<BookStore>>) -> Json<Vec<Book>> {
    Json(store.list().await)
}

async fn get_book(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    Ok(Json(store.get(&id).await?))
}

async fn create_book(
    State(store): State<Arc<BookStore>>,
    payload: Result<Json<Option<BookInput>>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let Json(record) = payload?;
    let record = checked(record)?;
    let book = store.create(record).await?;
    tracing::info!(book_id = %book.id, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<String>,
    payload: Result<Json<Option<BookInput>>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let Json(record) = payload?;
    let record = checked(record)?;
    let book = store.update(&id, record).await?;
    tracing::info!(book_id = %book.id, "book updated");
    Ok(Json(book))
}

async fn delete_book(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    store.delete(&id).await?;
    tracing::info!(book_id = %id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn validate_book(
    payload: Result<Json<Option<BookInput>>, JsonRejection>,
) -> Result<Json<ValidationResult>, AppError> {
    let Json(record) = payload?;
    Ok(Json(validation::validate_book(record.as_ref())))
}

async fn validate_field(
    payload: Result<Json<FieldCheck>, JsonRejection>,
) -> Result<Json<ValidationResult>, AppError> {
    let Json(check) = payload?;
    Ok(Json(validation::validate_field(
        &check.field,
        check.value.as_deref(),
    )))
}
