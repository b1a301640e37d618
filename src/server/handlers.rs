//! HTTP request handlers.

use crate::error::Result;
use crate::query::{AuthorQuery, BookQuery};
use crate::server::AppState;
use crate::stats::Statistics;
use crate::validation::{AuthorInput, BookInput, CategoryInput};
use crate::views::{AuthorView, BookView, CategoryView};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

/// 201 with a Location header pointing at the new resource.
fn created(location: String, body: impl Serialize) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response()
}

// ============================================================================
// SYSTEM
// ============================================================================

/// Service banner with the endpoint map.
pub async fn index(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "message": format!("{} is running", state.config.server.title),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now(),
        "endpoints": {
            "health": "/health",
            "books": "/api/books",
            "authors": "/api/authors",
            "categories": "/api/categories",
            "statistics": "/api/statistics",
        },
    }))
}

/// Liveness check reporting store connectivity and row counts.
pub async fn health(State(state): State<AppState>) -> Response {
    match state.catalog.counts() {
        Ok(counts) => Json(json!({
            "status": "healthy",
            "database": "connected",
            "counts": counts,
            "timestamp": chrono::Utc::now(),
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "unhealthy",
                    "database": "disconnected",
                    "error": e.to_string(),
                    "timestamp": chrono::Utc::now(),
                })),
            )
                .into_response()
        }
    }
}

// ============================================================================
// AUTHORS
// ============================================================================

/// List authors.
pub async fn list_authors(
    State(state): State<AppState>,
    Query(params): Query<AuthorQuery>,
) -> Result<Json<Vec<AuthorView>>> {
    Ok(Json(state.catalog.list_authors(&params)?))
}

/// Get one author with books.
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AuthorView>> {
    Ok(Json(state.catalog.get_author(id)?))
}

/// Create an author.
pub async fn create_author(
    State(state): State<AppState>,
    Json(input): Json<AuthorInput>,
) -> Result<Response> {
    let author = state.catalog.create_author(input)?;
    Ok(created(format!("/api/authors/{}", author.id), author))
}

/// Update an author.
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<AuthorInput>,
) -> Result<Json<AuthorView>> {
    Ok(Json(state.catalog.update_author(id, input)?))
}

/// Delete an author.
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.catalog.delete_author(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// CATEGORIES
// ============================================================================

/// List categories.
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<CategoryView>>> {
    Ok(Json(state.catalog.list_categories()?))
}

/// Get one category with books.
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CategoryView>> {
    Ok(Json(state.catalog.get_category(id)?))
}

/// Create a category.
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CategoryInput>,
) -> Result<Response> {
    let category = state.catalog.create_category(input)?;
    Ok(created(
        format!("/api/categories/{}", category.id),
        category,
    ))
}

/// Update a category.
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<CategoryInput>,
) -> Result<Json<CategoryView>> {
    Ok(Json(state.catalog.update_category(id, input)?))
}

/// Delete a category.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.catalog.delete_category(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// BOOKS
// ============================================================================

/// List books.
pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<BookQuery>,
) -> Result<Json<Vec<BookView>>> {
    Ok(Json(state.catalog.list_books(&params)?))
}

/// Get one book.
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BookView>> {
    Ok(Json(state.catalog.get_book(id)?))
}

/// Create a book.
pub async fn create_book(
    State(state): State<AppState>,
    Json(input): Json<BookInput>,
) -> Result<Response> {
    let book = state.catalog.create_book(input)?;
    Ok(created(format!("/api/books/{}", book.id), book))
}

/// Update a book.
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<BookInput>,
) -> Result<Json<BookView>> {
    Ok(Json(state.catalog.update_book(id, input)?))
}

/// Delete a book.
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.catalog.delete_book(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// STATISTICS
// ============================================================================

/// Catalog statistics.
pub async fn statistics(State(state): State<AppState>) -> Result<Json<Statistics>> {
    Ok(Json(state.catalog.statistics()?))
}
