//! HTTP handlers for the books module.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use folio_authz::CurrentUser;
use folio_http::AppError;

use super::models::{BookCreatedResponse, CreateBookRequest, ListBooksQuery, SearchBooksQuery};
use super::service::BookService;

pub async fn add_book(
    State(service): State<Arc<BookService>>,
    _user: CurrentUser,
    Json(payload): Json<CreateBookRequest>,
) -> Result<impl IntoResponse, AppError> {
    let book = service.add_book(payload)?;

    Ok((
        StatusCode::CREATED,
        Json(BookCreatedResponse {
            message: "Book added successfully",
            book,
        }),
    ))
}

pub async fn list_books(
    State(service): State<Arc<BookService>>,
    _user: CurrentUser,
    Query(query): Query<ListBooksQuery>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(service.list_books(query)))
}

pub async fn search_books(
    State(service): State<Arc<BookService>>,
    _user: CurrentUser,
    Query(query): Query<SearchBooksQuery>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(service.search_books(query)?))
}

pub async fn get_book(
    State(service): State<Arc<BookService>>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(service.get_book(id)?))
}
