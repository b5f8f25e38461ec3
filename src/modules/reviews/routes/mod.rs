//! HTTP handlers for the reviews module.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use folio_authz::CurrentUser;
use folio_http::AppError;

use super::models::{ReviewPayload, ReviewWithOwner};
use super::service::ReviewService;

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub message: &'static str,
    pub review: ReviewWithOwner,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn add_review(
    State(service): State<Arc<ReviewService>>,
    user: CurrentUser,
    Path(book_id): Path<Uuid>,
    Json(payload): Json<ReviewPayload>,
) -> Result<impl IntoResponse, AppError> {
    let review = service.add_review(book_id, &user, payload)?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewResponse {
            message: "Review added successfully",
            review,
        }),
    ))
}

pub async fn update_review(
    State(service): State<Arc<ReviewService>>,
    user: CurrentUser,
    Path(review_id): Path<Uuid>,
    Json(payload): Json<ReviewPayload>,
) -> Result<impl IntoResponse, AppError> {
    let review = service.update_review(review_id, &user, payload)?;

    Ok(Json(ReviewResponse {
        message: "Review updated successfully",
        review,
    }))
}

pub async fn delete_review(
    State(service): State<Arc<ReviewService>>,
    user: CurrentUser,
    Path(review_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    service.delete_review(review_id, &user)?;

    Ok(Json(MessageResponse {
        message: "Review deleted successfully",
    }))
}
