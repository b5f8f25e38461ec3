//! Review aggregate service: one review per (book, user), mutable and
//! deletable only by its owner.

use std::sync::Arc;

use time::OffsetDateTime;
use uuid::Uuid;

use folio_authz::CurrentUser;
use folio_http::AppError;
use folio_store::{Collection, StoreError};

use crate::modules::books::models::Book;

use super::models::{Review, ReviewOwner, ReviewPayload, ReviewWithOwner};

pub struct ReviewService {
    books: Arc<Collection<Book>>,
    reviews: Arc<Collection<Review>>,
}

impl ReviewService {
    pub fn new(books: Arc<Collection<Book>>, reviews: Arc<Collection<Review>>) -> Self {
        Self { books, reviews }
    }

    /// Create a review for a book. The (book, user) unique index rejects a
    /// second review by the same user atomically.
    pub fn add_review(
        &self,
        book_id: Uuid,
        user: &CurrentUser,
        payload: ReviewPayload,
    ) -> Result<ReviewWithOwner, AppError> {
        let (rating, comment) = payload.validate()?;

        if self.books.get(book_id).is_none() {
            return Err(AppError::not_found("Book not found"));
        }

        let now = OffsetDateTime::now_utc();
        let review = Review {
            id: Uuid::now_v7(),
            book_id,
            user_id: user.id,
            rating,
            comment,
            created_at: now,
            updated_at: now,
        };

        let stored = self.reviews.insert(review).map_err(|err| match err {
            StoreError::Duplicate { .. } => {
                AppError::conflict("You have already reviewed this book")
            }
            other => other.into(),
        })?;

        tracing::info!(review_id = %stored.id, book_id = %book_id, user_id = %user.id, "review added");
        Ok(ReviewWithOwner {
            review: stored,
            user: ReviewOwner::from(user),
        })
    }

    /// Overwrite a review's rating and comment. Only the owner may do this.
    pub fn update_review(
        &self,
        review_id: Uuid,
        user: &CurrentUser,
        payload: ReviewPayload,
    ) -> Result<ReviewWithOwner, AppError> {
        let existing = self
            .reviews
            .get(review_id)
            .ok_or_else(|| AppError::not_found("Review not found"))?;

        if existing.user_id != user.id {
            return Err(AppError::forbidden("You can only edit your own reviews"));
        }

        let (rating, comment) = payload.validate()?;

        let updated = self.reviews.update(review_id, |review| {
            review.rating = rating;
            review.comment = comment.clone();
            review.updated_at = OffsetDateTime::now_utc();
        })?;

        Ok(ReviewWithOwner {
            review: updated,
            user: ReviewOwner::from(user),
        })
    }

    /// Remove a review permanently. Only the owner may do this.
    pub fn delete_review(&self, review_id: Uuid, user: &CurrentUser) -> Result<(), AppError> {
        let existing = self
            .reviews
            .get(review_id)
            .ok_or_else(|| AppError::not_found("Review not found"))?;

        if existing.user_id != user.id {
            return Err(AppError::forbidden("You can only delete your own reviews"));
        }

        self.reviews.remove(review_id)?;
        tracing::info!(review_id = %review_id, user_id = %user.id, "review deleted");
        Ok(())
    }
}
