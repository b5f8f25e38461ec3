use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use folio_authz::CurrentUser;
use folio_http::AppError;
use folio_store::Document;

/// A user's review of a book. At most one review exists per (book, user)
/// pair, enforced by the collection's unique index.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Unique identifier for the review
    pub id: Uuid,
    /// Book this review belongs to
    pub book_id: Uuid,
    /// Identity that wrote the review; the only identity allowed to change it
    pub user_id: Uuid,
    /// Star rating, 1 through 5
    pub rating: u8,
    /// Free-text comment, never blank
    pub comment: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Document for Review {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}

/// Display projection of a review's owner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOwner {
    pub username: String,
    pub email: String,
}

impl ReviewOwner {
    pub fn unknown() -> Self {
        Self {
            username: "unknown".to_string(),
            email: String::new(),
        }
    }
}

impl From<&CurrentUser> for ReviewOwner {
    fn from(user: &CurrentUser) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// A review with its owner projection attached, as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewWithOwner {
    #[serde(flatten)]
    pub review: Review,
    pub user: ReviewOwner,
}

/// Request body for creating or updating a review.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewPayload {
    pub rating: Option<i64>,
    pub comment: Option<String>,
}

impl ReviewPayload {
    /// Validate the payload into a (rating, comment) pair.
    pub fn validate(self) -> Result<(u8, String), AppError> {
        let (Some(rating), Some(comment)) = (self.rating, self.comment) else {
            return Err(AppError::validation("Rating and comment are required"));
        };

        if !(1..=5).contains(&rating) {
            return Err(AppError::validation("Rating must be between 1 and 5"));
        }

        let comment = comment.trim().to_string();
        if comment.is_empty() {
            return Err(AppError::validation("Comment cannot be empty"));
        }

        Ok((rating as u8, comment))
    }
}

/// Arithmetic mean of the given reviews' ratings, 0.0 when there are none.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }

    let sum: u64 = reviews.iter().map(|review| u64::from(review.rating)).sum();
    sum as f64 / reviews.len() as f64
}

/// Round to one decimal for the presentation boundary; the stored ratings
/// stay exact.
pub fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8) -> Review {
        let now = OffsetDateTime::now_utc();
        Review {
            id: Uuid::now_v7(),
            book_id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            rating,
            comment: "fine".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn missing_fields_fail_validation() {
        let payload = ReviewPayload {
            rating: Some(4),
            comment: None,
        };
        assert!(matches!(
            payload.validate(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        for rating in [0, 6, -1] {
            let payload = ReviewPayload {
                rating: Some(rating),
                comment: Some("great".to_string()),
            };
            let err = payload.validate().unwrap_err();
            assert_eq!(err.to_string(), "validation error: Rating must be between 1 and 5");
        }
    }

    #[test]
    fn blank_comment_is_rejected() {
        let payload = ReviewPayload {
            rating: Some(3),
            comment: Some("   ".to_string()),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn valid_payload_is_normalized() {
        let payload = ReviewPayload {
            rating: Some(5),
            comment: Some("  superb  ".to_string()),
        };
        assert_eq!(payload.validate().unwrap(), (5, "superb".to_string()));
    }

    #[test]
    fn average_of_no_reviews_is_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn average_is_arithmetic_mean() {
        let reviews = vec![review(2), review(3), review(5)];
        let avg = average_rating(&reviews);
        assert!((avg - 10.0 / 3.0).abs() < 1e-9);
        assert_eq!(round_rating(avg), 3.3);
    }
}
