//! Wire DTOs mirroring the server's JSON responses.
//!
//! Identifiers and timestamps stay strings here; the view layer never does
//! arithmetic on them, and keeping the types flat decouples the client from
//! server internals.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub price: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_books: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

/// `GET /api/books` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookListDto {
    pub books: Vec<BookDto>,
    pub pagination: PaginationDto,
}

/// `GET /api/search` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultsDto {
    pub search_query: String,
    pub books: Vec<BookDto>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOwnerDto {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: String,
    pub book_id: String,
    pub user_id: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: String,
    pub updated_at: String,
    pub user: ReviewOwnerDto,
}

/// `GET /api/books/{id}` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetailDto {
    pub book: BookDto,
    pub average_rating: f64,
    pub total_reviews: u64,
    pub reviews: Vec<ReviewDto>,
}

/// Authenticated user projection from the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUserDto {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_detail_deserializes_from_wire_json() {
        let raw = serde_json::json!({
            "book": {
                "id": "0191f4f0-0000-7000-8000-000000000001",
                "title": "Dune",
                "author": "Herbert",
                "genre": "SciFi",
                "price": 12.5,
                "createdAt": "2026-01-01T00:00:00Z",
                "updatedAt": "2026-01-01T00:00:00Z"
            },
            "averageRating": 4.5,
            "totalReviews": 1,
            "reviews": [{
                "id": "0191f4f0-0000-7000-8000-000000000002",
                "bookId": "0191f4f0-0000-7000-8000-000000000001",
                "userId": "0191f4f0-0000-7000-8000-000000000003",
                "rating": 5,
                "comment": "a classic",
                "createdAt": "2026-01-02T00:00:00Z",
                "updatedAt": "2026-01-02T00:00:00Z",
                "user": {"username": "paul", "email": "paul@example.com"}
            }]
        });

        let detail: BookDetailDto = serde_json::from_value(raw).unwrap();
        assert_eq!(detail.book.title, "Dune");
        assert_eq!(detail.average_rating, 4.5);
        assert_eq!(detail.reviews[0].user.username, "paul");
    }
}
