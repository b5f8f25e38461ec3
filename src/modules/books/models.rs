use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use folio_store::Document;

use crate::modules::reviews::models::ReviewWithOwner;
use crate::utils::pagination::PaginationMeta;

/// A catalog entry. Titles are unique (case-sensitive exact match), enforced
/// by the collection's unique index.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier for the book
    pub id: Uuid,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Genre of the book
    pub genre: String,
    /// List price; always positive
    pub price: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Document for Book {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}

/// Request model for creating a new book. Fields are optional at the wire
/// level so validation can report missing ones uniformly.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub price: Option<f64>,
}

/// Raw listing query; page and limit stay strings so non-numeric values can
/// fall back to defaults instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBooksQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
}

/// Raw search query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchBooksQuery {
    pub q: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookCreatedResponse {
    pub message: &'static str,
    pub book: Book,
}

#[derive(Debug, Serialize)]
pub struct BookListResponse {
    pub books: Vec<Book>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBooksResponse {
    pub search_query: String,
    pub books: Vec<Book>,
    pub pagination: PaginationMeta,
}

/// Book detail with the derived aggregate: the full review set, the review
/// count, and the average rating rounded to one decimal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetailResponse {
    pub book: Book,
    pub average_rating: f64,
    pub total_reviews: u64,
    pub reviews: Vec<ReviewWithOwner>,
}
