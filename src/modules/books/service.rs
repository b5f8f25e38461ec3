//! Book aggregate service: creation, listing, search, and the detail view
//! with its derived rating aggregate.

use std::sync::Arc;

use time::OffsetDateTime;
use uuid::Uuid;

use folio_authz::User;
use folio_http::AppError;
use folio_store::{contains_ci, Collection, StoreError};

use crate::modules::reviews::models::{average_rating, round_rating, Review, ReviewOwner, ReviewWithOwner};
use crate::utils::pagination::{PageDefaults, PageRequest, PaginationMeta};

use super::models::{
    Book, BookDetailResponse, BookListResponse, CreateBookRequest, ListBooksQuery,
    SearchBooksQuery, SearchBooksResponse,
};

pub struct BookService {
    books: Arc<Collection<Book>>,
    reviews: Arc<Collection<Review>>,
    users: Arc<Collection<User>>,
    pages: PageDefaults,
}

impl BookService {
    pub fn new(
        books: Arc<Collection<Book>>,
        reviews: Arc<Collection<Review>>,
        users: Arc<Collection<User>>,
        pages: PageDefaults,
    ) -> Self {
        Self {
            books,
            reviews,
            users,
            pages,
        }
    }

    /// Create a book after validating the payload. Title uniqueness is
    /// enforced atomically by the collection's unique index.
    pub fn add_book(&self, request: CreateBookRequest) -> Result<Book, AppError> {
        let title = required(request.title)?;
        let author = required(request.author)?;
        let genre = required(request.genre)?;
        let price = request
            .price
            .ok_or_else(|| AppError::validation("All fields are required"))?;

        if price <= 0.0 {
            return Err(AppError::validation("Price must be a positive number"));
        }

        let now = OffsetDateTime::now_utc();
        let book = Book {
            id: Uuid::now_v7(),
            title,
            author,
            genre,
            price,
            created_at: now,
            updated_at: now,
        };

        let stored = self.books.insert(book).map_err(|err| match err {
            StoreError::Duplicate { .. } => {
                AppError::conflict("Book with this title already exists")
            }
            other => other.into(),
        })?;

        tracing::info!(book_id = %stored.id, title = %stored.title, "book added");
        Ok(stored)
    }

    /// List books, newest first, optionally narrowed by case-insensitive
    /// author/genre substring filters.
    pub fn list_books(&self, query: ListBooksQuery) -> BookListResponse {
        let request = PageRequest::resolve(
            query.page.as_deref(),
            query.limit.as_deref(),
            self.pages,
        );

        let author = query.author.unwrap_or_default();
        let genre = query.genre.unwrap_or_default();

        let page = self.books.page(
            |book| {
                (author.is_empty() || contains_ci(&book.author, &author))
                    && (genre.is_empty() || contains_ci(&book.genre, &genre))
            },
            request.skip(),
            request.limit,
        );

        BookListResponse {
            pagination: PaginationMeta::compute(request, page.total),
            books: page.items,
        }
    }

    /// Search titles and authors by case-insensitive substring.
    pub fn search_books(&self, query: SearchBooksQuery) -> Result<SearchBooksResponse, AppError> {
        let q = query.q.unwrap_or_default();
        if q.trim().is_empty() {
            return Err(AppError::validation("Search query is required"));
        }

        let request = PageRequest::resolve(
            query.page.as_deref(),
            query.limit.as_deref(),
            self.pages,
        );

        let page = self.books.page(
            |book| contains_ci(&book.title, &q) || contains_ci(&book.author, &q),
            request.skip(),
            request.limit,
        );

        Ok(SearchBooksResponse {
            search_query: q,
            pagination: PaginationMeta::compute(request, page.total),
            books: page.items,
        })
    }

    /// Fetch a book together with its full review set and the derived
    /// average rating. The aggregate is recomputed on every read.
    pub fn get_book(&self, id: Uuid) -> Result<BookDetailResponse, AppError> {
        let book = self
            .books
            .get(id)
            .ok_or_else(|| AppError::not_found("Book not found"))?;

        let reviews = self.reviews.find(|review| review.book_id == id);
        let average = round_rating(average_rating(&reviews));
        let total_reviews = reviews.len() as u64;

        let reviews = reviews
            .into_iter()
            .map(|review| {
                let user = self
                    .users
                    .get(review.user_id)
                    .map(|user| ReviewOwner {
                        username: user.username,
                        email: user.email,
                    })
                    .unwrap_or_else(ReviewOwner::unknown);
                ReviewWithOwner { review, user }
            })
            .collect();

        Ok(BookDetailResponse {
            book,
            average_rating: average,
            total_reviews,
            reviews,
        })
    }
}

fn required(field: Option<String>) -> Result<String, AppError> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::validation("All fields are required"))
}
