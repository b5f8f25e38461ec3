//! The view-layer state container.
//!
//! One value owns everything the UI renders; every mutation is a pure
//! function from the previous state and a server response to the next
//! state. The view applies a transition after each fetch or mutation and
//! re-renders from the result. Derived data (average rating, pagination)
//! is never computed here; it arrives from the server.

use crate::dto::{AuthUserDto, BookDetailDto, BookDto, BookListDto, PaginationDto, SearchResultsDto};

/// Transient user-facing notice, cleared after display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// Everything the UI needs to render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub auth_user: Option<AuthUserDto>,
    pub books: Vec<BookDto>,
    pub pagination: Option<PaginationDto>,
    pub search_query: Option<String>,
    pub detail: Option<BookDetailDto>,
    pub notification: Option<Notification>,
}

impl StoreState {
    /// A book list page arrived (plain listing; any search context ends).
    pub fn books_fetched(self, page: BookListDto) -> Self {
        Self {
            books: page.books,
            pagination: Some(page.pagination),
            search_query: None,
            ..self
        }
    }

    /// Search results arrived.
    pub fn search_results(self, results: SearchResultsDto) -> Self {
        Self {
            books: results.books,
            pagination: Some(results.pagination),
            search_query: Some(results.search_query),
            ..self
        }
    }

    /// A book detail arrived; the modal opens from this.
    pub fn detail_fetched(self, detail: BookDetailDto) -> Self {
        Self {
            detail: Some(detail),
            ..self
        }
    }

    /// The detail modal closed.
    pub fn detail_closed(self) -> Self {
        Self {
            detail: None,
            ..self
        }
    }

    /// A book was created server-side. The list page is now stale; the view
    /// re-fetches and applies [`StoreState::books_fetched`].
    pub fn book_added(self, message: impl Into<String>) -> Self {
        Self {
            notification: Some(Notification::Success(message.into())),
            ..self
        }
    }

    /// A review was created or updated. Drops the cached detail so the view
    /// re-fetches it and the derived aggregate stays consistent with the
    /// server.
    pub fn review_saved(self, message: impl Into<String>) -> Self {
        Self {
            detail: None,
            notification: Some(Notification::Success(message.into())),
            ..self
        }
    }

    /// A review was deleted; same staleness rule as [`StoreState::review_saved`].
    pub fn review_deleted(self, message: impl Into<String>) -> Self {
        Self {
            detail: None,
            notification: Some(Notification::Success(message.into())),
            ..self
        }
    }

    /// A signup or login succeeded.
    pub fn signed_in(self, user: AuthUserDto) -> Self {
        Self {
            auth_user: Some(user),
            ..self
        }
    }

    /// The session ended (logout or a 401 from any call). All user-scoped
    /// state is dropped.
    pub fn signed_out(self) -> Self {
        Self {
            auth_user: None,
            detail: None,
            ..self
        }
    }

    /// Any request failed; the failure surfaces as a transient notification
    /// and does not otherwise disturb what is on screen.
    pub fn request_failed(self, message: impl Into<String>) -> Self {
        Self {
            notification: Some(Notification::Error(message.into())),
            ..self
        }
    }

    /// The notification was displayed.
    pub fn notification_cleared(self) -> Self {
        Self {
            notification: None,
            ..self
        }
    }
}
