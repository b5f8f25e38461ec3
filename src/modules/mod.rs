pub mod auth;
pub mod books;
pub mod reviews;

use std::sync::Arc;

use folio_authz::AuthContext;
use folio_kernel::{settings::Settings, ModuleRegistry};
use folio_store::Collection;

use crate::utils::pagination::PageDefaults;

use books::models::Book;
use reviews::models::Review;

/// Shared application state: the document collections and the access guard
/// context, built once at bootstrap and handed to each module's service.
#[derive(Clone)]
pub struct AppContext {
    pub auth: AuthContext,
    pub books: Arc<Collection<Book>>,
    pub reviews: Arc<Collection<Review>>,
    pub pages: PageDefaults,
}

impl AppContext {
    pub fn new(settings: &Settings) -> Self {
        let books = Collection::new("books")
            .with_unique_index("title", |book: &Book| book.title.clone());

        // One review per (book, user) pair.
        let reviews = Collection::new("reviews")
            .with_unique_index("book_user", |review: &Review| {
                format!("{}:{}", review.book_id, review.user_id)
            });

        Self {
            auth: AuthContext::new(&settings.auth),
            books: Arc::new(books),
            reviews: Arc::new(reviews),
            pages: PageDefaults {
                limit: settings.store.default_page_size,
                max_limit: settings.store.max_page_size,
            },
        }
    }
}

/// Register all application modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, ctx: &AppContext) {
    let book_service = Arc::new(books::service::BookService::new(
        ctx.books.clone(),
        ctx.reviews.clone(),
        ctx.auth.users.clone(),
        ctx.pages,
    ));
    let review_service = Arc::new(reviews::service::ReviewService::new(
        ctx.books.clone(),
        ctx.reviews.clone(),
    ));

    registry.register(books::create_module(book_service));
    registry.register(reviews::create_module(review_service));
    registry.register(auth::create_module(ctx.auth.clone()));
}
