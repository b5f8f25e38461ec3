//! Document-store facade for FOLIO.
//!
//! Collections keep whole documents in memory behind an `RwLock` and enforce
//! unique indexes inside the write-locked section, so a conditional insert is
//! atomic rather than a check-then-act sequence in application code.

pub mod memory;
pub mod session;

pub use memory::{Collection, Document, Page};
pub use session::SessionStore;

use thiserror::Error;
use uuid::Uuid;

/// Failures surfaced by collection operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate value for unique index '{index}' in collection '{collection}'")]
    Duplicate {
        collection: &'static str,
        index: &'static str,
    },

    #[error("document {id} not found in collection '{collection}'")]
    NotFound {
        collection: &'static str,
        id: Uuid,
    },
}

/// Case-insensitive substring match, the store's only text filter primitive.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
