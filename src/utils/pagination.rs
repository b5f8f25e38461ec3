//! Page/limit resolution and pagination metadata.
//!
//! Query parameters arrive as raw strings; anything absent or non-numeric
//! falls back to the defaults, and the limit is clamped server-side so a
//! client cannot request an unbounded page.

use serde::Serialize;

/// Configured paging bounds, taken from `store` settings at startup.
#[derive(Debug, Clone, Copy)]
pub struct PageDefaults {
    pub limit: u64,
    pub max_limit: u64,
}

/// A resolved, in-bounds page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Resolve raw query values. Missing, non-numeric, or zero values fall
    /// back to page 1 / the default limit; the limit is capped at
    /// `defaults.max_limit`.
    pub fn resolve(page: Option<&str>, limit: Option<&str>, defaults: PageDefaults) -> Self {
        let page = page
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|parsed| *parsed >= 1)
            .unwrap_or(1);

        let limit = limit
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|parsed| *parsed >= 1)
            .unwrap_or(defaults.limit)
            .min(defaults.max_limit);

        Self { page, limit }
    }

    /// Number of documents to skip before this page starts. Saturates for
    /// absurd page numbers; such a page is past the data either way.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// The pagination envelope returned with every book listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_books: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn compute(request: PageRequest, total: u64) -> Self {
        let total_pages = total.div_ceil(request.limit);

        Self {
            current_page: request.page,
            total_pages,
            total_books: total,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        }
    }
}
