//! Page-based pagination helpers.
//!
//! List endpoints accept `page`/`limit` and return the page plus a `count`
//! of ALL matching rows (not the page size); clients derive
//! `totalPages = ceil(count / limit)`.

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum page size for list endpoints.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1).min(MAX_PAGE_LIMIT)
}

/// Clamp a user-provided 1-based page number.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// SQL offset for a 1-based page.
pub fn offset_for(page: i64, limit: i64) -> i64 {
    (page - 1).max(0) * limit
}

/// `ceil(count / limit)`; zero rows means zero pages.
pub fn total_pages(count: i64, limit: i64) -> i64 {
    if count <= 0 {
        return 0;
    }
    (count + limit - 1) / limit
}
