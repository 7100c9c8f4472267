//! Shared response envelope types for API handlers.
//!
//! Single resources use a bare JSON body; list endpoints return
//! [`ListResponse`] -- the page of rows plus `count`, the TOTAL number of
//! matching rows, from which clients derive `totalPages = ceil(count /
//! limit)`.

use serde::Serialize;

/// Standard `{ "data": [...], "count": N }` list envelope.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    /// Total matching rows, NOT the page size.
    pub count: i64,
}
