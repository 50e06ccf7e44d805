use serde::Serialize;

/// Pagination envelope attached to paginated list responses.
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub pages: i64,
}

impl Pagination {
    /// `limit` must be >= 1; handlers clamp before calling.
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        Self {
            total,
            page,
            limit,
            pages: (total + limit - 1) / limit,
        }
    }
}
