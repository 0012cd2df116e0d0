//! Envelope types shared by both backends.

use serde::{Deserialize, Serialize};

/// Paginated list envelope.
///
/// Backends name the list field after the resource (`data`, `employees`,
/// `leaves`); all of them decode into `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(alias = "data", alias = "employees", alias = "leaves")]
    pub items: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    /// Omitted by the HR backend; see [`Pagination::total_pages`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
}

impl Pagination {
    /// Page count as reported, or `ceil(total / limit)` when not reported.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        match self.total_pages {
            Some(pages) => pages,
            None if self.limit == 0 => 0,
            None => self.total.div_ceil(self.limit),
        }
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// `page` / `limit` query, serialized in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
}

impl PageQuery {
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

/// `{ "message": "..." }` acknowledgement returned by deletes and actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
