use serde::{Deserialize, Serialize};

/// Envelope every dashboard endpoint answers with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub message: String,
    pub data: T,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub per_page: u64,
    #[serde(default)]
    pub prev: u64,
    #[serde(default)]
    pub next: u64,
    #[serde(default, rename = "totalPage")]
    pub total_page: u64,
}

/// A page of list results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

/// Body of a non-2xx answer. Only `message` is relied upon.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}
