// src/api/types.rs
//! Request and response shapes exchanged with the Notion API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a paginated list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Every item gathered while draining a paginated endpoint.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
}

/// Error document Notion returns alongside a non-success status.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Optional filter and sort clauses passed through to a database query.
///
/// Both are forwarded to Notion untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorts: Option<Value>,
}

impl DatabaseQuery {
    /// Request body for one page of the query.
    pub(crate) fn page_body(&self, page_size: usize, start_cursor: Option<&str>) -> Value {
        let mut body = serde_json::json!({ "page_size": page_size });
        if let Some(filter) = &self.filter {
            body["filter"] = filter.clone();
        }
        if let Some(sorts) = &self.sorts {
            body["sorts"] = sorts.clone();
        }
        if let Some(cursor) = start_cursor {
            body["start_cursor"] = Value::from(cursor);
        }
        body
    }
}
