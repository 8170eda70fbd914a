// src/api/mod.rs
//! Notion API interaction: reading database rows and pages from a workspace.

mod client;
mod pagination;
mod parser;
mod types;

pub use client::{extract_response_text, ApiResponse, NotionHttpClient};
pub use pagination::fetch_all_pages;
pub use parser::parse_api_response;
pub use types::{DatabaseQuery, PaginatedResponse, PaginationResult};

use crate::error::AppError;
use crate::model::{Page, QueryResults};
use serde_json::Value;

/// The ability to read content from a Notion workspace.
///
/// Site generation depends on this trait, never on HTTP details.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// Every row of a database, pagination drained.
    async fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<QueryResults, AppError>;

    async fn retrieve_page(&self, page_id: &str) -> Result<Page, AppError>;

    /// Every child block of a page or block, as raw JSON.
    async fn retrieve_block_children(&self, block_id: &str) -> Result<Vec<Value>, AppError>;
}
