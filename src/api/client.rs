// src/api/client.rs
//! Thin HTTP wrapper for the Notion API.
//!
//! Handles authentication headers and the request/response round trip.
//! Decoding and error categorization live in the parser.

use super::pagination::fetch_all_pages;
use super::parser;
use super::types::DatabaseQuery;
use crate::constants::{NOTION_API_BASE_URL, NOTION_API_VERSION};
use crate::error::AppError;
use crate::model::{Page, QueryResults};
use crate::types::{ApiKey, ValidatedUrl};
use reqwest::{header, Client, Response};
use serde::Serialize;
use serde_json::Value;

/// A reqwest client preconfigured for one Notion integration token.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a client against the public Notion API.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self {
            client,
            base_url: NOTION_API_BASE_URL.to_string(),
        })
    }

    /// Points the client at another API root, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, AppError> {
        self.base_url = ValidatedUrl::parse(base_url)?.as_str().to_string();
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );
        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Makes a GET request to `endpoint` (a path below the API root).
    pub async fn get(&self, endpoint: &str) -> Result<Response, AppError> {
        let url = self.url(endpoint);
        log::debug!("GET {}", url);
        Ok(self.client.get(url).send().await?)
    }

    /// Makes a GET request with query parameters.
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        query: &Q,
    ) -> Result<Response, AppError> {
        let url = self.url(endpoint);
        log::debug!("GET {}", url);
        Ok(self.client.get(url).query(query).send().await?)
    }

    /// Makes a POST request with a JSON body.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = self.url(endpoint);
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send().await?)
    }
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<QueryResults, AppError> {
        let endpoint = format!("databases/{}/query", database_id);
        log::info!("Querying database {}", database_id);

        let result = fetch_all_pages(|page_size, cursor| {
            let endpoint = endpoint.clone();
            let body = query.page_body(page_size, cursor.as_deref());
            async move {
                let response = self.post(&endpoint, &body).await?;
                let result = extract_response_text(response).await?;
                parser::parse_pages_pagination(result)
            }
        })
        .await?;

        log::debug!(
            "Database {} returned {} pages over {} requests",
            database_id,
            result.items.len(),
            result.pages_fetched
        );
        Ok(QueryResults::new(result.items))
    }

    async fn retrieve_page(&self, page_id: &str) -> Result<Page, AppError> {
        let response = self.get(&format!("pages/{}", page_id)).await?;
        let result = extract_response_text(response).await?;
        parser::parse_page_response(result)
    }

    async fn retrieve_block_children(&self, block_id: &str) -> Result<Vec<Value>, AppError> {
        let endpoint = format!("blocks/{}/children", block_id);
        let result = fetch_all_pages(|page_size, cursor| {
            let endpoint = endpoint.clone();
            async move {
                let mut params = vec![("page_size", page_size.to_string())];
                if let Some(cursor) = cursor {
                    params.push(("start_cursor", cursor));
                }
                let response = self.get_with_query(&endpoint, &params).await?;
                let result = extract_response_text(response).await?;
                parser::parse_blocks_pagination(result)
            }
        })
        .await?;
        Ok(result.items)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Reads the response body as text, keeping status and URL for error reporting.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
