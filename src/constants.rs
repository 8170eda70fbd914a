// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips when draining a database.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Notion API version sent with every request.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Root of the public Notion REST API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Organizer defaults
// ---------------------------------------------------------------------------

/// Bucket used when an item has no value for the grouping field.
pub const FALLBACK_GROUP_KEY: &str = "Other";

/// Display order assumed for categories and items that don't declare one.
pub const DEFAULT_DISPLAY_ORDER: i64 = 999;

/// Field holding the parent reference in nested collections.
pub const DEFAULT_PARENT_FIELD: &str = "parent_id";

// ---------------------------------------------------------------------------
// Host integration
// ---------------------------------------------------------------------------

/// Environment variable carrying the Notion integration token.
pub const TOKEN_ENV_VAR: &str = "NOTION_TOKEN";

/// Database ids starting with this prefix are template placeholders.
pub const PLACEHOLDER_ID_PREFIX: &str = "example_";

/// Directory (relative to the site) that receives the data files.
pub const DEFAULT_DATA_DIR: &str = "_data";

/// Site configuration file looked up when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "_config.yml";

/// Name written into the generated file header.
pub const GENERATOR_LABEL: &str = "notion2data";

/// Extensions of local documents that can stand in for Notion pages.
pub const FALLBACK_DOCUMENT_EXTENSIONS: &[&str] = &["md", "markdown", "html"];
