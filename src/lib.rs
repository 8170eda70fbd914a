// src/lib.rs
//! notion2data library: turns Notion databases into data files for static sites.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `NotionErrorCode`, `ValidationError`
//! - **Configuration**: `SiteConfig`, `CollectionConfig`, `Environment`, `RunConfig`
//! - **Domain model**: `Page`, `PropertyValue`, `FieldValue`, `Item`
//! - **Extraction**: `extract`, `project`, `PropertySpec`, `PropertyKind`
//! - **Organizers**: `organize`, `OrganizerConfig`, `Organized`, `sort_items`
//! - **API client**: `NotionHttpClient`, `NotionRepository`
//! - **Site generation**: `SiteGenerator`, `SiteData`

mod api;
mod config;
mod constants;
mod error;
mod extract;
mod model;
mod organize;
mod output;
mod site;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{
    CollectionConfig, CommandLineInput, Environment, NotionSettings, RunConfig, SiteConfig,
};

// --- Domain Model ---
pub use crate::model::{
    DateRange, FieldValue, FormulaArrayItem, FormulaValue, GroupKey, Item, Page, Properties,
    PropertyValue, QueryResults, RollupValue,
};

// --- Domain Types ---
pub use crate::types::{
    ApiKey, DateValue, FileLocation, FileObject, PageReference, Person, PersonDetail, RichText,
    SelectOption, ValidatedUrl,
};

// --- Extraction ---
pub use crate::extract::{
    extract, extract_value, level_for, normalize_key, project, split_formula_list, PropertyKind,
    PropertySpec,
};

// --- Organizers ---
pub use crate::organize::{
    build_forest, organize, organize_by_category, sort_items, sort_tree, Category, CategoryItem,
    Organized, OrganizerConfig, OrganizerKind, SortOrder,
};

// --- API Client ---
pub use crate::api::{
    extract_response_text, fetch_all_pages, parse_api_response, ApiResponse, DatabaseQuery,
    NotionHttpClient, NotionRepository, PaginatedResponse, PaginationResult,
};

// --- Output ---
pub use crate::output::{
    capitalize, data_file_path, data_key, default_data_file, is_data_file, render_data_file,
    strip_header, write_data_file, DataFile, WriteOutcome,
};

// --- Site Generation ---
pub use crate::site::{
    collection_dir, convert_doc_to_properties, convert_value_to_property, document_to_page,
    load_local_pages, parse_front_matter, CollectionData, DataSource, FrontMatter, SiteData,
    SiteGenerator,
};
