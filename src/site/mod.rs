//! Site generation: one data file per configured collection.
//!
//! Every collection ends up with data. Notion is the preferred source; a
//! missing token, a placeholder database id, an API error or an empty
//! result switches that collection to its local documents instead. None
//! of these end the run.

mod fallback;

pub use fallback::{
    collection_dir, convert_doc_to_properties, convert_value_to_property, document_to_page,
    load_local_pages, parse_front_matter, FrontMatter,
};

use crate::api::{NotionHttpClient, NotionRepository};
use crate::config::{CollectionConfig, Environment, NotionSettings};
use crate::constants::{PLACEHOLDER_ID_PREFIX, TOKEN_ENV_VAR};
use crate::error::AppError;
use crate::model::Page;
use crate::organize::{organize, Organized};
use crate::output::{data_file_path, render_data_file, write_data_file, WriteOutcome};
use crate::types::ApiKey;
use chrono::Utc;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Where a collection's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Notion,
    Fallback,
}

/// The data produced for one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionData {
    pub collection: String,
    pub source: DataSource,
    pub data: Organized,
    /// `None` when the data file could not be written.
    pub outcome: Option<WriteOutcome>,
}

/// Generated data, keyed by data file stem, in configuration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteData {
    entries: IndexMap<String, CollectionData>,
}

impl SiteData {
    pub fn get(&self, key: &str) -> Option<&CollectionData> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CollectionData)> {
        self.entries.iter()
    }

    fn insert(&mut self, key: String, data: CollectionData) {
        self.entries.insert(key, data);
    }
}

/// Drives data generation for a site.
pub struct SiteGenerator {
    site_dir: PathBuf,
    settings: NotionSettings,
    api_base_url: Option<String>,
}

impl SiteGenerator {
    pub fn new(site_dir: impl Into<PathBuf>, settings: NotionSettings) -> Self {
        Self {
            site_dir: site_dir.into(),
            settings,
            api_base_url: None,
        }
    }

    /// Sends API requests to another root than the public Notion API.
    pub fn with_api_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = Some(base_url.into());
        self
    }

    pub fn site_dir(&self) -> &Path {
        &self.site_dir
    }

    /// Generates data for every collection, from Notion where possible.
    pub async fn generate(&self, env: &Environment) -> SiteData {
        if !self.settings.enabled {
            log::info!("Plugin disabled in configuration");
            return SiteData::default();
        }

        let Some(token) = env.token() else {
            log::info!("No {} found, using collections fallback", TOKEN_ENV_VAR);
            return self.fallback_all();
        };

        match self.connect(token) {
            Ok(client) => self.generate_with(&client, env).await,
            Err(e) => {
                log::error!("Error fetching data: {}", e);
                log::warn!("Falling back to collections");
                self.fallback_all()
            }
        }
    }

    /// Generates data for every collection, reading Notion through `source`.
    pub async fn generate_with<R>(&self, source: &R, env: &Environment) -> SiteData
    where
        R: NotionRepository + ?Sized,
    {
        let mut site_data = SiteData::default();
        for (name, collection) in &self.settings.collections {
            let data = self.fetch_collection(source, env, name, collection).await;
            if let Some(data) = data {
                site_data.insert(collection.data_key_for(name), data);
            }
        }
        log::info!("All data fetched successfully");
        site_data
    }

    fn connect(&self, token: &str) -> Result<NotionHttpClient, AppError> {
        let client = NotionHttpClient::new(&ApiKey::new(token)?)?;
        match &self.api_base_url {
            Some(base_url) => client.with_base_url(base_url),
            None => Ok(client),
        }
    }

    async fn fetch_collection<R>(
        &self,
        source: &R,
        env: &Environment,
        name: &str,
        collection: &CollectionConfig,
    ) -> Option<CollectionData>
    where
        R: NotionRepository + ?Sized,
    {
        let env_name = collection.database_env.as_deref().unwrap_or_default();
        let database_id = env
            .get(env_name)
            .map(str::trim)
            .filter(|id| !id.is_empty() && !id.starts_with(PLACEHOLDER_ID_PREFIX));
        let Some(database_id) = database_id else {
            log::info!("No {} found, using fallback for {}", env_name, name);
            return self.fallback(name, collection);
        };

        let results = match source.query_database(database_id, &collection.query).await {
            Ok(results) => results,
            Err(e) => {
                log::error!("Error fetching {}: {}", name, e);
                return self.fallback(name, collection);
            }
        };
        if results.is_empty() {
            log::warn!("No data found for {}, using fallback", name);
            return self.fallback(name, collection);
        }

        let data = match organize(&results.results, &collection.organizer) {
            Ok(data) => data,
            Err(e) => {
                log::error!("Error fetching {}: {}", name, e);
                return self.fallback(name, collection);
            }
        };
        let outcome = self.persist(name, collection, &data);
        log::info!("{} fetched ({} items)", name, data.item_count());

        Some(CollectionData {
            collection: name.to_string(),
            source: DataSource::Notion,
            data,
            outcome,
        })
    }

    fn fallback_all(&self) -> SiteData {
        let mut site_data = SiteData::default();
        for (name, collection) in &self.settings.collections {
            if let Some(data) = self.fallback(name, collection) {
                site_data.insert(collection.data_key_for(name), data);
            }
        }
        site_data
    }

    /// Organizes and persists the collection's local documents.
    fn fallback(&self, name: &str, collection: &CollectionConfig) -> Option<CollectionData> {
        let pages: Vec<Page> =
            match load_local_pages(&self.site_dir, name, &collection.organizer.properties) {
                Ok(pages) => pages,
                Err(e) => {
                    log::error!("Error reading local {} documents: {}", name, e);
                    Vec::new()
                }
            };

        let data = match organize(&pages, &collection.organizer) {
            Ok(data) => data,
            Err(e) => {
                log::error!("Fallback for {} failed: {}", name, e);
                return None;
            }
        };
        let outcome = self.persist(name, collection, &data);
        log::info!("{} fallback applied ({} items)", name, data.item_count());

        Some(CollectionData {
            collection: name.to_string(),
            source: DataSource::Fallback,
            data,
            outcome,
        })
    }

    fn persist(
        &self,
        name: &str,
        collection: &CollectionConfig,
        data: &Organized,
    ) -> Option<WriteOutcome> {
        let data_file = collection.data_file_for(name);
        let path = data_file_path(&self.site_dir, &self.settings.data_dir, &data_file);

        let result = render_data_file(path, name, data, Utc::now())
            .and_then(|file| write_data_file(&file));
        match result {
            Ok(outcome @ WriteOutcome::Unchanged { .. }) => {
                log::info!("{} data unchanged, skipping", name);
                Some(outcome)
            }
            Ok(outcome) => {
                log::info!(
                    "{} written to {}/{}",
                    name,
                    self.settings.data_dir,
                    data_file
                );
                Some(outcome)
            }
            Err(e) => {
                log::error!("Could not write {}: {}", data_file, e);
                None
            }
        }
    }
}
