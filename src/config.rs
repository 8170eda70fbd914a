// src/config.rs
use crate::api::DatabaseQuery;
use crate::constants::{DEFAULT_CONFIG_FILE, DEFAULT_DATA_DIR, TOKEN_ENV_VAR};
use crate::error::AppError;
use crate::organize::OrganizerConfig;
use crate::output::{data_key, default_data_file, is_data_file};
use clap::Parser;
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Root directory of the site
    #[arg(short, long, default_value = ".")]
    pub site_dir: PathBuf,

    /// Site configuration file (defaults to _config.yml in the site directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for generated data files, relative to the site (overrides the configuration)
    #[arg(short, long)]
    pub data_dir: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

/// The site configuration file. Only the `notion` section is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub notion: NotionSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotionSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub collections: IndexMap<String, CollectionConfig>,
}

impl Default for NotionSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            data_dir: default_data_dir(),
            collections: IndexMap::new(),
        }
    }
}

/// One collection: where its database id comes from, where its data goes,
/// and how it is organized.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionConfig {
    /// Environment variable holding the database id.
    #[serde(default)]
    pub database_env: Option<String>,
    #[serde(default)]
    pub data_file: Option<String>,
    #[serde(flatten)]
    pub organizer: OrganizerConfig,
    #[serde(flatten)]
    pub query: DatabaseQuery,
}

impl CollectionConfig {
    pub fn new(organizer: OrganizerConfig) -> Self {
        Self {
            organizer,
            ..Self::default()
        }
    }

    pub fn with_database_env(mut self, name: impl Into<String>) -> Self {
        self.database_env = Some(name.into());
        self
    }

    pub fn with_data_file(mut self, file: impl Into<String>) -> Self {
        self.data_file = Some(file.into());
        self
    }

    /// Data file name, `<collection>.yml` unless configured.
    pub fn data_file_for(&self, collection: &str) -> String {
        self.data_file
            .clone()
            .unwrap_or_else(|| default_data_file(collection))
    }

    /// Key the collection's data is published under.
    pub fn data_key_for(&self, collection: &str) -> String {
        data_key(&self.data_file_for(collection))
    }
}

impl SiteConfig {
    /// Reads and checks a site configuration file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::MissingConfiguration(format!(
                "Cannot read site configuration {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, AppError> {
        // An empty file is a site without a notion section.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(text).map_err(|e| {
            AppError::InvalidConfiguration(format!("Invalid site configuration: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        for (name, collection) in &self.notion.collections {
            let data_file = collection.data_file_for(name);
            if !is_data_file(&data_file) {
                return Err(AppError::InvalidConfiguration(format!(
                    "Data file '{}' of collection '{}' must end in .yml or .yaml",
                    data_file, name
                )));
            }
        }
        Ok(())
    }
}

/// A snapshot of the environment variables the run reads.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Captures the current process environment.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// The Notion token, when set to something other than whitespace.
    pub fn token(&self) -> Option<&str> {
        self.get(TOKEN_ENV_VAR).filter(|token| !token.trim().is_empty())
    }
}

/// Resolved run configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub site_dir: PathBuf,
    pub config_path: PathBuf,
    pub site: SiteConfig,
}

impl RunConfig {
    /// Resolves the configuration file and applies command-line overrides.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let config_path = cli
            .config
            .unwrap_or_else(|| cli.site_dir.join(DEFAULT_CONFIG_FILE));
        let mut site = SiteConfig::load(&config_path)?;
        if let Some(data_dir) = cli.data_dir {
            site.notion.data_dir = data_dir;
        }

        Ok(RunConfig {
            site_dir: cli.site_dir,
            config_path,
            site,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{PropertyKind, PropertySpec};
    use crate::organize::{OrganizerKind, SortOrder};
    use pretty_assertions::assert_eq;

    const CONFIG: &str = r#"
title: My site
notion:
  data_dir: generated
  collections:
    posts:
      database_env: POSTS_DB
      organizer: simple_list
      sort_by: date
      sort_order: desc
      filter: { property: Published, checkbox: { equals: true } }
      properties:
        - { name: Title, type: title }
        - { name: Tags, type: multi_select, key: labels }
    skills:
      database_env: SKILLS_DB
      data_file: competences.yaml
      organizer: items_by_category
"#;

    #[test]
    fn test_parses_collections() {
        let config = SiteConfig::parse(CONFIG).unwrap();
        assert!(config.notion.enabled);
        assert_eq!(config.notion.data_dir, "generated");

        let names: Vec<_> = config.notion.collections.keys().cloned().collect();
        assert_eq!(names, vec!["posts", "skills"]);

        let posts = &config.notion.collections["posts"];
        assert_eq!(posts.database_env.as_deref(), Some("POSTS_DB"));
        assert_eq!(posts.data_file_for("posts"), "posts.yml");
        assert_eq!(posts.organizer.sort_order, SortOrder::Desc);
        assert_eq!(
            posts.organizer.properties,
            vec![
                PropertySpec::new("Title", PropertyKind::Title),
                PropertySpec::new("Tags", PropertyKind::MultiSelect).with_key("labels"),
            ]
        );
        assert!(posts.query.filter.is_some());
        assert!(posts.query.sorts.is_none());

        let skills = &config.notion.collections["skills"];
        assert_eq!(skills.organizer.organizer, OrganizerKind::ItemsByCategory);
        assert_eq!(skills.data_key_for("skills"), "competences");
    }

    #[test]
    fn test_missing_notion_section_uses_defaults() {
        let config = SiteConfig::parse("title: Blog\n").unwrap();
        assert!(config.notion.enabled);
        assert_eq!(config.notion.data_dir, "_data");
        assert!(config.notion.collections.is_empty());
        assert!(SiteConfig::parse("").unwrap().notion.enabled);
    }

    #[test]
    fn test_unknown_property_type_is_rejected() {
        let text = "notion:\n  collections:\n    posts:\n      properties:\n        - { name: X, type: colour }\n";
        assert!(matches!(
            SiteConfig::parse(text),
            Err(AppError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_data_file_extension_is_checked() {
        let text = "notion:\n  collections:\n    posts:\n      data_file: posts.json\n";
        assert!(matches!(
            SiteConfig::parse(text),
            Err(AppError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_environment_token() {
        let env = Environment::from_pairs([("NOTION_TOKEN", "  ")]);
        assert_eq!(env.token(), None);
        let env = Environment::from_pairs([("NOTION_TOKEN", "secret_1"), ("POSTS_DB", "abc")]);
        assert_eq!(env.token(), Some("secret_1"));
        assert_eq!(env.get("POSTS_DB"), Some("abc"));
        assert_eq!(env.get("OTHER"), None);
    }

    #[test]
    fn test_resolve_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("_config.yml"), CONFIG).unwrap();
        let cli = CommandLineInput {
            site_dir: dir.path().to_path_buf(),
            config: None,
            data_dir: Some("_data".to_string()),
            verbose: false,
        };
        let run = RunConfig::resolve(cli).unwrap();
        assert_eq!(run.site.notion.data_dir, "_data");
        assert_eq!(run.config_path, dir.path().join("_config.yml"));
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SiteConfig::load(&dir.path().join("_config.yml")).unwrap_err();
        assert!(err.is_configuration());
    }
}
