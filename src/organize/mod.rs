//! Reshaping a page collection into the structure a site template consumes.

mod category;
mod sort;
mod tree;

pub use category::{organize_by_category, Category, CategoryItem};
pub use sort::{sort_items, sort_tree};
pub use tree::build_forest;

use crate::constants::{DEFAULT_PARENT_FIELD, FALLBACK_GROUP_KEY};
use crate::error::{AppError, Result};
use crate::extract::{project, PropertySpec};
use crate::model::{GroupKey, Item, Page};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Which organizer a collection is run through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizerKind {
    #[default]
    SimpleList,
    ItemsByCategory,
    GroupedBy,
    Nested,
    /// Any name not listed above; organized as a simple list.
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Desc,
    /// Also used for any unrecognized order.
    #[default]
    #[serde(other)]
    Asc,
}

fn default_parent_field() -> String {
    DEFAULT_PARENT_FIELD.to_string()
}

/// How one collection is shaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizerConfig {
    #[serde(default)]
    pub organizer: OrganizerKind,
    #[serde(default)]
    pub properties: Vec<PropertySpec>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default)]
    pub group_by: Option<String>,
    #[serde(default = "default_parent_field")]
    pub parent_field: String,
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            organizer: OrganizerKind::default(),
            properties: Vec::new(),
            sort_by: None,
            sort_order: SortOrder::default(),
            group_by: None,
            parent_field: default_parent_field(),
        }
    }
}

impl OrganizerConfig {
    pub fn new(organizer: OrganizerKind) -> Self {
        Self {
            organizer,
            ..Self::default()
        }
    }

    pub fn with_properties(mut self, properties: Vec<PropertySpec>) -> Self {
        self.properties = properties;
        self
    }

    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = order;
        self
    }

    pub fn grouped_by(mut self, field: impl Into<String>) -> Self {
        self.group_by = Some(field.into());
        self
    }

    pub fn with_parent_field(mut self, field: impl Into<String>) -> Self {
        self.parent_field = field.into();
        self
    }

    fn sort_field(&self) -> Option<&str> {
        self.sort_by.as_deref()
    }
}

/// Result of organizing a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Organized {
    /// `simple_list` and `nested`.
    List(Vec<Item>),
    /// `grouped_by`, in first-seen key order.
    Groups(IndexMap<GroupKey, Vec<Item>>),
    /// `items_by_category`, in category order.
    Categories(IndexMap<GroupKey, Category>),
}

impl Organized {
    /// Number of items held, summed over buckets for the mapping shapes.
    pub fn item_count(&self) -> usize {
        match self {
            Organized::List(items) => items.len(),
            Organized::Groups(groups) => groups.values().map(Vec::len).sum(),
            Organized::Categories(categories) => {
                categories.values().map(|category| category.items.len()).sum()
            }
        }
    }

    /// True when there is at least one entry at the top level.
    pub fn is_present(&self) -> bool {
        match self {
            Organized::List(items) => !items.is_empty(),
            Organized::Groups(groups) => !groups.is_empty(),
            Organized::Categories(categories) => !categories.is_empty(),
        }
    }
}

/// Runs `pages` through the organizer selected by `config`.
///
/// Only a configuration that cannot be honored fails; odd page contents
/// never do.
pub fn organize(pages: &[Page], config: &OrganizerConfig) -> Result<Organized> {
    log::debug!(
        "Organizing {} pages as {:?}",
        pages.len(),
        config.organizer
    );
    match config.organizer {
        OrganizerKind::SimpleList => Ok(Organized::List(simple_list(pages, config))),
        OrganizerKind::ItemsByCategory => Ok(Organized::Categories(organize_by_category(pages))),
        OrganizerKind::GroupedBy => grouped(pages, config).map(Organized::Groups),
        OrganizerKind::Nested => Ok(Organized::List(nested(pages, config))),
        OrganizerKind::Unrecognized => {
            log::warn!("Unknown organizer, organizing as simple_list");
            Ok(Organized::List(simple_list(pages, config)))
        }
    }
}

fn project_page(page: &Page, specs: &[PropertySpec]) -> Item {
    project(&page.properties, specs).with("id", page.id.as_str())
}

fn simple_list(pages: &[Page], config: &OrganizerConfig) -> Vec<Item> {
    let items = pages
        .iter()
        .map(|page| {
            project_page(page, &config.properties)
                .with("created_time", page.created_time.clone())
                .with("last_edited_time", page.last_edited_time.clone())
        })
        .filter(Item::has_title)
        .collect();
    sort_items(items, config.sort_field(), config.sort_order)
}

fn grouped(pages: &[Page], config: &OrganizerConfig) -> Result<IndexMap<GroupKey, Vec<Item>>> {
    let field = config
        .group_by
        .as_deref()
        .filter(|field| !field.is_empty())
        .ok_or_else(|| {
            AppError::InvalidConfiguration("grouped_by organizer requires group_by".to_string())
        })?;

    let mut groups: IndexMap<GroupKey, Vec<Item>> = IndexMap::new();
    for item in pages.iter().map(|page| project_page(page, &config.properties)) {
        if !item.has_title() {
            continue;
        }
        let key = item
            .get(field)
            .and_then(|value| value.first_or_self().to_group_key())
            .unwrap_or_else(|| GroupKey::from(FALLBACK_GROUP_KEY));
        groups.entry(key).or_default().push(item);
    }

    Ok(groups
        .into_iter()
        .map(|(key, items)| (key, sort_items(items, config.sort_field(), config.sort_order)))
        .collect())
}

fn nested(pages: &[Page], config: &OrganizerConfig) -> Vec<Item> {
    let items = pages
        .iter()
        .map(|page| project_page(page, &config.properties))
        .collect();
    sort_tree(
        build_forest(items, &config.parent_field),
        config.sort_field(),
        config.sort_order,
    )
}
