mod property_value;
mod value;

pub use property_value::{FormulaArrayItem, FormulaValue, PropertyValue, RollupValue};
pub use value::{DateRange, FieldValue, GroupKey, Item};

use crate::types::{decode_or_log, lenient};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Properties of one page, keyed by property name in the order Notion sent them.
pub type Properties = IndexMap<String, PropertyValue>;

/// One row of a Notion database.
///
/// Decoding never fails on the row's contents: a property that cannot be
/// read becomes [`PropertyValue::Unsupported`] and the other properties
/// are kept.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Page {
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub created_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_edited_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_properties")]
    pub properties: Properties,
}

fn lenient_properties<'de, D>(deserializer: D) -> Result<Properties, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: IndexMap<String, Value> = lenient(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(name, value)| {
            let property = decode_or_log(value).unwrap_or(PropertyValue::Unsupported);
            (name, property)
        })
        .collect())
}

impl Page {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn with_timestamps(
        mut self,
        created_time: Option<String>,
        last_edited_time: Option<String>,
    ) -> Self {
        self.created_time = created_time;
        self.last_edited_time = last_edited_time;
        self
    }
}

/// Every page of a database query, pagination already drained.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct QueryResults {
    pub results: Vec<Page>,
}

impl QueryResults {
    pub fn new(results: Vec<Page>) -> Self {
        Self { results }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }
}
