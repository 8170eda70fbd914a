use crate::error::AppError;
use crate::model::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The extraction type declared for a property.
///
/// It may differ from the type Notion stores: declaring `number` against a
/// `select` column converts skill-level labels, declaring `url` against a
/// `rich_text` column reads the text, and `formula_array` has no stored
/// counterpart at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Title,
    RichText,
    Number,
    Checkbox,
    Date,
    Select,
    MultiSelect,
    Url,
    Email,
    PhoneNumber,
    Rollup,
    Formula,
    FormulaArray,
    Relation,
    People,
    Files,
    CreatedTime,
    LastEditedTime,
    Status,
}

impl PropertyKind {
    pub const ALL: [PropertyKind; 19] = [
        PropertyKind::Title,
        PropertyKind::RichText,
        PropertyKind::Number,
        PropertyKind::Checkbox,
        PropertyKind::Date,
        PropertyKind::Select,
        PropertyKind::MultiSelect,
        PropertyKind::Url,
        PropertyKind::Email,
        PropertyKind::PhoneNumber,
        PropertyKind::Rollup,
        PropertyKind::Formula,
        PropertyKind::FormulaArray,
        PropertyKind::Relation,
        PropertyKind::People,
        PropertyKind::Files,
        PropertyKind::CreatedTime,
        PropertyKind::LastEditedTime,
        PropertyKind::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::Title => "title",
            PropertyKind::RichText => "rich_text",
            PropertyKind::Number => "number",
            PropertyKind::Checkbox => "checkbox",
            PropertyKind::Date => "date",
            PropertyKind::Select => "select",
            PropertyKind::MultiSelect => "multi_select",
            PropertyKind::Url => "url",
            PropertyKind::Email => "email",
            PropertyKind::PhoneNumber => "phone_number",
            PropertyKind::Rollup => "rollup",
            PropertyKind::Formula => "formula",
            PropertyKind::FormulaArray => "formula_array",
            PropertyKind::Relation => "relation",
            PropertyKind::People => "people",
            PropertyKind::Files => "files",
            PropertyKind::CreatedTime => "created_time",
            PropertyKind::LastEditedTime => "last_edited_time",
            PropertyKind::Status => "status",
        }
    }

    /// What extraction yields when the property is absent or stored as
    /// something else: `false` for checkboxes, an empty list for list
    /// types, null for the rest.
    pub fn empty_value(&self) -> FieldValue {
        match self {
            PropertyKind::Checkbox => FieldValue::Bool(false),
            PropertyKind::MultiSelect
            | PropertyKind::FormulaArray
            | PropertyKind::Relation
            | PropertyKind::People
            | PropertyKind::Files => FieldValue::List(Vec::new()),
            _ => FieldValue::Null,
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AppError::InvalidConfiguration(format!("unknown property type '{}'", s)))
    }
}

/// One property extraction instruction: read `name` as `kind`, store it
/// under `key` (or the normalized form of `name`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl PropertySpec {
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            key: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// The key the extracted value is stored under.
    pub fn output_key(&self) -> String {
        match &self.key {
            Some(key) => key.clone(),
            None => super::normalize_key(&self.name),
        }
    }
}
