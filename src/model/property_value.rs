use crate::types::{
    lenient, lenient_items, DateValue, FileObject, PageReference, Person, RichText, SelectOption,
};
use serde::Deserialize;
use serde_json::Number;

/// A property value as stored on a Notion page, tagged by its `type` field.
///
/// Types this crate has no use for decode to `Unsupported` so that one
/// exotic column never makes a whole page unreadable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default, deserialize_with = "lenient_items")]
        title: Vec<RichText>,
    },
    RichText {
        #[serde(default, deserialize_with = "lenient")]
        rich_text: Option<Vec<RichText>>,
    },
    Number {
        #[serde(default, deserialize_with = "lenient")]
        number: Option<Number>,
    },
    Checkbox {
        #[serde(default, deserialize_with = "lenient")]
        checkbox: Option<bool>,
    },
    Date {
        #[serde(default, deserialize_with = "lenient")]
        date: Option<DateValue>,
    },
    Select {
        #[serde(default, deserialize_with = "lenient")]
        select: Option<SelectOption>,
    },
    MultiSelect {
        #[serde(default, deserialize_with = "lenient_items")]
        multi_select: Vec<SelectOption>,
    },
    Url {
        #[serde(default, deserialize_with = "lenient")]
        url: Option<String>,
    },
    Email {
        #[serde(default, deserialize_with = "lenient")]
        email: Option<String>,
    },
    PhoneNumber {
        #[serde(default, deserialize_with = "lenient")]
        phone_number: Option<String>,
    },
    Rollup {
        #[serde(default, deserialize_with = "lenient")]
        rollup: Option<RollupValue>,
    },
    Formula {
        #[serde(default, deserialize_with = "lenient")]
        formula: Option<FormulaValue>,
    },
    Relation {
        #[serde(default, deserialize_with = "lenient_items")]
        relation: Vec<PageReference>,
    },
    People {
        #[serde(default, deserialize_with = "lenient_items")]
        people: Vec<Person>,
    },
    Files {
        #[serde(default, deserialize_with = "lenient_items")]
        files: Vec<FileObject>,
    },
    CreatedTime {
        #[serde(default, deserialize_with = "lenient")]
        created_time: Option<String>,
    },
    LastEditedTime {
        #[serde(default, deserialize_with = "lenient")]
        last_edited_time: Option<String>,
    },
    Status {
        #[serde(default, deserialize_with = "lenient")]
        status: Option<SelectOption>,
    },
    #[serde(other)]
    Unsupported,
}

impl PropertyValue {
    /// Returns the Notion API type name for this property value.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Title { .. } => "title",
            PropertyValue::RichText { .. } => "rich_text",
            PropertyValue::Number { .. } => "number",
            PropertyValue::Checkbox { .. } => "checkbox",
            PropertyValue::Date { .. } => "date",
            PropertyValue::Select { .. } => "select",
            PropertyValue::MultiSelect { .. } => "multi_select",
            PropertyValue::Url { .. } => "url",
            PropertyValue::Email { .. } => "email",
            PropertyValue::PhoneNumber { .. } => "phone_number",
            PropertyValue::Rollup { .. } => "rollup",
            PropertyValue::Formula { .. } => "formula",
            PropertyValue::Relation { .. } => "relation",
            PropertyValue::People { .. } => "people",
            PropertyValue::Files { .. } => "files",
            PropertyValue::CreatedTime { .. } => "created_time",
            PropertyValue::LastEditedTime { .. } => "last_edited_time",
            PropertyValue::Status { .. } => "status",
            PropertyValue::Unsupported => "unsupported",
        }
    }

    /// A title made of a single plain text run.
    pub fn title(text: impl Into<String>) -> Self {
        PropertyValue::Title {
            title: vec![RichText::plain_text(text)],
        }
    }

    /// A rich text value made of a single plain text run.
    pub fn rich_text(text: impl Into<String>) -> Self {
        PropertyValue::RichText {
            rich_text: Some(vec![RichText::plain_text(text)]),
        }
    }
}

/// Computed value of a rollup property.
///
/// Array rollups hold one property value per related page, in the shape
/// of the rolled-up column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RollupValue {
    Array {
        #[serde(default, deserialize_with = "lenient_items")]
        array: Vec<PropertyValue>,
    },
    Number {
        #[serde(default, deserialize_with = "lenient")]
        number: Option<Number>,
    },
    Date {
        #[serde(default, deserialize_with = "lenient")]
        date: Option<DateValue>,
    },
    #[serde(other)]
    Unsupported,
}

/// Computed value of a formula property.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaValue {
    String {
        #[serde(default, deserialize_with = "lenient")]
        string: Option<String>,
    },
    Number {
        #[serde(default, deserialize_with = "lenient")]
        number: Option<Number>,
    },
    Boolean {
        #[serde(default, deserialize_with = "lenient")]
        boolean: Option<bool>,
    },
    Date {
        #[serde(default, deserialize_with = "lenient")]
        date: Option<DateValue>,
    },
    Array {
        #[serde(default, deserialize_with = "lenient_items")]
        array: Vec<FormulaArrayItem>,
    },
    #[serde(other)]
    Unsupported,
}

/// Element of an array-valued formula.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaArrayItem {
    String {
        #[serde(default, deserialize_with = "lenient")]
        string: Option<String>,
    },
    RichText {
        #[serde(default, deserialize_with = "lenient")]
        rich_text: Option<Vec<RichText>>,
    },
    #[serde(other)]
    Unsupported,
}
