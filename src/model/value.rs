//! The uniform value model produced by extraction.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Number;

/// A normalized field value: what a property looks like once its Notion
/// encoding has been stripped away.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Date(DateRange),
    List(Vec<FieldValue>),
    Map(IndexMap<String, FieldValue>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Null or the empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Null or `false`: the values that don't count as "set".
    pub fn is_unset(&self) -> bool {
        matches!(self, FieldValue::Null | FieldValue::Bool(false))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(values) => Some(values),
            _ => None,
        }
    }

    /// For list values, the first element; every other value is returned as is.
    ///
    /// Reference fields (relations, multi-selects) hold lists even when they
    /// point at a single thing.
    pub fn first_or_self(&self) -> &FieldValue {
        match self {
            FieldValue::List(values) => values.first().unwrap_or(&FieldValue::Null),
            other => other,
        }
    }

    /// The value as a mapping key. Unset values have no key.
    ///
    /// Booleans and numbers stay native; dates key by their start, and
    /// lists and maps by their printed form.
    pub fn to_group_key(&self) -> Option<GroupKey> {
        match self {
            FieldValue::Null | FieldValue::Bool(false) => None,
            FieldValue::Bool(true) => Some(GroupKey::Bool(true)),
            FieldValue::Number(n) => Some(GroupKey::Number(n.clone())),
            FieldValue::Text(text) => Some(GroupKey::Text(text.clone())),
            FieldValue::Date(date) => date.start.clone().map(GroupKey::Text),
            FieldValue::List(_) | FieldValue::Map(_) => Some(GroupKey::Text(self.to_string())),
        }
    }

    /// String form of [`FieldValue::to_group_key`].
    pub fn to_key(&self) -> Option<String> {
        self.to_group_key().map(|key| key.to_string())
    }

    /// An integer number, as Notion would send it.
    pub fn integer(value: i64) -> Self {
        FieldValue::Number(Number::from(value))
    }

    pub fn list<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<FieldValue>,
    {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(text) => write!(f, "{}", text),
            FieldValue::Date(date) => write!(f, "{}", date.start.as_deref().unwrap_or_default()),
            FieldValue::List(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match value {
                        FieldValue::Text(text) => write!(f, "{:?}", text)?,
                        FieldValue::Null => write!(f, "nil")?,
                        other => write!(f, "{}", other)?,
                    }
                }
                write!(f, "]")
            }
            FieldValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?} => {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<Number> for FieldValue {
    fn from(value: Number) -> Self {
        FieldValue::Number(value)
    }
}

impl From<DateRange> for FieldValue {
    fn from(value: DateRange) -> Self {
        FieldValue::Date(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Key of a `grouped_by` bucket or an `items_by_category` category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum GroupKey {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKey::Bool(b) => write!(f, "{}", b),
            GroupKey::Number(n) => write!(f, "{}", n),
            GroupKey::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        GroupKey::Text(value.to_string())
    }
}

impl PartialEq<&str> for GroupKey {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, GroupKey::Text(text) if text == other)
    }
}

/// Compact date object: absent bounds are left out when serialized.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl From<&crate::types::DateValue> for DateRange {
    fn from(date: &crate::types::DateValue) -> Self {
        Self {
            start: date.start.clone(),
            end: date.end.clone(),
            time_zone: date.time_zone.clone(),
        }
    }
}

/// A normalized item: ordered fields, plus children when it sits in a tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Item {
    #[serde(flatten)]
    pub fields: IndexMap<String, FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Item>>,
}

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Sets a field, keeping the position of a key that already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Builder-style [`Item::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(FieldValue::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.get("id").and_then(FieldValue::as_str)
    }

    /// True when the item has a non-empty title.
    pub fn has_title(&self) -> bool {
        self.get("title").is_some_and(|title| !title.is_blank())
    }

    pub fn children(&self) -> &[Item] {
        self.children.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_omits_absent_fields() {
        let date = DateRange {
            start: Some("2024-01-01".into()),
            ..DateRange::default()
        };
        assert_eq!(
            serde_json::to_value(FieldValue::Date(date)).unwrap(),
            serde_json::json!({"start": "2024-01-01"})
        );
    }

    #[test]
    fn test_integers_stay_integers() {
        let yaml = serde_yaml::to_string(&FieldValue::integer(90)).unwrap();
        assert_eq!(yaml.trim(), "90");
    }

    #[test]
    fn test_first_or_self() {
        let list = FieldValue::list(["a", "b"]);
        assert_eq!(list.first_or_self(), &FieldValue::from("a"));
        assert_eq!(FieldValue::List(vec![]).first_or_self(), &FieldValue::Null);
        assert_eq!(FieldValue::from("x").first_or_self(), &FieldValue::from("x"));
    }

    #[test]
    fn test_item_serializes_fields_then_children() {
        let item = Item {
            children: Some(vec![]),
            ..Item::new().with("title", "Root").with("id", "1")
        };
        assert_eq!(
            serde_json::to_string(&item).unwrap(),
            r#"{"title":"Root","id":"1","children":[]}"#
        );
    }

    #[test]
    fn test_group_keys_stay_native() {
        assert_eq!(FieldValue::integer(1).to_group_key(), Some(GroupKey::Number(Number::from(1i64))));
        assert_eq!(FieldValue::Bool(true).to_group_key(), Some(GroupKey::Bool(true)));
        assert_eq!(FieldValue::Bool(false).to_group_key(), None);
        assert_eq!(FieldValue::from("Tech").to_group_key(), Some(GroupKey::from("Tech")));
        assert_eq!(FieldValue::integer(1).to_key().as_deref(), Some("1"));

        let mut map = IndexMap::new();
        map.insert(GroupKey::Number(Number::from(1i64)), "one");
        map.insert(GroupKey::Bool(true), "yes");
        map.insert(GroupKey::from("2"), "two");
        let yaml = serde_yaml::to_string(&map).unwrap();
        assert!(yaml.starts_with("1: one\ntrue: yes\n"));
        assert!(!yaml.contains("'1'"));
    }

    #[test]
    fn test_blank_titles() {
        assert!(!Item::new().has_title());
        assert!(!Item::new().with("title", "").has_title());
        assert!(!Item::new().with("title", FieldValue::Null).has_title());
        assert!(Item::new().with("title", "A").has_title());
    }
}
