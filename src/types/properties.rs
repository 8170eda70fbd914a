//! Payload shapes carried inside Notion property values.
//!
//! Notion sends `null` for a lot of fields that are usually present, so
//! everything here decodes leniently: a missing or null field becomes
//! `None` or an empty collection instead of failing the whole page.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decodes a payload field, reading `null` or a value of the wrong shape
/// as the field's default.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decode_or_log(value).unwrap_or_default())
}

/// Decodes a list payload element by element, dropping malformed elements.
pub(crate) fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values: Vec<Value> = lenient(deserializer)?;
    Ok(values.into_iter().filter_map(decode_or_log).collect())
}

pub(crate) fn decode_or_log<T: DeserializeOwned>(value: Value) -> Option<T> {
    match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            log::debug!("Ignoring malformed payload: {}", e);
            None
        }
    }
}

/// One run of rich text. Only the plain rendering matters here.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RichText {
    #[serde(default, deserialize_with = "lenient")]
    pub plain_text: String,
}

impl RichText {
    /// Create a plain text run.
    pub fn plain_text(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
        }
    }

    /// Concatenates the plain text of every run, in order, with no separator.
    pub fn concat(runs: &[RichText]) -> String {
        runs.iter().map(|run| run.plain_text.as_str()).collect()
    }
}

/// Select, multi-select and status option.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub name: Option<String>,
}

impl SelectOption {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Date payload, kept as the strings Notion sent.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DateValue {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
}

impl DateValue {
    pub fn starting(start: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            ..Self::default()
        }
    }
}

/// Reference to another page in a relation property.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PageReference {
    #[serde(default)]
    pub id: Option<String>,
}

/// User listed in a people property.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub person: Option<PersonDetail>,
}

impl Person {
    pub fn email(&self) -> Option<&str> {
        self.person.as_ref().and_then(|p| p.email.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PersonDetail {
    #[serde(default)]
    pub email: Option<String>,
}

/// Entry of a files property: either uploaded to Notion or linked externally.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FileObject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub file: Option<FileLocation>,
    #[serde(default)]
    pub external: Option<FileLocation>,
}

impl FileObject {
    /// The hosted URL when Notion stores the file, otherwise the external one.
    pub fn url(&self) -> Option<&str> {
        self.file
            .as_ref()
            .and_then(|f| f.url.as_deref())
            .or_else(|| self.external.as_ref().and_then(|f| f.url.as_deref()))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FileLocation {
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rich_text_concat() {
        let runs = vec![RichText::plain_text("Hello"), RichText::plain_text(" World")];
        assert_eq!(RichText::concat(&runs), "Hello World");
        assert_eq!(RichText::concat(&[]), "");
    }

    #[test]
    fn test_null_plain_text_decodes_as_empty() {
        let run: RichText = serde_json::from_str(r#"{"plain_text": null}"#).unwrap();
        assert_eq!(run.plain_text, "");
    }

    #[test]
    fn test_wrong_shapes_decode_as_default() {
        let run: RichText = serde_json::from_str(r#"{"plain_text": 42}"#).unwrap();
        assert_eq!(run.plain_text, "");

        #[derive(Debug, Deserialize)]
        struct Runs {
            #[serde(default, deserialize_with = "lenient_items")]
            runs: Vec<RichText>,
        }
        let runs: Runs =
            serde_json::from_str(r#"{"runs": [{"plain_text": "a"}, "junk", {"plain_text": "b"}]}"#)
                .unwrap();
        assert_eq!(RichText::concat(&runs.runs), "ab");
        let runs: Runs = serde_json::from_str(r#"{"runs": {"plain_text": "a"}}"#).unwrap();
        assert!(runs.runs.is_empty());
    }

    #[test]
    fn test_file_url_prefers_hosted() {
        let file: FileObject = serde_json::from_value(serde_json::json!({
            "name": "cv.pdf",
            "type": "file",
            "file": {"url": "https://files.notion.so/cv.pdf"},
            "external": {"url": "https://example.com/cv.pdf"}
        }))
        .unwrap();
        assert_eq!(file.url(), Some("https://files.notion.so/cv.pdf"));

        let linked: FileObject = serde_json::from_value(serde_json::json!({
            "name": "logo",
            "type": "external",
            "external": {"url": "https://example.com/logo.png"}
        }))
        .unwrap();
        assert_eq!(linked.url(), Some("https://example.com/logo.png"));
    }
}
