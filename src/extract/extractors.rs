//! Per-type extraction: one Notion property value in, one field value out.
//!
//! The dispatch is a single match over (declared kind, stored value). Any
//! pairing without an arm falls through to the declared kind's empty value,
//! so a schema change on the Notion side degrades one field, never a page.

use super::types::PropertyKind;
use crate::model::{
    DateRange, FieldValue, FormulaArrayItem, FormulaValue, Properties, PropertyValue, RollupValue,
};
use crate::types::{RichText, SelectOption};
use indexmap::IndexMap;

/// Skill-level labels that a `number` extraction accepts from a select column.
const SELECT_LEVELS: &[(&str, i64)] = &[
    ("Expert", 90),
    ("Avancé", 90),
    ("Advanced", 90),
    ("Intermédiaire", 70),
    ("Intermediate", 70),
    ("Débutant", 50),
    ("Beginner", 50),
];

/// Separator between entries of a list packed into a formula string.
const FORMULA_LIST_DELIMITER: &str = "- ";

/// Looks up `name` and extracts it as `kind`. Absent properties yield null.
pub fn extract(properties: &Properties, name: &str, kind: PropertyKind) -> FieldValue {
    match properties.get(name) {
        Some(value) => extract_value(value, kind),
        None => FieldValue::Null,
    }
}

/// Extracts a stored property value as the declared kind.
pub fn extract_value(value: &PropertyValue, kind: PropertyKind) -> FieldValue {
    use PropertyKind as K;
    use PropertyValue as V;

    match (kind, value) {
        (K::Title, V::Title { title }) => FieldValue::Text(RichText::concat(title)),
        (K::RichText | K::Url, V::RichText { rich_text }) => rich_text_or_null(rich_text.as_deref()),
        (K::Number, V::Number { number }) => number.clone().into(),
        (K::Number, V::Select { select }) => level_for(option_name(select)),
        (K::Checkbox, V::Checkbox { checkbox }) => FieldValue::Bool(checkbox.unwrap_or(false)),
        (K::Date, V::Date { date: Some(date) }) => FieldValue::Date(DateRange::from(date)),
        (K::Select, V::Select { select }) => option_name(select).into(),
        (K::MultiSelect, V::MultiSelect { multi_select }) => FieldValue::List(
            multi_select
                .iter()
                .map(|option| option.name.clone().into())
                .collect(),
        ),
        (K::Url, V::Url { url }) => url.clone().into(),
        (K::Email, V::Email { email }) => email.clone().into(),
        (K::PhoneNumber, V::PhoneNumber { phone_number }) => phone_number.clone().into(),
        (K::Rollup, V::Rollup { rollup: Some(rollup) }) => rollup_value(rollup),
        (K::Formula, V::Formula { formula: Some(formula) }) => formula_value(formula),
        (K::FormulaArray, V::Formula { formula: Some(formula) }) => formula_list(formula),
        (K::Relation, V::Relation { relation }) => FieldValue::List(
            relation
                .iter()
                .map(|reference| reference.id.clone().into())
                .collect(),
        ),
        (K::People, V::People { people }) => FieldValue::List(
            people
                .iter()
                .map(|person| {
                    compact([
                        ("id", person.id.clone()),
                        ("name", person.name.clone()),
                        ("email", person.email().map(str::to_string)),
                        ("avatar_url", person.avatar_url.clone()),
                    ])
                })
                .collect(),
        ),
        (K::Files, V::Files { files }) => FieldValue::List(
            files
                .iter()
                .map(|file| {
                    compact([
                        ("name", file.name.clone()),
                        ("url", file.url().map(str::to_string)),
                        ("type", file.kind.clone()),
                    ])
                })
                .collect(),
        ),
        (K::CreatedTime, V::CreatedTime { created_time }) => created_time.clone().into(),
        (K::LastEditedTime, V::LastEditedTime { last_edited_time }) => {
            last_edited_time.clone().into()
        }
        (K::Status, V::Status { status }) => option_name(status).into(),
        (kind, stored) => {
            log::trace!(
                "Property stored as {} has nothing to offer as {}",
                stored.type_name(),
                kind
            );
            kind.empty_value()
        }
    }
}

/// Converts a skill-level label to its score. Unknown labels have no score.
pub fn level_for(label: Option<&str>) -> FieldValue {
    label
        .and_then(|label| SELECT_LEVELS.iter().find(|(name, _)| *name == label))
        .map(|(_, score)| FieldValue::integer(*score))
        .unwrap_or(FieldValue::Null)
}

/// Splits a `"- a - b"` style formula string into its cleaned entries.
///
/// Each segment is trimmed, then stripped of leading and trailing dots;
/// segments left empty are dropped.
pub fn split_formula_list(text: &str) -> Vec<String> {
    text.split(FORMULA_LIST_DELIMITER)
        .map(|segment| segment.trim().trim_matches('.'))
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn option_name(option: &Option<SelectOption>) -> Option<&str> {
    option.as_ref().and_then(|option| option.name.as_deref())
}

fn rich_text_or_null(runs: Option<&[RichText]>) -> FieldValue {
    match runs {
        Some(runs) if !runs.is_empty() => FieldValue::Text(RichText::concat(runs)),
        _ => FieldValue::Null,
    }
}

fn rollup_value(rollup: &RollupValue) -> FieldValue {
    match rollup {
        RollupValue::Array { array } => array
            .iter()
            .map(rollup_item)
            .find(|value| !value.is_null())
            .unwrap_or(FieldValue::Null),
        RollupValue::Number { number } => number.clone().into(),
        RollupValue::Date { date } => date.as_ref().and_then(|d| d.start.clone()).into(),
        RollupValue::Unsupported => FieldValue::Null,
    }
}

/// Reads one element of an array rollup. Only text-like, select and number
/// columns contribute a value.
fn rollup_item(item: &PropertyValue) -> FieldValue {
    match item {
        // An empty run list still reads as "", which counts as a value.
        PropertyValue::Title { title } => FieldValue::Text(RichText::concat(title)),
        PropertyValue::RichText { rich_text } => {
            rich_text.as_deref().map(RichText::concat).into()
        }
        PropertyValue::Select { select } => option_name(select).into(),
        PropertyValue::Number { number } => number.clone().into(),
        _ => FieldValue::Null,
    }
}

fn formula_value(formula: &FormulaValue) -> FieldValue {
    match formula {
        FormulaValue::String { string } => string.clone().into(),
        FormulaValue::Number { number } => number.clone().into(),
        FormulaValue::Boolean { boolean } => (*boolean).into(),
        FormulaValue::Date { date } => date.as_ref().and_then(|d| d.start.clone()).into(),
        FormulaValue::Array { .. } | FormulaValue::Unsupported => FieldValue::Null,
    }
}

fn formula_list(formula: &FormulaValue) -> FieldValue {
    match formula {
        FormulaValue::Array { array } => FieldValue::List(
            array
                .iter()
                .filter_map(|item| match item {
                    FormulaArrayItem::String { string } => string.clone(),
                    FormulaArrayItem::RichText { rich_text } => {
                        rich_text.as_deref().map(RichText::concat)
                    }
                    FormulaArrayItem::Unsupported => None,
                })
                .map(FieldValue::Text)
                .collect(),
        ),
        FormulaValue::String { string } => FieldValue::list(
            string
                .as_deref()
                .map(split_formula_list)
                .unwrap_or_default(),
        ),
        _ => FieldValue::List(Vec::new()),
    }
}

/// Builds an object value, leaving out fields that have no value.
fn compact<const N: usize>(fields: [(&str, Option<String>); N]) -> FieldValue {
    let map: IndexMap<String, FieldValue> = fields
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), FieldValue::Text(v))))
        .collect();
    FieldValue::Map(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn props(value: serde_json::Value) -> Properties {
        serde_json::from_value(value).expect("valid properties fixture")
    }

    fn one(value: serde_json::Value, kind: PropertyKind) -> FieldValue {
        extract(&props(json!({ "Field": value })), "Field", kind)
    }

    #[test]
    fn test_missing_property_is_null_for_every_kind() {
        let empty = Properties::new();
        for kind in PropertyKind::ALL {
            assert_eq!(extract(&empty, "Nope", kind), FieldValue::Null, "{}", kind);
        }
    }

    #[test]
    fn test_mismatched_property_yields_declared_empty_value() {
        let stored = json!({"type": "email", "email": "a@b.c"});
        for kind in PropertyKind::ALL {
            if kind == PropertyKind::Email {
                continue;
            }
            assert_eq!(one(stored.clone(), kind), kind.empty_value(), "{}", kind);
        }
    }

    #[test]
    fn test_title_concatenates_runs() {
        let value = one(
            json!({"type": "title", "title": [{"plain_text": "Hello"}, {"plain_text": " World"}]}),
            PropertyKind::Title,
        );
        assert_eq!(value, FieldValue::from("Hello World"));
    }

    #[test]
    fn test_rich_text() {
        let text = json!({"type": "rich_text", "rich_text": [{"plain_text": "Body"}]});
        assert_eq!(one(text, PropertyKind::RichText), FieldValue::from("Body"));
        assert_eq!(
            one(json!({"type": "rich_text", "rich_text": []}), PropertyKind::RichText),
            FieldValue::Null
        );
        assert_eq!(
            one(json!({"type": "rich_text", "rich_text": null}), PropertyKind::RichText),
            FieldValue::Null
        );
    }

    #[test]
    fn test_number_and_select_levels() {
        assert_eq!(
            one(json!({"type": "number", "number": 42}), PropertyKind::Number),
            FieldValue::integer(42)
        );
        for (label, score) in [
            ("Expert", 90),
            ("Avancé", 90),
            ("Advanced", 90),
            ("Intermédiaire", 70),
            ("Intermediate", 70),
            ("Débutant", 50),
            ("Beginner", 50),
        ] {
            let stored = json!({"type": "select", "select": {"name": label}});
            assert_eq!(one(stored, PropertyKind::Number), FieldValue::integer(score));
        }
        assert_eq!(
            one(json!({"type": "select", "select": {"name": "Guru"}}), PropertyKind::Number),
            FieldValue::Null
        );
        assert_eq!(
            one(json!({"type": "select", "select": null}), PropertyKind::Number),
            FieldValue::Null
        );
    }

    #[test]
    fn test_checkbox_defaults_to_false() {
        assert_eq!(
            one(json!({"type": "checkbox", "checkbox": true}), PropertyKind::Checkbox),
            FieldValue::Bool(true)
        );
        assert_eq!(
            one(json!({"type": "number", "number": 1}), PropertyKind::Checkbox),
            FieldValue::Bool(false)
        );
    }

    #[test]
    fn test_date_is_compacted() {
        let value = one(
            json!({"type": "date", "date": {"start": "2024-01-01", "end": null, "time_zone": null}}),
            PropertyKind::Date,
        );
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"start": "2024-01-01"})
        );
        assert_eq!(
            one(json!({"type": "date", "date": null}), PropertyKind::Date),
            FieldValue::Null
        );
    }

    #[test]
    fn test_select_multi_select_and_status() {
        assert_eq!(
            one(json!({"type": "select", "select": {"name": "Tech"}}), PropertyKind::Select),
            FieldValue::from("Tech")
        );
        assert_eq!(
            one(
                json!({"type": "multi_select", "multi_select": [{"name": "a"}, {"name": "b"}]}),
                PropertyKind::MultiSelect
            ),
            FieldValue::list(["a", "b"])
        );
        assert_eq!(
            one(json!({"type": "status", "status": {"name": "Done"}}), PropertyKind::Status),
            FieldValue::from("Done")
        );
    }

    #[test]
    fn test_url_reads_rich_text_columns() {
        assert_eq!(
            one(json!({"type": "url", "url": "https://a.dev"}), PropertyKind::Url),
            FieldValue::from("https://a.dev")
        );
        assert_eq!(
            one(
                json!({"type": "rich_text", "rich_text": [{"plain_text": "https://b.dev"}]}),
                PropertyKind::Url
            ),
            FieldValue::from("https://b.dev")
        );
    }

    #[test]
    fn test_rollup_variants() {
        let array = json!({"type": "rollup", "rollup": {"type": "array", "array": [
            {"type": "people", "people": []},
            {"type": "select", "select": null},
            {"type": "rich_text", "rich_text": [{"plain_text": "Backend"}]}
        ]}});
        assert_eq!(one(array, PropertyKind::Rollup), FieldValue::from("Backend"));

        let number = json!({"type": "rollup", "rollup": {"type": "number", "number": 3}});
        assert_eq!(one(number, PropertyKind::Rollup), FieldValue::integer(3));

        let date = json!({"type": "rollup", "rollup": {"type": "date", "date": {"start": "2024-05-01"}}});
        assert_eq!(one(date, PropertyKind::Rollup), FieldValue::from("2024-05-01"));

        let empty = json!({"type": "rollup", "rollup": {"type": "array", "array": []}});
        assert_eq!(one(empty, PropertyKind::Rollup), FieldValue::Null);

        let other = json!({"type": "rollup", "rollup": {"type": "incomplete"}});
        assert_eq!(one(other, PropertyKind::Rollup), FieldValue::Null);
    }

    #[test]
    fn test_rollup_empty_title_item_is_a_value() {
        let array = json!({"type": "rollup", "rollup": {"type": "array", "array": [
            {"type": "title", "title": []},
            {"type": "select", "select": {"name": "Second"}}
        ]}});
        assert_eq!(one(array, PropertyKind::Rollup), FieldValue::from(""));

        let array = json!({"type": "rollup", "rollup": {"type": "array", "array": [
            {"type": "rich_text", "rich_text": null},
            {"type": "rich_text", "rich_text": []},
            {"type": "select", "select": {"name": "Third"}}
        ]}});
        assert_eq!(one(array, PropertyKind::Rollup), FieldValue::from(""));
    }

    #[test]
    fn test_formula_variants() {
        let cases = [
            (json!({"type": "string", "string": "hi"}), FieldValue::from("hi")),
            (json!({"type": "number", "number": 1.5}), FieldValue::Number(serde_json::Number::from_f64(1.5).unwrap())),
            (json!({"type": "boolean", "boolean": true}), FieldValue::Bool(true)),
            (json!({"type": "date", "date": {"start": "2024-02-02"}}), FieldValue::from("2024-02-02")),
            (json!({"type": "date", "date": null}), FieldValue::Null),
        ];
        for (formula, expected) in cases {
            let stored = json!({"type": "formula", "formula": formula});
            assert_eq!(one(stored, PropertyKind::Formula), expected);
        }
    }

    #[test]
    fn test_formula_array_from_string() {
        let stored = json!({"type": "formula", "formula": {"type": "string", "string": "- ...item1...- item2"}});
        assert_eq!(
            one(stored, PropertyKind::FormulaArray),
            FieldValue::list(["item1", "item2"])
        );
        assert_eq!(split_formula_list(""), Vec::<String>::new());
        assert_eq!(split_formula_list("- ... - a."), vec!["a".to_string()]);
    }

    #[test]
    fn test_formula_array_from_items() {
        let stored = json!({"type": "formula", "formula": {"type": "array", "array": [
            {"type": "string", "string": "one"},
            {"type": "rich_text", "rich_text": [{"plain_text": "two"}]},
            {"type": "number", "number": 3},
            {"type": "string", "string": null}
        ]}});
        assert_eq!(
            one(stored, PropertyKind::FormulaArray),
            FieldValue::list(["one", "two"])
        );
        let boolean = json!({"type": "formula", "formula": {"type": "boolean", "boolean": true}});
        assert_eq!(one(boolean, PropertyKind::FormulaArray), FieldValue::List(vec![]));
    }

    #[test]
    fn test_relation_people_and_files() {
        assert_eq!(
            one(
                json!({"type": "relation", "relation": [{"id": "r1"}, {"id": "r2"}]}),
                PropertyKind::Relation
            ),
            FieldValue::list(["r1", "r2"])
        );

        let people = one(
            json!({"type": "people", "people": [
                {"id": "u1", "name": "Ada", "avatar_url": null, "person": {"email": "ada@x.io"}}
            ]}),
            PropertyKind::People,
        );
        assert_eq!(
            serde_json::to_value(&people).unwrap(),
            json!([{"id": "u1", "name": "Ada", "email": "ada@x.io"}])
        );

        let files = one(
            json!({"type": "files", "files": [
                {"name": "a.png", "type": "external", "external": {"url": "https://x/a.png"}}
            ]}),
            PropertyKind::Files,
        );
        assert_eq!(
            serde_json::to_value(&files).unwrap(),
            json!([{"name": "a.png", "url": "https://x/a.png", "type": "external"}])
        );
    }

    #[test]
    fn test_timestamps_pass_through() {
        assert_eq!(
            one(
                json!({"type": "created_time", "created_time": "2024-01-01T00:00:00.000Z"}),
                PropertyKind::CreatedTime
            ),
            FieldValue::from("2024-01-01T00:00:00.000Z")
        );
        assert_eq!(
            one(
                json!({"type": "last_edited_time", "last_edited_time": "2024-01-03T00:00:00.000Z"}),
                PropertyKind::LastEditedTime
            ),
            FieldValue::from("2024-01-03T00:00:00.000Z")
        );
    }

    #[test]
    fn test_unsupported_stored_type_is_empty() {
        let page = Page::new("p").with_property("X", PropertyValue::Unsupported);
        assert_eq!(
            extract(&page.properties, "X", PropertyKind::MultiSelect),
            FieldValue::List(vec![])
        );
    }
}
