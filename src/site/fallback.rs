//! Local content standing in for a Notion database.
//!
//! A collection's documents live in `_<collection>/` inside the site. Their
//! front matter is rebuilt into pages shaped like Notion query results so
//! that they go through the same organizers as fetched data.

use crate::constants::FALLBACK_DOCUMENT_EXTENSIONS;
use crate::error::AppError;
use crate::extract::{PropertyKind, PropertySpec};
use crate::model::{Page, Properties, PropertyValue};
use crate::types::{DateValue, SelectOption};
use indexmap::IndexMap;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Front matter of one document, keys in document order.
pub type FrontMatter = IndexMap<String, Value>;

const FRONT_MATTER_FENCE: &str = "---";

/// Directory holding a collection's local documents.
pub fn collection_dir(site_dir: &Path, collection: &str) -> PathBuf {
    site_dir.join(format!("_{}", collection))
}

/// Reads every document of a collection as a synthetic page.
///
/// A missing directory is an empty collection. Documents are read in file
/// name order; files without front matter are not documents and are skipped.
pub fn load_local_pages(
    site_dir: &Path,
    collection: &str,
    specs: &[PropertySpec],
) -> Result<Vec<Page>, AppError> {
    let dir = collection_dir(site_dir, collection);
    if !dir.is_dir() {
        log::debug!("No local collection at {}", dir.display());
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_document(path))
        .collect();
    paths.sort();

    let mut pages = Vec::with_capacity(paths.len());
    for path in paths {
        let text = fs::read_to_string(&path)?;
        let Some(front_matter) = parse_front_matter(&text)? else {
            log::debug!("{} has no front matter, skipping", path.display());
            continue;
        };
        let id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        pages.push(document_to_page(id, &front_matter, specs));
    }
    Ok(pages)
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| FALLBACK_DOCUMENT_EXTENSIONS.contains(&ext))
}

/// Splits off and decodes the `---` delimited YAML block at the top of a document.
pub fn parse_front_matter(text: &str) -> Result<Option<FrontMatter>, AppError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let Some(rest) = text
        .strip_prefix(FRONT_MATTER_FENCE)
        .and_then(|rest| rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")))
    else {
        return Ok(None);
    };

    let mut yaml = String::new();
    let mut closed = false;
    for line in rest.lines() {
        if line.trim_end() == FRONT_MATTER_FENCE {
            closed = true;
            break;
        }
        yaml.push_str(line);
        yaml.push('\n');
    }
    if !closed {
        return Ok(None);
    }
    if yaml.trim().is_empty() {
        return Ok(Some(FrontMatter::new()));
    }

    let mapping: serde_yaml::Mapping = serde_yaml::from_str(&yaml)?;
    Ok(Some(
        mapping
            .into_iter()
            .filter_map(|(key, value)| scalar_text(&key).map(|key| (key, value)))
            .collect(),
    ))
}

/// Builds the page a document stands in for.
pub fn document_to_page(id: String, front_matter: &FrontMatter, specs: &[PropertySpec]) -> Page {
    let timestamp = |key: &str| front_matter.get(key).and_then(scalar_text);
    Page {
        id,
        created_time: timestamp("date"),
        last_edited_time: timestamp("last_modified"),
        properties: convert_doc_to_properties(front_matter, specs),
    }
}

/// Converts front matter into Notion-shaped properties, one per spec.
///
/// Each value is looked up under the property's output key, then the
/// lowercased property name, then the property name itself. Specs with no
/// value are left out.
pub fn convert_doc_to_properties(front_matter: &FrontMatter, specs: &[PropertySpec]) -> Properties {
    let mut properties = Properties::new();
    for spec in specs {
        let value = [spec.output_key(), spec.name.to_lowercase(), spec.name.clone()]
            .iter()
            .find_map(|key| front_matter.get(key).filter(|value| !value.is_null()));
        if let Some(value) = value {
            properties.insert(spec.name.clone(), convert_value_to_property(value, spec.kind));
        }
    }
    properties
}

/// Wraps a plain value in the property shape Notion would send for `kind`.
///
/// Kinds with no local counterpart become rich text.
pub fn convert_value_to_property(value: &Value, kind: PropertyKind) -> PropertyValue {
    match kind {
        PropertyKind::Title => PropertyValue::title(display(value)),
        PropertyKind::Number => PropertyValue::Number {
            number: to_number(value),
        },
        PropertyKind::Checkbox => PropertyValue::Checkbox {
            checkbox: Some(!matches!(value, Value::Null | Value::Bool(false))),
        },
        PropertyKind::Date => PropertyValue::Date {
            date: Some(DateValue::starting(display(value))),
        },
        PropertyKind::Select => PropertyValue::Select {
            select: Some(SelectOption::named(display(value))),
        },
        PropertyKind::MultiSelect => PropertyValue::MultiSelect {
            multi_select: match value {
                Value::Sequence(values) => values
                    .iter()
                    .map(|v| SelectOption::named(display(v)))
                    .collect(),
                single => vec![SelectOption::named(display(single))],
            },
        },
        PropertyKind::Url => PropertyValue::Url {
            url: Some(display(value)),
        },
        _ => PropertyValue::rich_text(display(value)),
    }
}

fn to_number(value: &Value) -> Option<serde_json::Number> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(serde_json::Number::from)
            .or_else(|| n.as_u64().map(serde_json::Number::from))
            .or_else(|| n.as_f64().and_then(serde_json::Number::from_f64)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .map(serde_json::Number::from)
                .or_else(|| text.parse::<f64>().ok().and_then(serde_json::Number::from_f64))
        }
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// String form of any front matter value.
fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Sequence(values) => values.iter().map(display).collect::<Vec<_>>().join(", "),
        Value::Tagged(tagged) => display(&tagged.value),
        other => scalar_text(other).unwrap_or_else(|| {
            serde_yaml::to_string(other)
                .map(|text| text.trim_end().to_string())
                .unwrap_or_default()
        }),
    }
}
