use super::extractors::extract;
use super::types::PropertySpec;
use crate::model::{FieldValue, Item, Properties};

/// Projects a page's properties into an item, one field per spec, in spec order.
///
/// A `name` field stands in for a missing `title`. The fallback runs after
/// every spec has been applied and never replaces a title that is set.
pub fn project(properties: &Properties, specs: &[PropertySpec]) -> Item {
    let mut item = Item::new();
    for spec in specs {
        item.insert(spec.output_key(), extract(properties, &spec.name, spec.kind));
    }

    let title_unset = item.get("title").map_or(true, FieldValue::is_unset);
    if title_unset {
        if let Some(name) = item.get("name").filter(|name| !name.is_unset()).cloned() {
            item.insert("title", name);
        }
    }
    item
}
