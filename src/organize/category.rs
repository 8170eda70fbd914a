//! The `items_by_category` organizer: a fixed skill-sheet layout.

use crate::constants::{DEFAULT_DISPLAY_ORDER, FALLBACK_GROUP_KEY};
use crate::extract::{extract, PropertyKind};
use crate::model::{FieldValue, GroupKey, Page};
use indexmap::IndexMap;
use serde::Serialize;

const NAME: &str = "Name";
const LEVEL: &str = "Level";
const YEARS: &str = "Years";
const FEATURED: &str = "Featured";
const ORDER: &str = "Order";
const CATEGORY: &str = "Category";
const ICON: &str = "Icon";
const COLOR: &str = "Color";
const CATEGORY_ORDER: &str = "Category Order";

/// A category bucket and its items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub title: GroupKey,
    pub category: GroupKey,
    pub subcategory: Option<String>,
    pub icon: FieldValue,
    pub order: FieldValue,
    pub items: Vec<CategoryItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryItem {
    pub name: String,
    pub level: FieldValue,
    pub years: FieldValue,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: FieldValue,
    /// Null when the page has no `Featured` property.
    pub featured: FieldValue,
    pub order: FieldValue,
    pub id: String,
}

/// Groups pages into categories keyed by their `Category` rollup.
///
/// Categories are ordered by `Category Order`, items by `Order`; both
/// default to [`DEFAULT_DISPLAY_ORDER`] and ties keep first-seen order.
pub fn organize_by_category(pages: &[Page]) -> IndexMap<GroupKey, Category> {
    let mut categories: IndexMap<GroupKey, Category> = IndexMap::new();

    for page in pages {
        let properties = &page.properties;
        let name = match extract(properties, NAME, PropertyKind::Title) {
            FieldValue::Text(name) if !name.is_empty() => name,
            _ => continue,
        };

        let category_name = extract(properties, CATEGORY, PropertyKind::Rollup)
            .to_group_key()
            .unwrap_or_else(|| GroupKey::from(FALLBACK_GROUP_KEY));

        let category = categories
            .entry(category_name.clone())
            .or_insert_with(|| Category {
                title: category_name.clone(),
                category: category_name,
                subcategory: None,
                icon: extract(properties, ICON, PropertyKind::Rollup),
                order: or_default_order(extract(properties, CATEGORY_ORDER, PropertyKind::Rollup)),
                items: Vec::new(),
            });

        category.items.push(CategoryItem {
            name,
            level: extract(properties, LEVEL, PropertyKind::Number),
            years: extract(properties, YEARS, PropertyKind::Number),
            description: None,
            icon: None,
            color: extract(properties, COLOR, PropertyKind::Rollup),
            featured: extract(properties, FEATURED, PropertyKind::Checkbox),
            order: or_default_order(extract(properties, ORDER, PropertyKind::Number)),
            id: page.id.clone(),
        });
    }

    // IndexMap::sort_by is stable.
    categories.sort_by(|_, a, _, b| leading_integer(&a.order).cmp(&leading_integer(&b.order)));
    for category in categories.values_mut() {
        category
            .items
            .sort_by_key(|item| leading_integer(&item.order));
    }
    categories
}

fn or_default_order(value: FieldValue) -> FieldValue {
    if value.is_unset() {
        FieldValue::integer(DEFAULT_DISPLAY_ORDER)
    } else {
        value
    }
}

/// Integer reading of an order value: numbers truncate, text contributes
/// its leading integer, anything else counts as zero.
pub(crate) fn leading_integer(value: &FieldValue) -> i64 {
    match value {
        FieldValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or_default(),
        FieldValue::Text(text) => {
            let trimmed = text.trim_start();
            let sign_len = usize::from(trimmed.starts_with(['-', '+']));
            let digits = trimmed[sign_len..]
                .find(|c: char| !c.is_ascii_digit())
                .map_or(trimmed.len(), |end| end + sign_len);
            trimmed[..digits].parse().unwrap_or_default()
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PropertyValue, RollupValue};
    use pretty_assertions::assert_eq;

    fn rollup(text: &str) -> PropertyValue {
        PropertyValue::Rollup {
            rollup: Some(RollupValue::Array {
                array: vec![PropertyValue::rich_text(text)],
            }),
        }
    }

    fn number(n: i64) -> PropertyValue {
        PropertyValue::Number {
            number: Some(n.into()),
        }
    }

    fn skill(id: &str, name: &str, category: Option<&str>, order: Option<i64>) -> Page {
        let mut page = Page::new(id).with_property(NAME, PropertyValue::title(name));
        if let Some(category) = category {
            page = page.with_property(CATEGORY, rollup(category));
        }
        if let Some(order) = order {
            page = page.with_property(ORDER, number(order));
        }
        page
    }

    #[test]
    fn test_groups_and_orders_items() {
        let pages = vec![
            skill("1", "Rust", Some("Backend"), Some(2)),
            skill("2", "React", Some("Frontend"), Some(1)),
            skill("3", "Go", Some("Backend"), Some(1)),
        ];
        let categories = organize_by_category(&pages);

        let keys: Vec<_> = categories.keys().cloned().collect();
        assert_eq!(keys, vec!["Backend", "Frontend"]);
        let backend: Vec<_> = categories[&GroupKey::from("Backend")].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(backend, vec!["Go", "Rust"]);
        assert_eq!(categories[&GroupKey::from("Backend")].order, FieldValue::integer(999));
    }

    #[test]
    fn test_missing_category_and_name() {
        let pages = vec![
            skill("1", "Loner", None, None),
            skill("2", "", Some("Backend"), None),
        ];
        let categories = organize_by_category(&pages);
        assert_eq!(categories.len(), 1);
        let other = &categories[&GroupKey::from(FALLBACK_GROUP_KEY)];
        assert_eq!(other.items[0].order, FieldValue::integer(999));
        assert_eq!(other.items[0].featured, FieldValue::Null);
        assert_eq!(other.items[0].id, "1");
    }

    #[test]
    fn test_category_order_from_rollup() {
        let pages = vec![
            skill("1", "Docker", Some("Ops"), None)
                .with_property(CATEGORY_ORDER, rollup("2")),
            skill("2", "Figma", Some("Design"), None)
                .with_property(CATEGORY_ORDER, rollup("1")),
        ];
        let keys: Vec<_> = organize_by_category(&pages).keys().cloned().collect();
        assert_eq!(keys, vec!["Design", "Ops"]);
    }

    #[test]
    fn test_featured_keeps_checkbox_value() {
        let pages = vec![
            skill("1", "Rust", Some("Backend"), None).with_property(
                FEATURED,
                PropertyValue::Checkbox {
                    checkbox: Some(true),
                },
            ),
            skill("2", "Go", Some("Backend"), None)
                .with_property(FEATURED, PropertyValue::rich_text("yes")),
            skill("3", "Zig", Some("Backend"), None),
        ];
        let categories = organize_by_category(&pages);
        let featured: Vec<_> = categories[0].items.iter().map(|i| i.featured.clone()).collect();
        assert_eq!(
            featured,
            vec![FieldValue::Bool(true), FieldValue::Bool(false), FieldValue::Null]
        );

        let yaml = serde_yaml::to_string(&categories[0].items[2]).unwrap();
        assert!(yaml.contains("featured: null\n"));
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer(&FieldValue::integer(7)), 7);
        assert_eq!(leading_integer(&FieldValue::from(" 12abc")), 12);
        assert_eq!(leading_integer(&FieldValue::from("-3")), -3);
        assert_eq!(leading_integer(&FieldValue::from("abc")), 0);
        assert_eq!(leading_integer(&FieldValue::Null), 0);
        let float = FieldValue::Number(serde_json::Number::from_f64(2.9).unwrap());
        assert_eq!(leading_integer(&float), 2);
    }
}
