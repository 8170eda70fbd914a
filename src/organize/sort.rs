//! Field-based ordering shared by every organizer that sorts.

use super::SortOrder;
use crate::model::{FieldValue, Item};
use std::cmp::Ordering;

/// Comparable projection of a field value.
///
/// Numbers order before text; the two bounds exist so that a missing value
/// can be pushed to whichever end survives the final reversal.
#[derive(Debug, Clone)]
enum SortKey {
    Lowest,
    Number(f64),
    Text(String),
    Highest,
}

impl SortKey {
    fn for_value(value: Option<&FieldValue>, order: SortOrder) -> Self {
        match value {
            None | Some(FieldValue::Null) => match order {
                SortOrder::Asc => SortKey::Highest,
                SortOrder::Desc => SortKey::Lowest,
            },
            Some(FieldValue::Number(n)) => SortKey::Number(n.as_f64().unwrap_or_default()),
            Some(FieldValue::Text(text)) => SortKey::Text(text.to_lowercase()),
            Some(FieldValue::Date(date)) => SortKey::Text(date.start.clone().unwrap_or_default()),
            Some(FieldValue::Map(map)) => SortKey::Text(
                map.get("start")
                    .and_then(FieldValue::as_str)
                    .unwrap_or_default()
                    .to_string(),
            ),
            Some(other) => SortKey::Text(other.to_string().to_lowercase()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Lowest => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
            SortKey::Highest => 3,
        }
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Sorts items by the value of `sort_by`.
///
/// Without a sort field the input order is returned untouched. Items are
/// sorted ascending by key and the whole sequence is reversed for
/// [`SortOrder::Desc`]; items missing the field end up last either way.
pub fn sort_items(items: Vec<Item>, sort_by: Option<&str>, order: SortOrder) -> Vec<Item> {
    let field = match sort_by {
        Some(field) if !field.is_empty() => field,
        _ => return items,
    };

    let mut keyed: Vec<(SortKey, Item)> = items
        .into_iter()
        .map(|item| (SortKey::for_value(item.get(field), order), item))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    if order == SortOrder::Desc {
        keyed.reverse();
    }
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Sorts a forest level by level: the roots, then every node's children.
pub fn sort_tree(items: Vec<Item>, sort_by: Option<&str>, order: SortOrder) -> Vec<Item> {
    sort_items(items, sort_by, order)
        .into_iter()
        .map(|mut item| {
            if let Some(children) = item.children.take() {
                item.children = Some(sort_tree(children, sort_by, order));
            }
            item
        })
        .collect()
}
