//! The `nested` organizer: items linked into a forest through a parent field.

use crate::model::Item;
use std::collections::HashMap;

/// Links items under their parents and returns the roots, in input order.
///
/// Items are held in an arena and linked by index: every id is registered
/// before any link is made, so a parent listed after its child is still
/// found. An item whose parent is unknown, or whose link would close a
/// cycle, becomes a root.
pub fn build_forest(items: Vec<Item>, parent_field: &str) -> Vec<Item> {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        if let Some(id) = item.id() {
            index.entry(id.to_string()).or_insert(position);
        }
    }

    let mut parents: Vec<Option<usize>> = vec![None; items.len()];
    for (position, item) in items.iter().enumerate() {
        let parent = item
            .get(parent_field)
            .and_then(|value| value.first_or_self().to_key())
            .and_then(|parent_id| index.get(&parent_id).copied());

        match parent {
            Some(parent) if !reaches(&parents, parent, position) => {
                parents[position] = Some(parent);
            }
            Some(_) => log::warn!(
                "Item {} would be its own ancestor, keeping it at the top level",
                item.id().unwrap_or_default()
            ),
            None => {}
        }
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); items.len()];
    let mut roots = Vec::new();
    for (position, parent) in parents.iter().enumerate() {
        match parent {
            Some(parent) => children[*parent].push(position),
            None => roots.push(position),
        }
    }

    let mut arena: Vec<Option<Item>> = items.into_iter().map(Some).collect();
    roots
        .into_iter()
        .filter_map(|root| assemble(root, &mut arena, &children))
        .collect()
}

/// True when walking up from `start` arrives at `target`.
fn reaches(parents: &[Option<usize>], start: usize, target: usize) -> bool {
    let mut current = Some(start);
    while let Some(node) = current {
        if node == target {
            return true;
        }
        current = parents[node];
    }
    false
}

fn assemble(node: usize, arena: &mut [Option<Item>], children: &[Vec<usize>]) -> Option<Item> {
    let mut item = arena[node].take()?;
    let kids = children[node]
        .iter()
        .filter_map(|&child| assemble(child, arena, children))
        .collect();
    item.children = Some(kids);
    Some(item)
}
