//! Turning Notion property values into plain field values.
//!
//! [`extract`] handles one property; [`project`] applies a whole list of
//! [`PropertySpec`]s to a page and builds the output [`Item`](crate::model::Item).

mod extractors;
mod projection;
mod types;

pub use extractors::{extract, extract_value, level_for, split_formula_list};
pub use projection::project;
pub use types::{PropertyKind, PropertySpec};

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Derives an output key from a property name: lowercased, with each run
/// of whitespace replaced by a single underscore.
pub fn normalize_key(name: &str) -> String {
    WHITESPACE.replace_all(&name.to_lowercase(), "_").into_owned()
}
