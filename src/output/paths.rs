// src/output/paths.rs
//! Pure functions for data file naming and placement.

use std::path::{Path, PathBuf};

/// Extensions accepted for data files.
pub const DATA_FILE_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Where a collection's data file lives inside the site.
pub fn data_file_path(site_dir: &Path, data_dir: &str, data_file: &str) -> PathBuf {
    site_dir.join(data_dir).join(data_file)
}

/// Default data file name for a collection.
pub fn default_data_file(collection: &str) -> String {
    format!("{}.yml", collection)
}

/// The key a data file is exposed under: its file stem.
pub fn data_key(data_file: &str) -> String {
    Path::new(data_file)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| data_file.to_string())
}

pub fn is_data_file(data_file: &str) -> bool {
    Path::new(data_file)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DATA_FILE_EXTENSIONS.contains(&ext))
}

/// Uppercases the first character, leaving the rest alone.
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_key_is_stem() {
        assert_eq!(data_key("posts.yml"), "posts");
        assert_eq!(data_key("team.members.yaml"), "team.members");
        assert_eq!(data_key("plain"), "plain");
    }

    #[test]
    fn test_data_file_extensions() {
        assert!(is_data_file("skills.yml"));
        assert!(is_data_file("skills.yaml"));
        assert!(!is_data_file("skills.json"));
        assert!(!is_data_file("skills"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("skills"), "Skills");
        assert_eq!(capitalize("écoles"), "Écoles");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_data_file_path() {
        assert_eq!(
            data_file_path(Path::new("/site"), "_data", "posts.yml"),
            PathBuf::from("/site/_data/posts.yml")
        );
    }
}
