// src/output/writer.rs
//! Rendering and writing data files.
//!
//! This module is the only place where data files are read or written.

use super::paths::capitalize;
use super::types::{DataFile, WriteOutcome};
use crate::constants::GENERATOR_LABEL;
use crate::error::AppError;
use crate::organize::Organized;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;

/// Renders a collection's organized data with its comment header.
pub fn render_data_file(
    path: PathBuf,
    collection: &str,
    data: &Organized,
    updated_at: DateTime<Utc>,
) -> Result<DataFile, AppError> {
    Ok(DataFile {
        path,
        header: vec![
            format!("{} data imported from Notion", capitalize(collection)),
            format!("Auto-generated by {}", GENERATOR_LABEL),
            format!("Last updated: {}", updated_at.format("%Y-%m-%d %H:%M:%S %z")),
        ],
        body: serde_yaml::to_string(data)?,
    })
}

/// The text after the leading block of `#` comment lines.
pub fn strip_header(contents: &str) -> &str {
    let mut rest = contents;
    while rest.starts_with('#') {
        rest = match rest.find('\n') {
            Some(end) => &rest[end + 1..],
            None => "",
        };
    }
    rest
}

/// Writes the file unless the existing one already holds the same body.
///
/// Only the header differs between two runs over unchanged data, so it is
/// left out of the comparison.
pub fn write_data_file(file: &DataFile) -> Result<WriteOutcome, AppError> {
    match fs::read_to_string(&file.path) {
        Ok(existing) if strip_header(&existing) == file.body => {
            log::debug!("{} is up to date", file.path.display());
            return Ok(WriteOutcome::Unchanged {
                path: file.path.clone(),
            });
        }
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    if let Some(parent) = file.path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = file.contents();
    fs::write(&file.path, &contents)?;
    log::debug!("Wrote {} bytes to {}", contents.len(), file.path.display());

    Ok(WriteOutcome::Written {
        path: file.path.clone(),
        bytes: contents.len(),
    })
}
