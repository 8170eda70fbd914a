// src/output/types.rs
//! Type definitions for data file output.

use std::path::PathBuf;

/// A rendered data file, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFile {
    pub path: PathBuf,
    /// Comment header lines, without the leading `# `.
    pub header: Vec<String>,
    /// Serialized data following the header.
    pub body: String,
}

impl DataFile {
    /// The full file contents: header comments, then the body.
    pub fn contents(&self) -> String {
        let mut contents = String::new();
        for line in &self.header {
            contents.push_str("# ");
            contents.push_str(line);
            contents.push('\n');
        }
        contents.push_str(&self.body);
        contents
    }
}

/// What happened when a data file was delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { path: PathBuf, bytes: usize },
    /// The file on disk already held the same data.
    Unchanged { path: PathBuf },
}

impl WriteOutcome {
    pub fn path(&self) -> &PathBuf {
        match self {
            WriteOutcome::Written { path, .. } | WriteOutcome::Unchanged { path } => path,
        }
    }

    pub fn was_written(&self) -> bool {
        matches!(self, WriteOutcome::Written { .. })
    }
}
