// src/output/mod.rs
//! Data file output, split into pure rendering and the write step.

mod paths;
mod types;
mod writer;

pub use paths::{capitalize, data_file_path, data_key, default_data_file, is_data_file};
pub use types::{DataFile, WriteOutcome};
pub use writer::{render_data_file, strip_header, write_data_file};
