use crate::domain::{FerreError, FerreResult};
use std::fs;
use std::path::Path;

pub fn format_fixed_f64(value: f64, precision: usize) -> String {
    format!("{value:.precision$}", precision = precision)
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

/// Writes `content` in one call, replacing any existing file.
pub fn write_text_artifact(path: &Path, content: &str) -> FerreResult<()> {
    fs::write(path, normalize_text_artifact(content)).map_err(|source| FerreError::io(path, source))
}
