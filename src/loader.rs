//! Reading and cascading of configuration files.
//!
//! A (folder, file) pair maps to at most two TOML sources: the base file
//! directly under the folder's registered path, and a mode-specific file
//! under `<path>/<mode>/`. Both are parsed to their top-level table and
//! merged shallowly, mode values winning on key conflict.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::constants::FILE_EXTENSION;
use crate::value::{Table, Value};

/// Errors surfaced by the lazy loader.
///
/// Missing files are not errors; the store treats them as silent misses.
/// These cover files that exist but cannot be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Parse a single TOML file into an ordered table.
fn read_table(path: &Path) -> Result<Table, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    let parsed: toml::Table = toml::from_str(&raw).map_err(|e| ConfigError::ParseFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parsed
        .into_iter()
        .map(|(key, value)| (key, Value::from(value)))
        .collect())
}

/// Load and merge the cascade for `file` under `base`.
///
/// Candidates are visited in order (base first, then the mode subfolder)
/// and merged key by key at the top level only: a later value replaces the
/// earlier one wholesale, nested tables included. An empty result means no
/// candidate existed or every candidate was empty.
pub(crate) fn load_cascade(base: &Path, mode: &str, file: &str) -> Result<Table, ConfigError> {
    let filename = format!("{file}.{FILE_EXTENSION}");
    let candidates = [base.join(&filename), base.join(mode).join(&filename)];

    let mut merged = Table::new();
    for path in candidates {
        if !path.is_file() {
            continue;
        }
        debug!(path = %path.display(), "merging config file");
        for (key, value) in read_table(&path)? {
            merged.insert(key, value);
        }
    }
    Ok(merged)
}
