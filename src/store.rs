//! The configuration store: folder registry, item tree, and lazy resolution.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;

use crate::constants::{DEFAULT_FOLDER, DEFAULT_FOLDER_PATH, DEFAULT_MODE};
use crate::loader::{self, ConfigError};
use crate::value::{Table, Value};

/// Hierarchical configuration store.
///
/// Keys use dot notation: the first segment names a registered folder, the
/// second a file within it, and the rest index into that file's contents.
/// Files are read on first access and cached for the store's lifetime; the
/// active mode selects an environment subfolder whose files override the
/// base files key by key.
///
/// The store is a plain owned value with no hidden globals. Construct one
/// at startup and pass it to whoever needs configuration; callers that
/// share it across threads wrap it in their own lock.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    /// Folder id → base directory.
    registry: HashMap<String, PathBuf>,
    /// Loaded and explicitly-set values.
    items: Table,
    /// Environment subfolder preferred when cascading.
    mode: String,
}

impl ConfigStore {
    /// Create a store with the default folder (`$` → `./config`) registered
    /// and the mode set to `development`.
    pub fn new() -> Self {
        let mut store = Self {
            registry: HashMap::new(),
            items: Table::new(),
            mode: DEFAULT_MODE.to_string(),
        };
        store.register(DEFAULT_FOLDER, DEFAULT_FOLDER_PATH);
        store
    }

    /// Register a folder id, overwriting any previous registration.
    ///
    /// Trailing slashes are stripped. The path is not checked for
    /// existence; a folder pointing nowhere simply never resolves.
    pub fn register(&mut self, name: &str, path: &str) {
        let trimmed = path.trim_end_matches('/');
        self.registry.insert(name.to_string(), PathBuf::from(trimmed));
    }

    /// Switch the active mode used for cascading lookups.
    ///
    /// Only affects files loaded after the switch; already-loaded pairs
    /// keep the values they were resolved with.
    pub fn mode(&mut self, name: impl Into<String>) {
        self.mode = name.into();
    }

    /// Assign a value at `key`, creating intermediate tables as needed.
    ///
    /// Overwrites whatever was there, value or subtree. A non-table value
    /// in the middle of the path is replaced by a table. Values set this
    /// way shadow file-sourced values for the same key, since the loader
    /// never revisits a resolved (folder, file) pair.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let segments: Vec<&str> = key.split('.').collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut node = &mut self.items;
        for segment in parents {
            node = ensure_table(node, segment);
        }
        node.insert((*last).to_string(), value.into());
    }

    /// Fetch the value at `key`, loading its backing file on first miss.
    ///
    /// Keys with fewer than three segments never touch the filesystem.
    /// Unregistered folders, absent files, and empty merges are silent
    /// misses; unreadable or malformed files are errors.
    pub fn get(&mut self, key: &str) -> Result<Option<&Value>, ConfigError> {
        let segments: Vec<&str> = key.split('.').collect();
        if lookup(&self.items, &segments).is_none() && segments.len() >= 3 {
            self.load(&segments)?;
        }
        Ok(lookup(&self.items, &segments))
    }

    /// [`get`](Self::get) with a fallback, cloning the stored value.
    pub fn get_or(&mut self, key: &str, default: impl Into<Value>) -> Result<Value, ConfigError> {
        Ok(self.get(key)?.cloned().unwrap_or_else(|| default.into()))
    }

    /// Whether `key` resolves to a value, lazy-loading like [`get`](Self::get).
    pub fn has(&mut self, key: &str) -> Result<bool, ConfigError> {
        Ok(self.get(key)?.is_some())
    }

    /// Load the (folder, file) pair behind `segments` into the item tree.
    ///
    /// Returns `Ok(false)` on any silent miss: pair already resolved,
    /// folder unregistered, or nothing to merge.
    fn load(&mut self, segments: &[&str]) -> Result<bool, ConfigError> {
        let (folder, file) = (segments[0], segments[1]);

        // A resolved pair is never reloaded; this also keeps explicit `set`
        // values from being clobbered by a sibling-key lookup.
        if lookup(&self.items, &segments[..2]).is_some() {
            return Ok(false);
        }
        let Some(base) = self.registry.get(folder) else {
            debug!(folder, "folder not registered, skipping load");
            return Ok(false);
        };

        let merged = loader::load_cascade(base, &self.mode, file)?;
        if merged.is_empty() {
            return Ok(false);
        }

        ensure_table(&mut self.items, folder).insert(file.to_string(), Value::Table(merged));
        Ok(true)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Pure traversal of the item tree.
///
/// Returns `None` as soon as a segment is absent or the current node is
/// not a table.
fn lookup<'a>(root: &'a Table, segments: &[&str]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    let mut node = root.get(*first)?;
    for segment in rest {
        node = node.as_table()?.get(*segment)?;
    }
    Some(node)
}

/// Get-or-create the table entry at `key`, replacing any non-table value.
fn ensure_table<'a>(node: &'a mut Table, key: &str) -> &'a mut Table {
    let entry = node
        .entry(key.to_string())
        .or_insert_with(|| Value::Table(Table::new()));
    if !entry.is_table() {
        *entry = Value::Table(Table::new());
    }
    match entry {
        Value::Table(table) => table,
        _ => unreachable!("entry was just made a table"),
    }
}
