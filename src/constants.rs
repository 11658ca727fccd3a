//! Store-wide constants.
//!
//! Centralises the default folder, mode, and file extension so a policy
//! change only requires touching this file.

/// Folder id registered out of the box.
pub const DEFAULT_FOLDER: &str = "$";

/// Base path the default folder points at.
pub const DEFAULT_FOLDER_PATH: &str = "./config";

/// Mode active until the caller switches it.
pub const DEFAULT_MODE: &str = "development";

/// Extension of configuration files.
pub const FILE_EXTENSION: &str = "toml";
