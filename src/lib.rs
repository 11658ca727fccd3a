//! cascata — hierarchical configuration store.
//!
//! Maps namespaced dot-notation keys to values sourced from cascading TOML
//! files. Folders register a name against a directory; an active mode
//! selects an environment subfolder whose files override the base files.
//! Files are loaded lazily on first access and cached for the lifetime of
//! the store.
//!
//! ```no_run
//! use cascata::ConfigStore;
//!
//! let mut config = ConfigStore::new();
//! config.register("app", "./config/app");
//! config.mode("production");
//!
//! // Reads ./config/app/server.toml and ./config/app/production/server.toml
//! // on first access, production values winning key by key.
//! if let Some(port) = config.get("app.server.port")? {
//!     println!("listening on {port:?}");
//! }
//!
//! // Explicit overrides bypass the loader entirely.
//! config.set("app.server.port", 8080);
//! # Ok::<(), cascata::ConfigError>(())
//! ```

pub mod constants;
pub mod loader;
pub mod store;
pub mod value;

pub use loader::ConfigError;
pub use store::ConfigStore;
pub use value::{Table, Value};
