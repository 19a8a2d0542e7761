//! cfgreg Common Library
//!
//! Process-local configuration registry. Modules declare [`item::ConfigItem`]s
//! under caller-chosen keys, the [`registry::ConfigRegistry`] indexes them by
//! key and by `(section, name)`, and a pluggable [`provider::ConfigProvider`]
//! stores the actual values.
//!
//! # Module Structure
//!
//! - [`consts`] - Default section name, bool spellings, file mode
//! - [`error`] - Error taxonomy shared by the registry and providers
//! - [`item`] - Declared configuration items and the container contract
//! - [`value`] - `ConfigValue` and typed string conversions
//! - [`provider`] - The provider trait
//! - [`registry`] - The registry itself
//! - [`memory`] - In-memory reference provider
//! - [`log`] - Log level type for tooling
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use cfgreg_common::prelude::*;
//! use std::collections::BTreeMap;
//!
//! let mut registry = ConfigRegistry::with_provider(MemoryConfigProvider::new());
//!
//! let mut items = BTreeMap::new();
//! items.insert(
//!     "net.port".to_string(),
//!     ConfigItem::new("network", "port", "Listen port", 8080),
//! );
//! registry.register_items(&items).unwrap();
//! registry.initialize().unwrap();
//!
//! assert_eq!(registry.get_int("net.port").unwrap(), 8080);
//! ```

pub mod consts;
pub mod error;
pub mod item;
pub mod log;
pub mod memory;
pub mod prelude;
pub mod provider;
pub mod registry;
pub mod value;

pub use error::{ConfigError, RegistrationError, RegistrationErrors};
