//! Prelude module for common re-exports.
//!
//! ```rust
//! use cfgreg_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::log::LogLevel;

// ─── Errors ─────────────────────────────────────────────────────────
pub use crate::error::{ConfigError, RegistrationError, RegistrationErrors};

// ─── Items & Values ─────────────────────────────────────────────────
pub use crate::consts::DEFAULT_SECTION;
pub use crate::item::{ConfigItem, ConfigItemContainer, ItemCollection};
pub use crate::value::{ConfigValue, FromConfigStr};

// ─── Registry & Providers ───────────────────────────────────────────
pub use crate::memory::MemoryConfigProvider;
pub use crate::provider::ConfigProvider;
pub use crate::registry::ConfigRegistry;
