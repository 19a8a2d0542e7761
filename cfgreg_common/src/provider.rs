//! Provider contract consumed by the registry.
//!
//! A provider owns the actual values. The registry resolves a key to its
//! [`ConfigItem`] and hands the item over; providers identify values by the
//! item's folded `(section, name)`, never by the registration key.
//!
//! # Lifecycle
//!
//! 1. `initialize()` - Called once the caller has registered its items
//! 2. `get_*()` / `set_value()` - Any number of times afterwards
//!
//! Getters must not mutate stored state. `set_value` persists immediately;
//! there is no batching or flush step.

use crate::error::ConfigError;
use crate::item::{ConfigItem, ItemCollection};
use crate::value::ConfigValue;

/// Storage backend for registered configuration items.
///
/// Implementations: `MemoryConfigProvider` (this crate) and
/// `cfgreg_ini::IniConfigProvider`.
pub trait ConfigProvider {
    /// Short identifier used in log lines (e.g. `"ini"`, `"memory"`).
    fn name(&self) -> &'static str;

    /// Load stored values and seed every registered item that has none
    /// with its default.
    ///
    /// # Errors
    /// Provider-specific failures (unreadable or malformed storage).
    fn initialize(&mut self, items: &ItemCollection) -> Result<(), ConfigError>;

    /// Store `value` for `item`.
    ///
    /// # Errors
    /// `ConfigError::SectionNotFound` if the item's section is unknown.
    fn set_value(&mut self, item: &ConfigItem, value: &ConfigValue) -> Result<(), ConfigError>;

    fn get_string(&self, item: &ConfigItem) -> Result<String, ConfigError>;

    fn get_int(&self, item: &ConfigItem) -> Result<i64, ConfigError>;

    fn get_float64(&self, item: &ConfigItem) -> Result<f64, ConfigError>;

    fn get_bool(&self, item: &ConfigItem) -> Result<bool, ConfigError>;
}

impl<P: ConfigProvider + ?Sized> ConfigProvider for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn initialize(&mut self, items: &ItemCollection) -> Result<(), ConfigError> {
        (**self).initialize(items)
    }

    fn set_value(&mut self, item: &ConfigItem, value: &ConfigValue) -> Result<(), ConfigError> {
        (**self).set_value(item, value)
    }

    fn get_string(&self, item: &ConfigItem) -> Result<String, ConfigError> {
        (**self).get_string(item)
    }

    fn get_int(&self, item: &ConfigItem) -> Result<i64, ConfigError> {
        (**self).get_int(item)
    }

    fn get_float64(&self, item: &ConfigItem) -> Result<f64, ConfigError> {
        (**self).get_float64(item)
    }

    fn get_bool(&self, item: &ConfigItem) -> Result<bool, ConfigError> {
        (**self).get_bool(item)
    }
}
