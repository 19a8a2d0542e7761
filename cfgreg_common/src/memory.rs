//! In-memory configuration provider.
//!
//! Same contract as the file-backed providers without any storage: values
//! live for the lifetime of the provider. Used as the reference provider and
//! as the registry's test double.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::item::{ConfigItem, ItemCollection, normalize_option, normalize_section};
use crate::provider::ConfigProvider;
use crate::value::{ConfigValue, FromConfigStr, convert};

/// Provider holding folded section → folded option → raw string in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigProvider {
    data: BTreeMap<String, BTreeMap<String, String>>,
}

impl MemoryConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-existing value, as if it had been stored before `initialize`.
    pub fn with_value(
        mut self,
        section: &str,
        option: &str,
        value: impl Into<ConfigValue>,
    ) -> Self {
        self.data
            .entry(normalize_section(section))
            .or_default()
            .insert(normalize_option(option), value.into().to_string());
        self
    }

    /// Raw stored text for `(section, option)`.
    pub fn get_raw(&self, section: &str, option: &str) -> Result<&str, ConfigError> {
        let section = normalize_section(section);
        let option = normalize_option(option);
        let options = self
            .data
            .get(&section)
            .ok_or_else(|| ConfigError::SectionNotFound {
                section: section.clone(),
            })?;
        options
            .get(&option)
            .map(String::as_str)
            .ok_or(ConfigError::OptionNotFound { section, option })
    }

    fn typed<T: FromConfigStr>(&self, item: &ConfigItem) -> Result<T, ConfigError> {
        let raw = self.get_raw(item.section(), item.name())?;
        convert(raw, &item.section_key(), &item.name_key())
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn initialize(&mut self, items: &ItemCollection) -> Result<(), ConfigError> {
        for (section, names) in items {
            let options = self.data.entry(section.clone()).or_default();
            for (name, item) in names {
                if !options.contains_key(name) {
                    debug!("Seeding [{section}] {name} with default");
                    options.insert(name.clone(), item.default_value().to_string());
                }
            }
        }
        Ok(())
    }

    fn set_value(&mut self, item: &ConfigItem, value: &ConfigValue) -> Result<(), ConfigError> {
        let section = item.section_key();
        let Some(options) = self.data.get_mut(&section) else {
            warn!("Rejected write to [{section}] {}: section not found", item.name());
            return Err(ConfigError::SectionNotFound { section });
        };
        options.insert(item.name_key(), value.to_string());
        Ok(())
    }

    fn get_string(&self, item: &ConfigItem) -> Result<String, ConfigError> {
        self.typed(item)
    }

    fn get_int(&self, item: &ConfigItem) -> Result<i64, ConfigError> {
        self.typed(item)
    }

    fn get_float64(&self, item: &ConfigItem) -> Result<f64, ConfigError> {
        self.typed(item)
    }

    fn get_bool(&self, item: &ConfigItem) -> Result<bool, ConfigError> {
        self.typed(item)
    }
}
