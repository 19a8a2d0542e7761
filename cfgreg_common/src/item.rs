//! Declared configuration items and the container contract.

use std::collections::{BTreeMap, HashMap};

use crate::consts::DEFAULT_SECTION;
use crate::value::ConfigValue;

/// Registered items grouped by folded section, then folded item name.
pub type ItemCollection = BTreeMap<String, BTreeMap<String, ConfigItem>>;

/// Fold a section name for lookup: lowercase, empty → [`DEFAULT_SECTION`].
pub fn normalize_section(section: &str) -> String {
    if section.is_empty() {
        DEFAULT_SECTION.to_string()
    } else {
        section.to_lowercase()
    }
}

/// Fold an option name for lookup.
pub fn normalize_option(option: &str) -> String {
    option.to_lowercase()
}

/// A declared configuration slot.
///
/// Identity (`section`, `name`) is fixed at construction; the registry
/// indexes items by it, so there are no setters.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigItem {
    section: String,
    name: String,
    friendly_name: String,
    default_value: ConfigValue,
}

impl ConfigItem {
    pub fn new(
        section: impl Into<String>,
        name: impl Into<String>,
        friendly_name: impl Into<String>,
        default_value: impl Into<ConfigValue>,
    ) -> Self {
        Self {
            section: section.into(),
            name: name.into(),
            friendly_name: friendly_name.into(),
            default_value: default_value.into(),
        }
    }

    /// Section as declared (may be empty or mixed case).
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Name as declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label.
    pub fn friendly_name(&self) -> &str {
        &self.friendly_name
    }

    pub fn default_value(&self) -> &ConfigValue {
        &self.default_value
    }

    /// Section identity used by lookups.
    pub fn section_key(&self) -> String {
        normalize_section(&self.section)
    }

    /// Name identity used by lookups.
    pub fn name_key(&self) -> String {
        normalize_option(&self.name)
    }
}

/// Anything that declares a batch of items for registration.
///
/// Keys are the caller-chosen registration keys, not `(section, name)`.
pub trait ConfigItemContainer {
    fn configuration_items(&self) -> BTreeMap<String, ConfigItem>;
}

impl ConfigItemContainer for BTreeMap<String, ConfigItem> {
    fn configuration_items(&self) -> BTreeMap<String, ConfigItem> {
        self.clone()
    }
}

impl ConfigItemContainer for HashMap<String, ConfigItem> {
    fn configuration_items(&self) -> BTreeMap<String, ConfigItem> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}
