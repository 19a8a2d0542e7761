//! Configuration Registry — key and `(section, name)` indexed item store.
//!
//! Built once by the process entry point and passed by reference to every
//! module that needs configuration. Value storage is delegated to a single
//! [`ConfigProvider`].

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, info};

use crate::error::{ConfigError, RegistrationError, RegistrationErrors};
use crate::item::{ConfigItem, ConfigItemContainer, ItemCollection};
use crate::provider::ConfigProvider;
use crate::value::ConfigValue;

/// Registry of declared configuration items.
///
/// Two indexes are kept:
/// - registration key → item (keys unique),
/// - folded section → folded name → item (`(section, name)` unique).
#[derive(Default)]
pub struct ConfigRegistry {
    items: BTreeMap<String, ConfigItem>,
    collection: ItemCollection,
    provider: Option<Box<dyn ConfigProvider>>,
}

impl fmt::Debug for ConfigRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigRegistry")
            .field("items", &self.items.len())
            .field("sections", &self.collection.len())
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .finish()
    }
}

impl ConfigRegistry {
    /// Empty registry without a provider. Call [`Self::set_provider`] before
    /// `initialize` or any typed get/set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty registry with its provider installed.
    pub fn with_provider(provider: impl ConfigProvider + 'static) -> Self {
        Self {
            provider: Some(Box::new(provider)),
            ..Self::default()
        }
    }

    /// Install the provider. Only one provider per registry.
    pub fn set_provider(
        &mut self,
        provider: impl ConfigProvider + 'static,
    ) -> Result<(), ConfigError> {
        if self.provider.is_some() {
            return Err(ConfigError::ProviderAlreadySet);
        }
        debug!("Configuration provider '{}' installed", provider.name());
        self.provider = Some(Box::new(provider));
        Ok(())
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Register every item the container declares.
    ///
    /// All pairs are attempted. A pair whose key or `(section, name)` is
    /// already taken is skipped and reported; the rest stay registered.
    ///
    /// # Errors
    /// `ConfigError::Registration` listing every rejected pair.
    pub fn register_items<C>(&mut self, container: &C) -> Result<(), ConfigError>
    where
        C: ConfigItemContainer + ?Sized,
    {
        let mut errors = RegistrationErrors::default();

        for (key, item) in container.configuration_items() {
            self.register_item(key, item, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Registration(errors))
        }
    }

    fn register_item(&mut self, key: String, item: ConfigItem, errors: &mut RegistrationErrors) {
        let section = item.section_key();
        let name = item.name_key();

        // Both checks run so one batch reports every collision.
        let key_taken = self.items.contains_key(&key);
        if key_taken {
            errors.push(RegistrationError::DuplicateKey { key: key.clone() });
        }
        let slot_taken = self
            .collection
            .get(&section)
            .is_some_and(|names| names.contains_key(&name));
        if slot_taken {
            errors.push(RegistrationError::DuplicateItem {
                key: key.clone(),
                section: section.clone(),
                name: name.clone(),
            });
        }
        if key_taken || slot_taken {
            return;
        }

        debug!("Registered configuration item '{key}' as [{section}] {name}");
        self.collection
            .entry(section)
            .or_default()
            .insert(name, item.clone());
        self.items.insert(key, item);
    }

    /// Let the provider load its storage and seed defaults for every
    /// registered item.
    pub fn initialize(&mut self) -> Result<(), ConfigError> {
        let provider = self.provider.as_mut().ok_or(ConfigError::NoProvider)?;
        info!(
            "Initializing '{}' provider with {} items in {} sections",
            provider.name(),
            self.items.len(),
            self.collection.len()
        );
        provider.initialize(&self.collection)
    }

    pub fn set_value(
        &mut self,
        key: &str,
        value: impl Into<ConfigValue>,
    ) -> Result<(), ConfigError> {
        let provider = self.provider.as_mut().ok_or(ConfigError::NoProvider)?;
        let item = self.items.get(key).ok_or_else(|| ConfigError::KeyNotFound {
            key: key.to_string(),
        })?;
        provider.set_value(item, &value.into())
    }

    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        let (provider, item) = self.resolve(key)?;
        provider.get_string(item)
    }

    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        let (provider, item) = self.resolve(key)?;
        provider.get_int(item)
    }

    pub fn get_float64(&self, key: &str) -> Result<f64, ConfigError> {
        let (provider, item) = self.resolve(key)?;
        provider.get_float64(item)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        let (provider, item) = self.resolve(key)?;
        provider.get_bool(item)
    }

    fn resolve(&self, key: &str) -> Result<(&dyn ConfigProvider, &ConfigItem), ConfigError> {
        let provider = self.provider.as_deref().ok_or(ConfigError::NoProvider)?;
        let item = self.item(key).ok_or_else(|| ConfigError::KeyNotFound {
            key: key.to_string(),
        })?;
        Ok((provider, item))
    }

    /// Look up an item by registration key.
    pub fn item(&self, key: &str) -> Option<&ConfigItem> {
        self.items.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Registered items grouped by section, as handed to the provider.
    pub fn collection(&self) -> &ItemCollection {
        &self.collection
    }

    /// Registration keys with their items, in key order.
    pub fn items(&self) -> impl Iterator<Item = (&str, &ConfigItem)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
