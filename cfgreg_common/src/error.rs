//! Error taxonomy for the registry and its providers.
//!
//! Setup misuse (`NoProvider`, `ProviderAlreadySet`) is reported through the
//! same enum as runtime lookups so callers decide what is fatal.

use std::fmt;
use thiserror::Error;

/// Boxed provider-specific failure (I/O, malformed storage, ...).
pub type BoxedProviderError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for registry and provider operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A typed get/set or `initialize` ran before a provider was installed.
    #[error("no configuration provider defined; install one with set_provider")]
    NoProvider,

    /// `set_provider` was called on a registry that already has one.
    #[error("configuration provider has already been set")]
    ProviderAlreadySet,

    /// No item is registered under the requested key.
    #[error("unable to find configuration item with key '{key}'")]
    KeyNotFound { key: String },

    /// One or more items of a batch could not be registered.
    #[error("{0}")]
    Registration(RegistrationErrors),

    /// The provider holds no section with this (folded) name.
    #[error("section '{section}' not found")]
    SectionNotFound { section: String },

    /// The section exists but has no such option.
    #[error("option '{option}' not found in section '{section}'")]
    OptionNotFound { section: String, option: String },

    /// The stored text is not a valid value of the requested type.
    #[error("could not parse {value_type} value '{value}' (section '{section}', option '{option}')")]
    CouldNotParse {
        value_type: &'static str,
        value: String,
        section: String,
        option: String,
    },

    /// Provider-specific failure.
    #[error("configuration provider failed: {0}")]
    Provider(#[source] BoxedProviderError),
}

impl ConfigError {
    /// Wrap a provider-specific error.
    pub fn provider(err: impl Into<BoxedProviderError>) -> Self {
        Self::Provider(err.into())
    }
}

/// A single rejected `(key, item)` pair from a registration batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The key is already taken by another item.
    #[error("configuration item with key '{key}' has already been added")]
    DuplicateKey { key: String },

    /// Another item already occupies this `(section, name)` slot.
    #[error("configuration item '{name}' in section '{section}' already exists (key '{key}')")]
    DuplicateItem {
        key: String,
        section: String,
        name: String,
    },
}

/// Every failure collected while registering one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationErrors(Vec<RegistrationError>);

impl RegistrationErrors {
    pub(crate) fn push(&mut self, err: RegistrationError) {
        self.0.push(err);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegistrationError> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<RegistrationError> {
        self.0
    }
}

impl fmt::Display for RegistrationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_errors_display_one_per_line() {
        let mut errs = RegistrationErrors::default();
        errs.push(RegistrationError::DuplicateKey { key: "a".into() });
        errs.push(RegistrationError::DuplicateItem {
            key: "b".into(),
            section: "net".into(),
            name: "port".into(),
        });

        let text = ConfigError::Registration(errs).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("'a'"));
        assert!(lines[1].contains("'port'") && lines[1].contains("'net'"));
    }

    #[test]
    fn provider_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = ConfigError::provider(io);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn parse_error_names_value_and_location() {
        let err = ConfigError::CouldNotParse {
            value_type: "int",
            value: "abc".into(),
            section: "net".into(),
            option: "port".into(),
        };
        let text = err.to_string();
        assert!(text.contains("int") && text.contains("'abc'"));
        assert!(text.contains("'net'") && text.contains("'port'"));
    }
}
