//! In-memory INI document.
//!
//! Folded section → folded option → raw value. Every name used as a map key
//! is lowercase; the empty section name maps to [`DEFAULT_SECTION`].

use std::collections::BTreeMap;
use std::io::{self, Write};

use cfgreg_common::ConfigError;
use cfgreg_common::consts::DEFAULT_SECTION;
use cfgreg_common::item::{normalize_option, normalize_section};
use serde::Serialize;

/// Folded option → raw value within one section.
pub type Options = BTreeMap<String, String>;

/// Parsed (or programmatically built) INI content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IniDocument {
    data: BTreeMap<String, Options>,
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `section` if absent. Returns `true` if it was created.
    pub fn add_section(&mut self, section: &str) -> bool {
        let section = normalize_section(section);
        if self.data.contains_key(&section) {
            return false;
        }
        self.data.insert(section, Options::new());
        true
    }

    /// Insert or overwrite an option, creating its section first.
    ///
    /// Returns `true` if the option was inserted, `false` if overwritten.
    pub fn add_option(
        &mut self,
        section: &str,
        option: &str,
        value: impl Into<String>,
    ) -> bool {
        self.data
            .entry(normalize_section(section))
            .or_default()
            .insert(normalize_option(option), value.into())
            .is_none()
    }

    /// Overwrite an option only if its section already exists.
    ///
    /// # Errors
    /// `ConfigError::SectionNotFound` with the folded section name.
    pub fn set_in_existing(
        &mut self,
        section: &str,
        option: &str,
        value: impl Into<String>,
    ) -> Result<(), ConfigError> {
        let section = normalize_section(section);
        let options = self
            .data
            .get_mut(&section)
            .ok_or(ConfigError::SectionNotFound { section })?;
        options.insert(normalize_option(option), value.into());
        Ok(())
    }

    /// Raw (unparsed) value for `(section, option)`.
    pub fn get_raw(&self, section: &str, option: &str) -> Result<&str, ConfigError> {
        let section = normalize_section(section);
        let option = normalize_option(option);
        let Some(options) = self.data.get(&section) else {
            return Err(ConfigError::SectionNotFound { section });
        };
        options
            .get(&option)
            .map(String::as_str)
            .ok_or(ConfigError::OptionNotFound { section, option })
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.data.contains_key(&normalize_section(section))
    }

    pub fn has_option(&self, section: &str, option: &str) -> bool {
        self.data
            .get(&normalize_section(section))
            .is_some_and(|options| options.contains_key(&normalize_option(option)))
    }

    /// Sections in sorted order with their options.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Options)> {
        self.data.iter().map(|(name, options)| (name.as_str(), options))
    }

    /// Options of one section, if present.
    pub fn options(&self, section: &str) -> Option<&Options> {
        self.data.get(&normalize_section(section))
    }

    pub fn section_count(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Serialise as INI text.
    ///
    /// One `[section]` header, one raw `option=value` line per option, then
    /// a blank line. An empty default section is omitted. Values are not
    /// re-escaped; multi-line values are written as-is.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        for (section, options) in &self.data {
            if section == DEFAULT_SECTION && options.is_empty() {
                continue;
            }
            writeln!(out, "[{section}]")?;
            for (option, value) in options {
                writeln!(out, "{option}={value}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn to_ini_string(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}
