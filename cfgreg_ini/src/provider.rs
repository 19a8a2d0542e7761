//! File-backed INI configuration provider.
//!
//! The in-memory [`IniDocument`] mirrors the backing file after every
//! write: `initialize` creates the file if missing and seeds defaults,
//! `set_value` rewrites the whole file immediately. Each operation opens and
//! closes the file within the call.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use cfgreg_common::ConfigError;
use cfgreg_common::consts::DEFAULT_FILE_MODE;
use cfgreg_common::item::{ConfigItem, ItemCollection};
use cfgreg_common::provider::ConfigProvider;
use cfgreg_common::value::{ConfigValue, FromConfigStr, convert};
use tracing::{debug, info, warn};

use crate::document::IniDocument;
use crate::error::IniError;
use crate::parser;

/// Provider persisting values to an INI file.
#[derive(Debug, Clone)]
pub struct IniConfigProvider {
    path: PathBuf,
    document: IniDocument,
}

impl IniConfigProvider {
    /// Provider for `path`. Nothing is read until `initialize`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: IniDocument::new(),
        }
    }

    /// Read an existing file without creating it or seeding anything.
    ///
    /// # Errors
    /// `IniError::Io` if the file cannot be opened, parse errors otherwise.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, IniError> {
        let path = path.into();
        let file = File::open(&path).map_err(|source| IniError::Io {
            path: path.clone(),
            source,
        })?;
        let document = parser::parse(BufReader::new(file))?;
        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current in-memory state.
    pub fn document(&self) -> &IniDocument {
        &self.document
    }

    /// Create `section` in memory if absent. Not persisted until the next write.
    pub fn add_section(&mut self, section: &str) -> bool {
        self.document.add_section(section)
    }

    /// Upsert an option in memory. Not persisted until the next write.
    pub fn add_option(
        &mut self,
        section: &str,
        option: &str,
        value: impl Into<String>,
    ) -> bool {
        self.document.add_option(section, option, value)
    }

    /// Open for reading only, creating an empty file if absent.
    ///
    /// An existing file needs no write permission here; writes reopen it.
    fn open_or_create(&self) -> Result<File, IniError> {
        match File::open(&self.path) {
            Ok(file) => Ok(file),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let mut options = OpenOptions::new();
                options.write(true).create(true).truncate(false);
                #[cfg(unix)]
                {
                    use std::os::unix::fs::OpenOptionsExt;
                    options.mode(DEFAULT_FILE_MODE);
                }
                options
                    .open(&self.path)
                    .map_err(|source| self.io_error(source))?;
                debug!("Created empty configuration file {}", self.path.display());
                File::open(&self.path).map_err(|source| self.io_error(source))
            }
            Err(source) => Err(self.io_error(source)),
        }
    }

    /// Truncate the backing file and write the whole document.
    pub fn write(&self) -> Result<(), IniError> {
        self.write_document(&self.document)
    }

    fn write_document(&self, document: &IniDocument) -> Result<(), IniError> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(DEFAULT_FILE_MODE);
        }
        let mut file = options
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        file.write_all(document.to_ini_string().as_bytes())
            .map_err(|source| self.io_error(source))?;
        debug!("Wrote configuration to {}", self.path.display());
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> IniError {
        IniError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn typed<T: FromConfigStr>(&self, item: &ConfigItem) -> Result<T, ConfigError> {
        let raw = self.document.get_raw(item.section(), item.name())?;
        convert(raw, &item.section_key(), &item.name_key())
    }
}

impl ConfigProvider for IniConfigProvider {
    fn name(&self) -> &'static str {
        "ini"
    }

    fn initialize(&mut self, items: &ItemCollection) -> Result<(), ConfigError> {
        let file = self.open_or_create()?;
        let mut document = parser::parse(BufReader::new(file))?;

        let mut seeded = 0usize;
        for (section, names) in items {
            document.add_section(section);
            for (name, item) in names {
                if !document.has_option(section, name) {
                    document.add_option(section, name, item.default_value().to_string());
                    seeded += 1;
                }
            }
        }

        if seeded > 0 {
            info!(
                "Seeded {seeded} default values into {}",
                self.path.display()
            );
            self.write_document(&document)?;
        }
        self.document = document;
        Ok(())
    }

    fn set_value(&mut self, item: &ConfigItem, value: &ConfigValue) -> Result<(), ConfigError> {
        // Stage on a copy; memory only changes once the file has been written.
        let mut staged = self.document.clone();
        if let Err(err) = staged.set_in_existing(item.section(), item.name(), value.to_string()) {
            warn!(
                "Rejected write of '{}' in {}: {err}",
                item.name(),
                self.path.display()
            );
            return Err(err);
        }
        self.write_document(&staged)?;
        self.document = staged;
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn collection(items: &[ConfigItem]) -> ItemCollection {
        let mut out = ItemCollection::new();
        for item in items {
            out.entry(item.section_key())
                .or_default()
                .insert(item.name_key(), item.clone());
        }
        out
    }

    #[test]
    fn initialize_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.ini");
        let item = ConfigItem::new("", "timeout", "Timeout", 60);

        let mut provider = IniConfigProvider::new(&path);
        provider.initialize(&collection(&[item.clone()])).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[default]\ntimeout=60\n\n"
        );
        assert_eq!(provider.get_int(&item).unwrap(), 60);
    }

    #[cfg(unix)]
    #[test]
    fn created_file_is_readable_and_writable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("perm.ini");
        IniConfigProvider::new(&path)
            .initialize(&ItemCollection::new())
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o600, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn read_only_seeded_file_initializes() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ro.ini");
        std::fs::write(&path, "[default]\ntimeout=30\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o444)).unwrap();

        // Nothing to seed, so the file is only ever opened for reading.
        let item = ConfigItem::new("", "timeout", "Timeout", 60);
        let mut provider = IniConfigProvider::new(&path);
        provider.initialize(&collection(&[item.clone()])).unwrap();

        assert_eq!(provider.get_int(&item).unwrap(), 30);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[default]\ntimeout=30\n"
        );
    }

    #[test]
    fn failed_write_leaves_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.ini");
        let item = ConfigItem::new("net", "port", "Port", 80);

        let mut provider = IniConfigProvider::new(&path);
        provider.initialize(&collection(&[item.clone()])).unwrap();

        // A directory in place of the file makes every write fail.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let err = provider.set_value(&item, &ConfigValue::from(8080)).unwrap_err();
        assert!(matches!(err, ConfigError::Provider(_)));
        assert_eq!(provider.get_int(&item).unwrap(), 80);
    }

    #[test]
    fn failed_reinitialize_leaves_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seed.ini");
        std::fs::write(&path, "[net]\nport=81\n").unwrap();
        let port = ConfigItem::new("net", "port", "Port", 80);
        let host = ConfigItem::new("net", "host", "Host", "localhost");

        let mut provider = IniConfigProvider::new(&path);
        provider.initialize(&collection(&[port.clone()])).unwrap();

        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(provider
            .initialize(&collection(&[port.clone(), host.clone()]))
            .is_err());
        assert_eq!(provider.get_int(&port).unwrap(), 81);
        assert!(matches!(
            provider.get_string(&host),
            Err(ConfigError::OptionNotFound { .. })
        ));
    }

    #[test]
    fn initialize_without_items_leaves_empty_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.ini");

        IniConfigProvider::new(&path)
            .initialize(&ItemCollection::new())
            .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn set_value_rewrites_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("set.ini");
        let item = ConfigItem::new("Net", "Port", "Port", 80);

        let mut provider = IniConfigProvider::new(&path);
        provider.initialize(&collection(&[item.clone()])).unwrap();
        provider.set_value(&item, &ConfigValue::from(8080)).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[net]\nport=8080\n\n"
        );
    }

    #[test]
    fn set_value_unknown_section_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("unknown.ini");
        let mut provider = IniConfigProvider::new(&path);
        provider.initialize(&ItemCollection::new()).unwrap();

        let ghost = ConfigItem::new("ghost", "x", "X", 1);
        assert!(matches!(
            provider.set_value(&ghost, &ConfigValue::from(2)),
            Err(ConfigError::SectionNotFound { .. })
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn malformed_file_fails_initialize() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.ini");
        std::fs::write(&path, "orphan=1\n").unwrap();

        let err = IniConfigProvider::new(&path)
            .initialize(&ItemCollection::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Provider(_)));
        assert!(err.to_string().contains("empty section name"));
    }

    #[test]
    fn load_requires_existing_file() {
        let dir = TempDir::new().unwrap();
        let err = IniConfigProvider::load(dir.path().join("missing.ini")).unwrap_err();
        assert!(matches!(err, IniError::Io { .. }));
    }

    #[test]
    fn add_helpers_only_touch_memory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mem.ini");
        let mut provider = IniConfigProvider::new(&path);

        assert!(provider.add_section("extra"));
        assert!(provider.add_option("extra", "k", "v"));
        assert!(!provider.add_option("EXTRA", "K", "w"));
        assert!(!path.exists());

        provider.write().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[extra]\nk=w\n\n");
    }
}
