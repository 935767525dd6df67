pub mod models;

use std::fs;
use std::ops::Index;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::config::models::{
    ApiKeyConfigItem, BaseUrlConfigItem, ConfigItem, FileLoggingConfigItem, PageSizeConfigItem,
    TimeoutConfigItem,
};
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterDerive, EnumString, Display, AsRefStr)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigKey {
    ApiBaseUrl,
    ApiKey,
    RequestTimeoutSecs,
    VenuesPageSize,
    FileLoggingEnabled,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub api_base_url: BaseUrlConfigItem,
    #[serde(default)]
    pub api_key: ApiKeyConfigItem,
    #[serde(default)]
    pub request_timeout_secs: TimeoutConfigItem,
    #[serde(default)]
    pub venues_page_size: PageSizeConfigItem,
    #[serde(default)]
    pub file_logging_enabled: FileLoggingConfigItem,
}

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigFile,
    pub last_change: Option<(String, String, String)>,
}

#[derive(Debug, Clone)]
pub struct ConfigRows(Vec<(String, String, String)>);

impl ConfigRows {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &(String, String, String)> {
        self.0.iter()
    }
}
impl Index<usize> for ConfigRows {
    type Output = (String, String, String);
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Show only the tail of a secret.
fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

impl Config {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::Parse(format!(
                "Configuration file '{}' not found. Run 'holidaze init' to create one.",
                path.display()
            )));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::Parse(format!("Failed to read {}: {}", path.display(), e)))?;
        let data: ConfigFile = serde_json::from_str(&text)
            .map_err(|e| Error::Parse(format!("Invalid JSON in '{}': {}", path.display(), e)))?;
        Ok(Self {
            path,
            data,
            last_change: None,
        })
    }

    /// Write a config file with default values; never overwrites.
    pub fn write_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if path.exists() {
            return Err(Error::config(format!(
                "Configuration file '{}' already exists.",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let cfg = Self {
            path,
            data: ConfigFile::default(),
            last_change: None,
        };
        cfg.save()?;
        Ok(cfg)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn api_base_url(&self) -> &str {
        self.data.api_base_url.get_value()
    }
    pub fn api_key(&self) -> Option<&str> {
        self.data.api_key.get_value().as_deref()
    }
    pub fn request_timeout_secs(&self) -> u64 {
        *self.data.request_timeout_secs.get_value()
    }
    pub fn venues_page_size(&self) -> u32 {
        *self.data.venues_page_size.get_value()
    }
    pub fn file_logging_enabled(&self) -> bool {
        self.data.file_logging_enabled.get_value().0
    }

    fn display_value(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::ApiBaseUrl => self.api_base_url().to_string(),
            ConfigKey::ApiKey => self
                .api_key()
                .map(mask_secret)
                .unwrap_or_else(|| "-".to_string()),
            ConfigKey::RequestTimeoutSecs => self.request_timeout_secs().to_string(),
            ConfigKey::VenuesPageSize => self.venues_page_size().to_string(),
            ConfigKey::FileLoggingEnabled => {
                self.data.file_logging_enabled.get_value().to_string()
            }
        }
    }

    fn description_of(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::ApiBaseUrl => self.data.api_base_url.description(),
            ConfigKey::ApiKey => self.data.api_key.description(),
            ConfigKey::RequestTimeoutSecs => self.data.request_timeout_secs.description(),
            ConfigKey::VenuesPageSize => self.data.venues_page_size.description(),
            ConfigKey::FileLoggingEnabled => self.data.file_logging_enabled.description(),
        }
    }

    pub fn rows(&self) -> ConfigRows {
        let rows = ConfigKey::iter()
            .map(|key| {
                (
                    key.to_string(),
                    self.description_of(key).to_string(),
                    self.display_value(key),
                )
            })
            .collect();
        ConfigRows(rows)
    }

    pub fn set_key(&mut self, key: ConfigKey, new_value: &str) -> Result<()> {
        let old = self.display_value(key);
        self.edit(|cfg| Self::apply(cfg, key, new_value))?;
        // stash for caller to log.
        self.last_change = Some((key.to_string(), old, self.display_value(key)));
        Ok(())
    }

    pub fn take_last_change(&mut self) -> Option<(String, String, String)> {
        self.last_change.take()
    }

    pub fn set(&mut self, key_str: &str, new_value: &str) -> Result<()> {
        let key = Self::parse_key(key_str)?;
        self.set_key(key, new_value)
    }

    fn parse_key(key_str: &str) -> Result<ConfigKey> {
        ConfigKey::from_str(key_str.trim()).map_err(|_| {
            Error::Parse(format!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key_str,
                valid_csv::<ConfigKey>()
            ))
        })
    }

    fn apply(cfg: &mut ConfigFile, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::ApiBaseUrl => cfg.api_base_url.set_value(value),
            ConfigKey::ApiKey => cfg.api_key.set_value(value),
            ConfigKey::RequestTimeoutSecs => cfg.request_timeout_secs.set_value(value),
            ConfigKey::VenuesPageSize => cfg.venues_page_size.set_value(value),
            ConfigKey::FileLoggingEnabled => cfg.file_logging_enabled.set_value(value),
        }
    }

    /// Apply on a copy, persist, then commit; a failed set leaves memory and disk unchanged.
    fn edit<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ConfigFile) -> Result<()>,
    {
        let mut draft = self.data.clone();
        f(&mut draft)?;
        Self::write(&self.path, &draft)?;
        self.data = draft;
        Ok(())
    }

    fn save(&self) -> Result<()> {
        Self::write(&self.path, &self.data)
    }

    fn write(path: &Path, data: &ConfigFile) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| Error::Parse(format!("Failed to encode config: {}", e)))?;
        fs::write(path, json)
            .map_err(|e| Error::Parse(format!("Failed to write {}: {}", path.display(), e)))
    }
}
