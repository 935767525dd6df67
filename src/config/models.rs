use crate::core::types::{Bool, parse_number};
use crate::errors::Error;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "https://v2.api.noroff.dev";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const MAX_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

pub trait ConfigItem<T> {
    fn get_value(&self) -> &T;
    fn set_value(&mut self, new_value: &str) -> Result<(), Error>;
    fn description(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseUrlConfigItem {
    pub value: String,
    pub description: String,
}

impl Default for BaseUrlConfigItem {
    fn default() -> Self {
        Self {
            value: DEFAULT_API_BASE_URL.into(),
            description: "Base URL of the Holidaze API.".into(),
        }
    }
}

impl ConfigItem<String> for BaseUrlConfigItem {
    fn get_value(&self) -> &String {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let trimmed = new_value.trim().trim_end_matches('/');
        if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
            return Err(Error::Parse(format!(
                "Invalid API base URL: '{}'. Expected http:// or https://.",
                new_value.trim()
            )));
        }
        self.value = trimmed.to_string();
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyConfigItem {
    pub value: Option<String>,
    pub description: String,
}

impl Default for ApiKeyConfigItem {
    fn default() -> Self {
        Self {
            value: None,
            description: "API key sent as X-Noroff-API-Key.".into(),
        }
    }
}

impl ConfigItem<Option<String>> for ApiKeyConfigItem {
    fn get_value(&self) -> &Option<String> {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let trimmed = new_value.trim();
        self.value = if trimmed.is_empty() || trimmed == "-" {
            None
        } else {
            Some(trimmed.to_string())
        };
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfigItem {
    pub value: u64,
    pub description: String,
}

impl Default for TimeoutConfigItem {
    fn default() -> Self {
        Self {
            value: DEFAULT_TIMEOUT_SECS,
            description: "Request timeout in seconds.".into(),
        }
    }
}

impl ConfigItem<u64> for TimeoutConfigItem {
    fn get_value(&self) -> &u64 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let secs: u64 = parse_number(new_value, "timeout")?;
        if secs == 0 || secs > MAX_TIMEOUT_SECS {
            return Err(Error::Parse(format!(
                "Timeout must be between 1 and {} seconds, got {}.",
                MAX_TIMEOUT_SECS, secs
            )));
        }
        self.value = secs;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSizeConfigItem {
    pub value: u32,
    pub description: String,
}

impl Default for PageSizeConfigItem {
    fn default() -> Self {
        Self {
            value: DEFAULT_PAGE_SIZE,
            description: "Venues shown per page.".into(),
        }
    }
}

impl ConfigItem<u32> for PageSizeConfigItem {
    fn get_value(&self) -> &u32 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let size: u32 = parse_number(new_value, "page size")?;
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(Error::Parse(format!(
                "Page size must be between 1 and {}, got {}.",
                MAX_PAGE_SIZE, size
            )));
        }
        self.value = size;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLoggingConfigItem {
    pub value: Bool,
    pub description: String,
}

impl Default for FileLoggingConfigItem {
    fn default() -> Self {
        Self {
            value: Bool(true),
            description: "Enable writing log messages to file.".into(),
        }
    }
}

impl ConfigItem<Bool> for FileLoggingConfigItem {
    fn get_value(&self) -> &Bool {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = Bool::try_from_str(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}
