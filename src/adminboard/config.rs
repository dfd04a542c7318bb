use crate::error::{AdminError, Result};
use crate::forms::image::MAX_IMAGE_BYTES;
use crate::view::{DONATIONS_PAGE_SIZE, USERS_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration, stored in `<data dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminConfig {
    #[serde(default = "default_users_page_size")]
    pub users_page_size: usize,

    #[serde(default = "default_donations_page_size")]
    pub donations_page_size: usize,

    /// Simulated latency after a form submit, in milliseconds.
    #[serde(default)]
    pub submit_delay_ms: u64,

    /// Upper bound for uploaded images.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
}

fn default_users_page_size() -> usize {
    USERS_PAGE_SIZE
}

fn default_donations_page_size() -> usize {
    DONATIONS_PAGE_SIZE
}

fn default_max_image_bytes() -> u64 {
    MAX_IMAGE_BYTES
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            users_page_size: USERS_PAGE_SIZE,
            donations_page_size: DONATIONS_PAGE_SIZE,
            submit_delay_ms: 0,
            max_image_bytes: MAX_IMAGE_BYTES,
        }
    }
}

/// Keys accepted by `get`/`set`.
pub const CONFIG_KEYS: &[&str] = &[
    "users-page-size",
    "donations-page-size",
    "submit-delay-ms",
    "max-image-bytes",
];

impl AdminConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(AdminError::Io)?;
        let config: AdminConfig =
            serde_json::from_str(&content).map_err(AdminError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(AdminError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(AdminError::Serialization)?;
        fs::write(config_path, content).map_err(AdminError::Io)?;
        Ok(())
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "users-page-size" => self.users_page_size.to_string(),
            "donations-page-size" => self.donations_page_size.to_string(),
            "submit-delay-ms" => self.submit_delay_ms.to_string(),
            "max-image-bytes" => self.max_image_bytes.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "users-page-size" => self.users_page_size = parse_page_size(key, value)?,
            "donations-page-size" => self.donations_page_size = parse_page_size(key, value)?,
            "submit-delay-ms" => self.submit_delay_ms = parse_number(key, value)?,
            "max-image-bytes" => self.max_image_bytes = parse_number(key, value)?,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> AdminError {
    AdminError::Api(format!(
        "Unknown config key: {} (known keys: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

fn parse_number<N: std::str::FromStr>(key: &str, value: &str) -> Result<N> {
    value
        .trim()
        .parse()
        .map_err(|_| AdminError::Api(format!("Invalid value for {}: {}", key, value)))
}

fn parse_page_size(key: &str, value: &str) -> Result<usize> {
    match parse_number(key, value)? {
        0 => Err(AdminError::Api(format!("{} must be at least 1", key))),
        n => Ok(n),
    }
}
