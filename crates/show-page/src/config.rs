use anyhow::Context;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::embeds::EmbedUrls;
use super::error::ScheduleError;
use super::link::DEFAULT_LISTEN_BASE;
use super::platform;
use super::schedule::{BroadcastSlot, SHOW_END_HOUR, SHOW_START_HOUR, SHOW_WEEKDAY};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub show: ShowConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub embeds: EmbedUrls,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Weekly airing slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowConfig {
    #[serde(default = "default_weekday")]
    pub weekday: Weekday,
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Listen-again service prefix; the date path is appended to it.
    #[serde(default = "default_listen_base")]
    pub listen_base: String,
}

/// Interviewee list source — either an https:// URL or a file path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Paths are resolved against `site.root`; host paths need `file://`.
    #[serde(default = "default_data_source")]
    pub source: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "platform::default_site_root")]
    pub root: PathBuf,
    #[serde(default = "default_title")]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ShowConfig {
    pub fn slot(&self) -> Result<BroadcastSlot, ScheduleError> {
        BroadcastSlot::new(self.weekday, self.start_hour, self.end_hour)
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            weekday: default_weekday(),
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            listen_base: default_listen_base(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: default_data_source(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: platform::default_site_root(),
            title: default_title(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

fn default_weekday() -> Weekday {
    SHOW_WEEKDAY
}

fn default_start_hour() -> u32 {
    SHOW_START_HOUR
}

fn default_end_hour() -> u32 {
    SHOW_END_HOUR
}

fn default_listen_base() -> String {
    DEFAULT_LISTEN_BASE.to_string()
}

fn default_data_source() -> String {
    "datos/entrevistas.json".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_title() -> String {
    "Programa de radio".to_string()
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    /// Load from [`Config::config_path`], writing the defaults out first if
    /// no file exists yet.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config.show.slot()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `$SHOW_CONFIG` if set, otherwise `config.toml` in the config dir.
    pub fn config_path() -> PathBuf {
        match std::env::var_os(platform::CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => platform::config_dir().join("config.toml"),
        }
    }
}
