use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,
    #[serde(default = "default_message_duration_ms")]
    pub message_duration_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_download_dir")]
    pub download_dir: String,
    #[serde(default = "default_speech_command")]
    pub speech_command: Vec<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}
fn default_locale() -> String {
    "en-US".to_string()
}
fn default_locales() -> Vec<String> {
    ["en-US", "en-GB", "es-ES", "fr-FR", "de-DE", "it-IT", "pt-BR", "ja-JP"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_advance_delay_ms() -> u64 {
    1000
}
fn default_message_duration_ms() -> u64 {
    3000
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_download_dir() -> String {
    dirs::download_dir()
        .or_else(|| dirs::data_dir().map(|d| d.join("vocab-trainer")))
        .unwrap_or_else(|| PathBuf::from("."))
        .to_string_lossy()
        .to_string()
}
fn default_speech_command() -> Vec<String> {
    ["espeak-ng", "-v", "{locale}", "{text}"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            locale: default_locale(),
            locales: default_locales(),
            theme: default_theme(),
            advance_delay_ms: default_advance_delay_ms(),
            message_duration_ms: default_message_duration_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            download_dir: default_download_dir(),
            speech_command: default_speech_command(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize_locale();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocab-trainer")
            .join("config.toml")
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }

    pub fn message_duration(&self) -> Duration {
        Duration::from_millis(self.message_duration_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Make sure the locale list is non-empty and contains `locale`. An
    /// unknown locale falls back to the first listed one.
    pub fn normalize_locale(&mut self) {
        if self.locales.is_empty() {
            self.locales = default_locales();
        }
        if !self.locales.iter().any(|l| l == &self.locale) {
            self.locale = self.locales[0].clone();
        }
    }

    /// The locale `step` positions away from `current` in the list, wrapping.
    pub fn cycle_locale(&self, current: &str, step: isize) -> String {
        if self.locales.is_empty() {
            return current.to_string();
        }
        let len = self.locales.len() as isize;
        let idx = self
            .locales
            .iter()
            .position(|l| l == current)
            .map(|i| i as isize)
            .unwrap_or(0);
        self.locales[(idx + step).rem_euclid(len) as usize].clone()
    }
}
