use crate::domain::error::QtError;
use crate::domain::model::TranslatorId;
use crate::presentation::messages::Locale;
use crate::presentation::view::FontSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub translation: TranslationSettings,
    #[serde(default)]
    pub popup: PopupSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Provider selection and credentials.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationSettings {
    #[serde(default)]
    pub enable_specified: bool,
    #[serde(default)]
    pub specified_translator: TranslatorId,
    #[serde(default = "default_youdao_keyfrom")]
    pub youdao_keyfrom: String,
    #[serde(default = "default_youdao_api_key")]
    pub youdao_api_key: String,
    pub google_api_key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PopupSettings {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default)]
    pub show_in_tool_window: bool,
    #[serde(default)]
    pub font_size: FontSize,
}

impl PopupSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: default_log_level(),
        }
    }
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            enable_specified: false,
            specified_translator: TranslatorId::Youdao,
            youdao_keyfrom: default_youdao_keyfrom(),
            youdao_api_key: default_youdao_api_key(),
            google_api_key: None,
        }
    }
}

impl Default for PopupSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            show_in_tool_window: false,
            font_size: FontSize::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            locale: Locale::default(),
            logging: Logging::default(),
            translation: TranslationSettings::default(),
            popup: PopupSettings::default(),
        }
    }
}

// Defaults
fn default_theme() -> String {
    "temp".to_string()
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}
fn default_youdao_keyfrom() -> String {
    "IntellijTranslate".to_string()
}
fn default_youdao_api_key() -> String {
    "1918103305".to_string()
}
fn default_debounce_ms() -> u64 {
    10
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("qtrans").join("config.toml"))
}

pub fn load_config() -> Result<Config, QtError> {
    match get_config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(Config::default()),
    }
}

/// Read the config at `path`, falling back to defaults when the file is
/// missing or malformed.
pub fn load_config_from(path: &Path) -> Result<Config, QtError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    match toml::from_str::<Config>(&content) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!(
                "Warning: Failed to parse config file: {}. Using defaults.",
                e
            );
            Ok(Config::default())
        }
    }
}

pub fn generate_config_sample() -> Result<(), QtError> {
    let path = get_config_path()
        .ok_or_else(|| QtError::Config("Cannot determine config directory".to_string()))?;

    if path.exists() {
        eprintln!("Config file already exists at: {}", path.display());
        return Ok(());
    }

    write_config_sample(&path)?;
    println!("Generated config file at: {}", path.display());
    Ok(())
}

pub fn write_config_sample(path: &Path) -> Result<(), QtError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let sample = Config::default();
    let toml_content = toml::to_string_pretty(&sample)
        .map_err(|e| QtError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(path, toml_content)
        .map_err(|e| QtError::Config(format!("Failed to write config file: {}", e)))?;
    Ok(())
}
