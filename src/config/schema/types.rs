use super::locale::SUPPORTED_LOCALES;
use crate::error::ConfigError;
use crate::export::ExportFormat;
use crate::llm::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::prompt::{DEFAULT_AGE, NO_PROFESSION, TransformationParameters, validate_age};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Overall request timeout. Unset means a generation may take as long as
    /// the service needs.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

fn default_model() -> String {
    DEFAULT_MODEL.into()
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_locale() -> String {
    "en".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            api_key: None,
            model: default_model(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: None,
            locale: default_locale(),
            defaults: DefaultsConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Validation("model must not be empty".into()));
        }
        if !SUPPORTED_LOCALES.contains(&self.locale.as_str()) {
            return Err(ConfigError::Validation(format!(
                "unsupported locale '{}' (expected one of {})",
                self.locale,
                SUPPORTED_LOCALES.join(", ")
            )));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        validate_age(self.defaults.age)
    }

    /// API key with everything but the last four characters hidden.
    #[must_use]
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_deref().map(|key| {
            let visible: String = key
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("****{visible}")
        })
    }
}

/// Initial values for the parameter controls, restored by a full reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_age")]
    pub age: u8,
    #[serde(default = "default_profession")]
    pub profession: String,
    #[serde(default)]
    pub background: String,
}

fn default_age() -> u8 {
    DEFAULT_AGE
}

fn default_profession() -> String {
    NO_PROFESSION.into()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            age: default_age(),
            profession: default_profession(),
            background: String::new(),
        }
    }
}

impl DefaultsConfig {
    pub fn parameters(&self) -> Result<TransformationParameters, ConfigError> {
        TransformationParameters::new(self.age, self.profession.clone(), self.background.clone())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub format: ExportFormat,
    /// Where exported images are written; the working directory when unset.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}
