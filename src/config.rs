use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::llm::ProviderKind;

// --- Settings keys ---

pub const ENV_PROVIDER: &str = "AI_PROVIDER";
pub const ENV_BASE_URL: &str = "AI_BASE_URL";
pub const ENV_API_KEY: &str = "AI_API_KEY";
pub const ENV_MODEL: &str = "AI_MODEL";

const DEFAULT_PROVIDER: &str = "ollama";

const OPENAI_DEFAULT_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const GEMINI_DEFAULT_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_DEFAULT_MODEL: &str = "gemini-pro";
const OLLAMA_DEFAULT_URL: &str = "http://localhost:11434/api/generate";
const OLLAMA_DEFAULT_MODEL: &str = "llama2";

/// Read-only key/value lookup the provider resolver draws its settings from.
pub trait SettingsSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Process environment variables.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSettings;

impl SettingsSource for EnvSettings {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl SettingsSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Two sources stacked: `primary` wins whenever it has a non-empty value.
#[derive(Debug, Clone)]
pub struct LayeredSettings<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> LayeredSettings<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: SettingsSource, F: SettingsSource> SettingsSource for LayeredSettings<P, F> {
    fn get(&self, key: &str) -> Option<String> {
        non_empty(self.primary.get(key)).or_else(|| non_empty(self.fallback.get(key)))
    }
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub ai: AiConfig,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default)]
pub struct AiConfig {
    /// One of `openai`, `gemini`, `ollama`.
    pub provider: Option<String>,
    /// Overrides the provider's default endpoint.
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

impl SettingsSource for AiConfig {
    fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            ENV_PROVIDER => &self.provider,
            ENV_BASE_URL => &self.base_url,
            ENV_API_KEY => &self.api_key,
            ENV_MODEL => &self.model,
            _ => return None,
        };
        value.clone()
    }
}

impl Config {
    pub fn load() -> Self {
        let config_path = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|d| !d.is_empty())
            .map(|d| PathBuf::from(d).join("neri").join("config.toml"))
            .or_else(|| dirs::config_dir().map(|d| d.join("neri").join("config.toml")))
            .unwrap_or_else(|| PathBuf::from("~/.config/neri/config.toml"));

        Self::load_from(&config_path)
    }

    /// Load from an explicit path. Missing or broken files yield the defaults.
    pub fn load_from(config_path: &Path) -> Self {
        if !config_path.exists() {
            return Config::default();
        }

        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => return config,
                Err(e) => {
                    eprintln!("[neri] Failed to parse {}: {e}", config_path.display());
                }
            },
            Err(e) => {
                eprintln!("[neri] Failed to read {}: {e}", config_path.display());
            }
        }

        Config::default()
    }

    /// Environment variables layered over the `[ai]` section of the file.
    pub fn settings(&self) -> LayeredSettings<EnvSettings, AiConfig> {
        LayeredSettings::new(EnvSettings, self.ai.clone())
    }
}

/// Everything needed to talk to one provider for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub provider: ProviderKind,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl ProviderConfig {
    /// Resolve the provider descriptor. Unknown provider names are kept as
    /// [`ProviderKind::Other`] and rejected when the request is built.
    pub fn resolve(settings: &dyn SettingsSource) -> Self {
        let provider = ProviderKind::parse(&get_or(settings, ENV_PROVIDER, DEFAULT_PROVIDER));

        let (default_url, default_model) = match provider {
            ProviderKind::OpenAi => (OPENAI_DEFAULT_URL, OPENAI_DEFAULT_MODEL),
            ProviderKind::Gemini => (GEMINI_DEFAULT_URL, GEMINI_DEFAULT_MODEL),
            ProviderKind::Ollama => (OLLAMA_DEFAULT_URL, OLLAMA_DEFAULT_MODEL),
            ProviderKind::Other(_) => {
                return Self {
                    provider,
                    endpoint: String::new(),
                    api_key: None,
                    model: String::new(),
                };
            }
        };

        let api_key = if provider.requires_api_key() {
            non_empty(settings.get(ENV_API_KEY))
        } else {
            None
        };

        Self {
            endpoint: get_or(settings, ENV_BASE_URL, default_url),
            model: get_or(settings, ENV_MODEL, default_model),
            api_key,
            provider,
        }
    }

    /// True when the provider needs a credential and none was configured.
    pub fn missing_api_key(&self) -> bool {
        self.provider.requires_api_key() && self.api_key.is_none()
    }
}

fn get_or(settings: &dyn SettingsSource, key: &str, default: &str) -> String {
    non_empty(settings.get(key)).unwrap_or_else(|| default.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
