use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Default file names used when the CLI does not name them
    #[serde(default)]
    pub files: FileConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Remote Google Translate endpoint
    #[default]
    Google,
    // @provider: Local neural model served by Ollama
    Ollama,
}

impl TranslationProvider {
    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::Ollama => "ollama".to_string(),
        }
    }

    /// Whether this backend runs a model on the local machine
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Ollama)
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "ollama" => Ok(Self::Ollama),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name (local models only)
    #[serde(default = "String::new")]
    pub model: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds for a single call; unset means the provider default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    // @field: Inference threads handed to a local model backend
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::Google => Self {
                provider_type: "google".to_string(),
                model: String::new(),
                endpoint: default_google_endpoint(),
                timeout_secs: Some(default_remote_timeout_secs()),
                num_threads: default_num_threads(),
            },
            TranslationProvider::Ollama => Self {
                provider_type: "ollama".to_string(),
                model: default_ollama_model(),
                endpoint: default_ollama_endpoint(),
                timeout_secs: Some(default_local_timeout_secs()),
                num_threads: default_num_threads(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Provider tried once when the primary fails, before falling back to
    /// the untranslated text
    #[serde(default)]
    pub fallback_provider: Option<TranslationProvider>,

    /// Available translation providers
    #[serde(default = "default_available_providers")]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Prompt template for local models
    /// Placeholders: {source_language}, {target_language}
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Sentences in flight at once; 1 keeps the strictly sequential behaviour
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    /// Reuse translations of repeated sentences within a run
    #[serde(default = "default_true")]
    pub enable_cache: bool,

    /// Temperature parameter for local model generation
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            concurrent_requests: default_concurrent_requests(),
            enable_cache: true,
            temperature: default_temperature(),
        }
    }
}

/// Default input and output file names
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FileConfig {
    /// Plain-text input used when no PDF is found
    #[serde(default = "default_text_input")]
    pub text_input: String,

    /// Output name for plain-text input
    #[serde(default = "default_text_output")]
    pub text_output: String,

    /// Output name for PDF input
    #[serde(default = "default_pdf_output")]
    pub pdf_output: String,

    /// Output name for raw PDF extraction
    #[serde(default = "default_raw_output")]
    pub raw_output: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            text_input: default_text_input(),
            text_output: default_text_output(),
            pdf_output: default_pdf_output(),
            raw_output: default_raw_output(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    language_utils::SOURCE_LANGUAGE.to_string()
}

fn default_target_language() -> String {
    language_utils::TARGET_LANGUAGE.to_string()
}

fn default_concurrent_requests() -> usize {
    1
}

fn default_remote_timeout_secs() -> u64 {
    5
}

fn default_local_timeout_secs() -> u64 {
    120
}

fn default_num_threads() -> usize {
    1
}

fn default_temperature() -> f32 {
    0.1
}

fn default_true() -> bool {
    true
}

fn default_google_endpoint() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_system_prompt() -> String {
    "You are a professional translator. Translate the following text from {source_language} to {target_language}. Reply with the translation only, without notes or quotes.".to_string()
}

fn default_text_input() -> String {
    "Hindi.txt".to_string()
}

fn default_text_output() -> String {
    "english.txt".to_string()
}

fn default_pdf_output() -> String {
    "English.txt".to_string()
}

fn default_raw_output() -> String {
    "raw.txt".to_string()
}

fn default_available_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new(TranslationProvider::Google),
        ProviderConfig::new(TranslationProvider::Ollama),
    ]
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        let source_name = language_utils::get_language_name(&self.source_language)?;
        let target_name = language_utils::get_language_name(&self.target_language)?;

        if !language_utils::is_supported_pair(&self.source_language, &self.target_language) {
            return Err(anyhow!(
                "Unsupported language pair {} -> {}; only Hindi -> English is supported",
                source_name,
                target_name
            ));
        }

        if self.translation.common.concurrent_requests == 0 {
            return Err(anyhow!("concurrent_requests must be at least 1"));
        }

        if self.translation.fallback_provider == Some(self.translation.provider) {
            return Err(anyhow!(
                "Fallback provider must differ from the primary provider ({})",
                self.translation.provider
            ));
        }

        let providers = std::iter::once(self.translation.provider)
            .chain(self.translation.fallback_provider);
        for provider in providers {
            let endpoint = self.translation.get_endpoint(&provider);
            Url::parse(&endpoint)
                .with_context(|| format!("Invalid endpoint for {}: {}", provider, endpoint))?;

            if self.translation.get_timeout_secs(&provider) == 0 {
                return Err(anyhow!("Timeout for {} must be greater than zero", provider));
            }

            if provider.is_local() {
                if self.translation.get_num_threads(&provider) == 0 {
                    return Err(anyhow!("num_threads for {} must be at least 1", provider));
                }
                if self.translation.get_model(&provider).is_empty() {
                    return Err(anyhow!("A model name is required for {}", provider));
                }
            }
        }

        Ok(())
    }

    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))
    }

    /// Load the configuration, writing a default file first if none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            files: FileConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the model for a provider
    pub fn get_model(&self, provider: &TranslationProvider) -> String {
        if let Some(provider_config) = self.get_provider_config(provider) {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        match provider {
            TranslationProvider::Google => String::new(),
            TranslationProvider::Ollama => default_ollama_model(),
        }
    }

    /// Get the endpoint for a provider
    pub fn get_endpoint(&self, provider: &TranslationProvider) -> String {
        if let Some(provider_config) = self.get_provider_config(provider) {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        match provider {
            TranslationProvider::Google => default_google_endpoint(),
            TranslationProvider::Ollama => default_ollama_endpoint(),
        }
    }

    /// Get the per-call timeout for a provider
    pub fn get_timeout_secs(&self, provider: &TranslationProvider) -> u64 {
        if let Some(timeout_secs) = self
            .get_provider_config(provider)
            .and_then(|p| p.timeout_secs)
        {
            return timeout_secs;
        }

        match provider {
            TranslationProvider::Google => default_remote_timeout_secs(),
            TranslationProvider::Ollama => default_local_timeout_secs(),
        }
    }

    /// Get the inference thread count for a provider
    pub fn get_num_threads(&self, provider: &TranslationProvider) -> usize {
        self.get_provider_config(provider)
            .map(|p| p.num_threads)
            .unwrap_or_else(default_num_threads)
    }

    /// The local-model provider among the primary and the fallback, if any
    pub fn local_provider(&self) -> Option<TranslationProvider> {
        std::iter::once(self.provider)
            .chain(self.fallback_provider)
            .find(TranslationProvider::is_local)
    }

    /// Set the model of whichever configured provider runs locally
    pub fn set_local_model(&mut self, model: &str) -> Result<()> {
        let provider = self.local_provider().ok_or_else(|| {
            anyhow!(
                "A model was given but neither {} nor the fallback provider runs a local model",
                self.provider
            )
        })?;
        self.set_model(&provider, model);
        Ok(())
    }

    /// Set the model of a provider, adding its config entry if missing
    pub fn set_model(&mut self, provider: &TranslationProvider, model: &str) {
        let provider_str = provider.to_lowercase_string();
        match self
            .available_providers
            .iter_mut()
            .find(|p| p.provider_type == provider_str)
        {
            Some(provider_config) => provider_config.model = model.to_string(),
            None => {
                let mut provider_config = ProviderConfig::new(*provider);
                provider_config.model = model.to_string();
                self.available_providers.push(provider_config);
            }
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            fallback_provider: None,
            available_providers: default_available_providers(),
            common: TranslationCommonConfig::default(),
        }
    }
}
