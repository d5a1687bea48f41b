/*!
 * Core translation service implementation.
 *
 * A `Translator` turns one sentence into English or fails with a
 * `TranslationError`. The `TranslationService` wraps the configured
 * translator and never fails: a failed sentence degrades to its original
 * text and the run moves on.
 */

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use crate::app_config::{Config, TranslationProvider};
use crate::errors::TranslationError;
use crate::language_utils;
use crate::providers::google::{GoogleTranslate, GoogleTranslateRequest};
use crate::providers::ollama::{GenerationRequest, Ollama};
use crate::providers::Provider;
use crate::segmenter::Sentence;
use super::cache::TranslationCache;

/// Capability to translate one piece of text
#[async_trait]
pub trait Translator: Send + Sync {
    /// Human-readable backend name for logs
    fn name(&self) -> &str;

    /// Translate `text`. One attempt, no retries.
    async fn translate(&self, text: &str) -> Result<String, TranslationError>;

    /// Probe the backend
    async fn test_connection(&self) -> Result<(), TranslationError> {
        self.translate("नमस्ते").await.map(|_| ())
    }
}

/// Translator backed by the remote Google Translate endpoint
pub struct RemoteApiTranslator {
    client: GoogleTranslate,
    source_language: String,
    target_language: String,
}

impl RemoteApiTranslator {
    pub fn new(client: GoogleTranslate, source_language: &str, target_language: &str) -> Self {
        Self {
            client,
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }
}

#[async_trait]
impl Translator for RemoteApiTranslator {
    fn name(&self) -> &str {
        "Google Translate"
    }

    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let request = GoogleTranslateRequest::new(text, &self.source_language, &self.target_language);
        let response = self.client.complete(request).await?;
        let translated = GoogleTranslate::extract_text(&response);

        if translated.trim().is_empty() {
            return Err(TranslationError::EmptyTranslation);
        }

        Ok(translated)
    }

    async fn test_connection(&self) -> Result<(), TranslationError> {
        self.client.test_connection().await.map_err(TranslationError::from)
    }
}

/// Translator backed by a neural model served locally through Ollama
pub struct LocalModelTranslator {
    client: Ollama,
    model: String,
    system_prompt: String,
    temperature: f32,
    num_threads: usize,
}

impl LocalModelTranslator {
    pub fn new(
        client: Ollama,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        temperature: f32,
        num_threads: usize,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            system_prompt: system_prompt.into(),
            temperature,
            num_threads,
        }
    }
}

#[async_trait]
impl Translator for LocalModelTranslator {
    fn name(&self) -> &str {
        &self.model
    }

    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let request = GenerationRequest::new(&self.model, text)
            .system(&self.system_prompt)
            .temperature(self.temperature)
            .num_threads(self.num_threads);

        let response = self.client.complete(request).await?;
        let translated = Ollama::extract_text(&response);

        if translated.is_empty() {
            return Err(TranslationError::EmptyTranslation);
        }

        Ok(translated)
    }

    async fn test_connection(&self) -> Result<(), TranslationError> {
        self.client.test_connection().await.map_err(TranslationError::from)
    }
}

/// Fill the `{source_language}` and `{target_language}` placeholders
fn render_prompt(template: &str, source_language: &str, target_language: &str) -> Result<String> {
    let source_name = language_utils::get_language_name(source_language)?;
    let target_name = language_utils::get_language_name(target_language)?;

    Ok(template
        .replace("{source_language}", &source_name)
        .replace("{target_language}", &target_name))
}

/// Build the translator for one configured provider
pub fn create_translator(config: &Config, provider: TranslationProvider) -> Result<Arc<dyn Translator>> {
    let translation = &config.translation;
    let source = language_utils::normalize_to_part1(&config.source_language)?;
    let target = language_utils::normalize_to_part1(&config.target_language)?;
    let endpoint = translation.get_endpoint(&provider);
    let timeout_secs = translation.get_timeout_secs(&provider);

    if endpoint.is_empty() {
        return Err(anyhow!("No endpoint configured for {}", provider));
    }

    let translator: Arc<dyn Translator> = match provider {
        TranslationProvider::Google => Arc::new(RemoteApiTranslator::new(
            GoogleTranslate::new(endpoint, timeout_secs),
            &source,
            &target,
        )),
        TranslationProvider::Ollama => Arc::new(LocalModelTranslator::new(
            Ollama::new(endpoint, timeout_secs),
            translation.get_model(&provider),
            render_prompt(&translation.common.system_prompt, &source, &target)?,
            translation.common.temperature,
            translation.get_num_threads(&provider),
        )),
    };

    Ok(translator)
}

/// How a sentence's output text was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// Translated by the primary backend
    Translated,
    /// Reused from an earlier identical sentence
    Cached,
    /// Translated by the secondary backend after the primary failed
    Secondary,
    /// Every backend failed; the original text is kept
    Fallback,
}

/// A sentence paired with its output text
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedSentence {
    pub sentence: Sentence,
    pub translation: String,
    pub outcome: TranslationOutcome,
}

impl TranslatedSentence {
    pub fn index(&self) -> usize {
        self.sentence.index
    }

    pub fn is_fallback(&self) -> bool {
        self.outcome == TranslationOutcome::Fallback
    }
}

/// Translation service applying cache lookup and the fallback policy
#[derive(Clone)]
pub struct TranslationService {
    primary: Arc<dyn Translator>,
    secondary: Option<Arc<dyn Translator>>,
    cache: TranslationCache,
    source_language: String,
    target_language: String,
}

impl TranslationService {
    /// Create the service from the configured providers
    pub fn new(config: &Config) -> Result<Self> {
        let primary = create_translator(config, config.translation.provider)?;
        let secondary = config
            .translation
            .fallback_provider
            .map(|provider| create_translator(config, provider))
            .transpose()?;

        Ok(Self::with_translators(
            primary,
            secondary,
            TranslationCache::new(config.translation.common.enable_cache),
            &config.source_language,
            &config.target_language,
        ))
    }

    /// Create the service around explicit translators
    pub fn with_translators(
        primary: Arc<dyn Translator>,
        secondary: Option<Arc<dyn Translator>>,
        cache: TranslationCache,
        source_language: &str,
        target_language: &str,
    ) -> Self {
        Self {
            primary,
            secondary,
            cache,
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }

    pub fn primary_name(&self) -> &str {
        self.primary.name()
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Translate text, returning the original text if every backend fails
    pub async fn translate_text(&self, text: &str) -> (String, TranslationOutcome) {
        if let Some(cached) = self.cache.get(text, &self.source_language, &self.target_language) {
            return (cached, TranslationOutcome::Cached);
        }

        match self.primary.translate(text).await {
            Ok(translated) => {
                self.cache.store(text, &self.source_language, &self.target_language, &translated);
                return (translated, TranslationOutcome::Translated);
            }
            Err(e) => warn!("{} failed, keeping going: {}", self.primary.name(), e),
        }

        if let Some(secondary) = &self.secondary {
            match secondary.translate(text).await {
                Ok(translated) => {
                    debug!("{} recovered the sentence", secondary.name());
                    self.cache.store(text, &self.source_language, &self.target_language, &translated);
                    return (translated, TranslationOutcome::Secondary);
                }
                Err(e) => warn!("{} failed as well: {}", secondary.name(), e),
            }
        }

        (text.to_string(), TranslationOutcome::Fallback)
    }

    /// Translate one sentence. Never fails.
    pub async fn translate_sentence(&self, sentence: Sentence) -> TranslatedSentence {
        let (translation, outcome) = self.translate_text(sentence.text()).await;
        TranslatedSentence {
            sentence,
            translation,
            outcome,
        }
    }

    /// Probe the primary backend
    pub async fn test_connection(&self) -> Result<(), TranslationError> {
        self.primary.test_connection().await
    }
}
