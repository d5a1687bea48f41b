/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use hindi_translate::app_config::{Config, LogLevel, TranslationProvider};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "hi");
    assert_eq!(config.target_language, "en");
    assert_eq!(config.translation.provider, TranslationProvider::Google);
    assert_eq!(config.translation.fallback_provider, None);
    assert_eq!(config.translation.common.concurrent_requests, 1);
    assert!(config.translation.common.enable_cache);
    assert_eq!(config.log_level, LogLevel::Info);

    assert_eq!(config.files.text_input, "Hindi.txt");
    assert_eq!(config.files.text_output, "english.txt");
    assert_eq!(config.files.pdf_output, "English.txt");
    assert_eq!(config.files.raw_output, "raw.txt");
}

#[test]
fn test_default_config_providers_shouldCarryBackendDefaults() {
    let translation = Config::default().translation;

    let google = TranslationProvider::Google;
    assert_eq!(
        translation.get_endpoint(&google),
        "https://translate.googleapis.com/translate_a/single"
    );
    assert_eq!(translation.get_timeout_secs(&google), 5);

    let ollama = TranslationProvider::Ollama;
    assert_eq!(translation.get_endpoint(&ollama), "http://localhost:11434");
    assert_eq!(translation.get_model(&ollama), "llama3.2:3b");
    assert_eq!(translation.get_num_threads(&ollama), 1);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Only Hindi to English is supported
    config.target_language = "fr".to_string();
    assert!(config.validate().is_err());
    config.target_language = "eng".to_string();
    assert!(config.validate().is_ok());

    config.source_language = "xyz".to_string();
    assert!(config.validate().is_err());
    config.source_language = "hi".to_string();

    config.translation.common.concurrent_requests = 0;
    assert!(config.validate().is_err());
    config.translation.common.concurrent_requests = 4;
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation_withSameFallbackProvider_shouldFail() {
    let mut config = Config::default();
    config.translation.fallback_provider = Some(TranslationProvider::Google);
    assert!(config.validate().is_err());

    config.translation.fallback_provider = Some(TranslationProvider::Ollama);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation_withBadLocalSettings_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Ollama;
    assert!(config.validate().is_ok());

    for provider in config.translation.available_providers.iter_mut() {
        if provider.provider_type == "ollama" {
            provider.num_threads = 0;
        }
    }
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_withInvalidEndpoint_shouldFail() {
    let mut config = Config::default();
    for provider in config.translation.available_providers.iter_mut() {
        if provider.provider_type == "google" {
            provider.endpoint = "not a url".to_string();
        }
    }
    assert!(config.validate().is_err());
}

#[test]
fn test_set_model_withLocalProvider_shouldOverrideModel() {
    let mut config = Config::default();
    config.translation.set_model(&TranslationProvider::Ollama, "qwen2.5:7b");
    assert_eq!(config.translation.get_model(&TranslationProvider::Ollama), "qwen2.5:7b");
}

#[test]
fn test_load_withOllamaEntryWithoutTimeout_shouldUseLocalDefault() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{"translation": {"provider": "ollama", "available_providers": [{"type": "ollama", "model": "llama3.2:3b", "endpoint": "http://localhost:11434"}]}}"#,
    )?;

    let config = Config::load(&path)?;
    assert_eq!(config.translation.get_timeout_secs(&TranslationProvider::Ollama), 120);
    assert_eq!(config.translation.get_timeout_secs(&TranslationProvider::Google), 5);
    assert!(config.validate().is_ok());
    Ok(())
}

#[test]
fn test_load_withExplicitTimeout_shouldKeepIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{"translation": {"available_providers": [{"type": "google", "timeout_secs": 9}]}}"#,
    )?;

    let config = Config::load(&path)?;
    assert_eq!(config.translation.get_timeout_secs(&TranslationProvider::Google), 9);
    Ok(())
}

#[test]
fn test_config_validation_withZeroTimeout_shouldFail() {
    let mut config = Config::default();
    for provider in config.translation.available_providers.iter_mut() {
        provider.timeout_secs = Some(0);
    }
    assert!(config.validate().is_err());
}

#[test]
fn test_set_local_model_withLocalFallback_shouldTargetFallback() -> Result<()> {
    let mut config = Config::default();
    config.translation.fallback_provider = Some(TranslationProvider::Ollama);

    assert_eq!(config.translation.local_provider(), Some(TranslationProvider::Ollama));
    config.translation.set_local_model("qwen2.5:7b")?;
    assert_eq!(config.translation.get_model(&TranslationProvider::Ollama), "qwen2.5:7b");
    assert_eq!(config.translation.get_model(&TranslationProvider::Google), "");
    Ok(())
}

#[test]
fn test_set_local_model_withLocalPrimary_shouldTargetPrimary() -> Result<()> {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Ollama;
    config.translation.set_local_model("mistral:7b")?;
    assert_eq!(config.translation.get_model(&TranslationProvider::Ollama), "mistral:7b");
    Ok(())
}

#[test]
fn test_set_local_model_withoutLocalProvider_shouldFail() {
    let mut config = Config::default();
    assert_eq!(config.translation.local_provider(), None);
    assert!(config.translation.set_local_model("qwen2.5:7b").is_err());
    assert_eq!(config.translation.get_model(&TranslationProvider::Ollama), "llama3.2:3b");
}

#[test]
fn test_provider_from_str_withKnownNames_shouldParse() {
    assert_eq!("google".parse::<TranslationProvider>().unwrap(), TranslationProvider::Google);
    assert_eq!("Ollama".parse::<TranslationProvider>().unwrap(), TranslationProvider::Ollama);
    assert!("deepl".parse::<TranslationProvider>().is_err());
    assert!(TranslationProvider::Ollama.is_local());
    assert!(!TranslationProvider::Google.is_local());
}

#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());
    assert_eq!(created.translation.provider, TranslationProvider::Google);

    let loaded = Config::load(&path)?;
    assert_eq!(loaded.files.pdf_output, created.files.pdf_output);
    Ok(())
}

#[test]
fn test_load_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{"translation": {"provider": "ollama", "common": {"concurrent_requests": 3}}, "log_level": "debug"}"#,
    )?;

    let config = Config::load(&path)?;
    assert_eq!(config.source_language, "hi");
    assert_eq!(config.translation.provider, TranslationProvider::Ollama);
    assert_eq!(config.translation.common.concurrent_requests, 3);
    assert!(config.translation.common.enable_cache);
    assert_eq!(config.translation.available_providers.len(), 2);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.validate().is_ok());
    Ok(())
}

#[test]
fn test_load_withMalformedJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;
    assert!(Config::load(&path).is_err());
    Ok(())
}
