use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Codes in the configuration may be ISO 639-1 (2-letter) or ISO 639-3
/// (3-letter). The translator only supports Hindi to English, so besides
/// normalization this module also answers whether a pair is supported.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-3 (3-letter) code
    Part3,
}

/// Supported source language (ISO 639-1)
pub const SOURCE_LANGUAGE: &str = "hi";

/// Supported target language (ISO 639-1)
pub const TARGET_LANGUAGE: &str = "en";

/// Validate if a language code is a valid ISO 639-1 or ISO 639-3 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    match normalized_code.len() {
        2 if Language::from_639_1(&normalized_code).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&normalized_code).is_some() => Ok(LanguageCodeType::Part3),
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Normalize a language code to ISO 639-1 when one exists, else ISO 639-3.
///
/// The translation endpoints expect the short form (`hi`, `en`).
pub fn normalize_to_part1(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    let language = match validate_language_code(&normalized_code)? {
        LanguageCodeType::Part1 => Language::from_639_1(&normalized_code),
        LanguageCodeType::Part3 => Language::from_639_3(&normalized_code),
    }
    .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;

    Ok(language
        .to_639_1()
        .map(str::to_string)
        .unwrap_or_else(|| language.to_639_3().to_string()))
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part1(code1), normalize_to_part1(code2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part1(code)?;
    let lang = if normalized.len() == 2 {
        Language::from_639_1(&normalized)
    } else {
        Language::from_639_3(&normalized)
    }
    .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// Whether the pair is one the translator supports (Hindi to English only)
pub fn is_supported_pair(source: &str, target: &str) -> bool {
    language_codes_match(source, SOURCE_LANGUAGE) && language_codes_match(target, TARGET_LANGUAGE)
}
