/*!
 * # hindi-translate
 *
 * Translate Hindi documents (plain text or PDF) to English one sentence at
 * a time.
 *
 * ## Pipeline
 *
 * 1. `text_source` loads the raw document; PDF pages are extracted in order
 * 2. `segmenter` splits it into sentences on `।`, `॥`, `!` and `?`
 * 3. `translation` sends each sentence to the configured backend
 *    (the Google endpoint or a local Ollama model), keeping the original
 *    text for any sentence that fails
 * 4. `translation::assembly` writes the results in document order
 *
 * ## Modules
 *
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `providers`: HTTP clients for the translation backends
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod segmenter;
pub mod text_source;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ExtractionError, ProviderError, TranslationError};
pub use segmenter::{segment, Sentence, Sentences};
pub use text_source::{RawDocument, TextSource};
pub use translation::{TranslatedSentence, TranslationService, Translator};
