/*!
 * Sentence translation.
 *
 * - `core`: the `Translator` capability, its remote and local variants, and
 *   the `TranslationService` that applies the fallback policy
 * - `cache`: reuse of translations for repeated sentences
 * - `dispatch`: bounded in-flight translation of a whole document
 * - `assembly`: order-restoring writer for the output sink
 */

// Re-export main types for easier usage
pub use self::assembly::OutputAssembler;
pub use self::cache::TranslationCache;
pub use self::core::{
    create_translator, LocalModelTranslator, RemoteApiTranslator, TranslatedSentence,
    TranslationOutcome, TranslationService, Translator,
};
pub use self::dispatch::{DispatchReport, SentenceDispatcher};

// Submodules
pub mod assembly;
pub mod cache;
pub mod core;
pub mod dispatch;
