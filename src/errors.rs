/*!
 * Error types for the hindi-translate application.
 *
 * Extraction errors abort a run, translation errors are recovered per
 * sentence by the translation service. Both are defined with thiserror;
 * the application edges (controller, CLI) wrap them in anyhow.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl ProviderError {
    /// Map a reqwest error onto the provider taxonomy
    pub fn from_reqwest(error: reqwest::Error, timeout_secs: u64) -> Self {
        if error.is_timeout() {
            Self::Timeout(timeout_secs)
        } else if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that can occur while translating a single sentence
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The backend answered but produced no text
    #[error("Translation backend returned an empty result")]
    EmptyTranslation,
}

/// Errors that can occur while obtaining the source text
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The source file does not exist
    #[error("Source file not found: {0}")]
    NotFound(String),

    /// The source file exists but could not be read
    #[error("Failed to read source file {path}: {message}")]
    Unreadable {
        /// Path of the unreadable file
        path: String,
        /// Underlying I/O message
        message: String,
    },

    /// The PDF could not be parsed
    #[error("Failed to parse PDF {path}: {message}")]
    Pdf {
        /// Path of the PDF
        path: String,
        /// Parser message
        message: String,
    },

    /// The source produced no text at all
    #[error("No text could be extracted from {0}")]
    EmptyDocument(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error while extracting the source text
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Output could not be assembled in order
    #[error("Assembly error: {0}")]
    Assembly(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        Self::Translation(TranslationError::Provider(error))
    }
}
