/*!
 * Tests for error types and their conversions
 */

use hindi_translate::errors::{AppError, ExtractionError, ProviderError, TranslationError};

#[test]
fn test_provider_error_display_withTimeout_shouldNameSeconds() {
    let error = ProviderError::Timeout(5);
    assert_eq!(error.to_string(), "Request timed out after 5 seconds");
}

#[test]
fn test_provider_error_display_withApiError_shouldIncludeStatus() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too Many Requests".to_string(),
    };
    assert_eq!(error.to_string(), "API responded with error: 429 - Too Many Requests");
}

#[test]
fn test_translation_error_fromProviderError_shouldWrap() {
    let error: TranslationError = ProviderError::ConnectionError("refused".to_string()).into();
    assert!(matches!(error, TranslationError::Provider(ProviderError::ConnectionError(_))));
    assert!(error.to_string().contains("refused"));
}

#[test]
fn test_app_error_fromExtractionError_shouldKeepPath() {
    let error: AppError = ExtractionError::NotFound("book.pdf".to_string()).into();
    assert!(matches!(error, AppError::Extraction(ExtractionError::NotFound(_))));
    assert_eq!(error.to_string(), "Extraction error: Source file not found: book.pdf");
}

#[test]
fn test_app_error_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(_)));
}

#[test]
fn test_app_error_fromProviderError_shouldBecomeTranslationError() {
    let error: AppError = ProviderError::ParseError("bad json".to_string()).into();
    assert!(matches!(
        error,
        AppError::Translation(TranslationError::Provider(ProviderError::ParseError(_)))
    ));
}
