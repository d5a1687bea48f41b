/*!
 * Client implementations for the translation backends.
 *
 * - Google: the public `translate_a/single` endpoint
 * - Ollama: a locally served neural model
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all backend clients
///
/// This trait defines the interface that all client implementations follow,
/// allowing the translators to wrap them interchangeably.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider. A single attempt is made.
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

pub mod google;
pub mod ollama;
