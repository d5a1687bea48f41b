use async_trait::async_trait;
use log::{debug, error};
use reqwest::{header, Client};
use serde_json::Value;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Client for the public Google Translate `translate_a/single` endpoint
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Endpoint URL
    endpoint: String,
    /// Per-request timeout, kept for error reporting
    timeout_secs: u64,
}

/// Translation request
#[derive(Debug, Clone)]
pub struct GoogleTranslateRequest {
    /// Text to translate
    pub text: String,
    /// Source language code (`sl`)
    pub source_language: String,
    /// Target language code (`tl`)
    pub target_language: String,
}

impl GoogleTranslateRequest {
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// Parsed translation response
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleTranslateResponse {
    /// Translated segments in response order
    pub segments: Vec<String>,
    /// Language the endpoint detected for the input, if reported
    pub detected_language: Option<String>,
}

impl GoogleTranslateResponse {
    /// Parse the nested-array body the endpoint returns, e.g.
    /// `[[["India is a great country.","भारत एक महान देश है।",null,null,10]],null,"hi"]`
    pub fn parse(body: &str) -> Result<Self, ProviderError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("invalid JSON: {}", e)))?;

        let segments = value
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("response has no segment list".to_string()))?
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .map(str::to_string)
            .collect::<Vec<_>>();

        if segments.is_empty() {
            return Err(ProviderError::ParseError(
                "response contains no translated segments".to_string(),
            ));
        }

        let detected_language = value.get(2).and_then(Value::as_str).map(str::to_string);

        Ok(Self {
            segments,
            detected_language,
        })
    }

    /// The first translated segment
    pub fn first_segment(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or_default()
    }
}

impl GoogleTranslate {
    /// Create a client with the given endpoint and per-request timeout
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            timeout_secs,
        }
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    type Request = GoogleTranslateRequest;
    type Response = GoogleTranslateResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(header::USER_AGENT, "Mozilla/5.0")
            .query(&[
                ("client", "gtx"),
                ("sl", request.source_language.as_str()),
                ("tl", request.target_language.as_str()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, self.timeout_secs))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, self.timeout_secs))?;

        if !status.is_success() {
            error!("Google Translate API error ({}): {}", status, body);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: body,
            });
        }

        let parsed = GoogleTranslateResponse::parse(&body)?;
        debug!(
            "Google Translate returned {} segment(s), detected language {:?}",
            parsed.segments.len(),
            parsed.detected_language
        );
        Ok(parsed)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = GoogleTranslateRequest::new("नमस्ते", "hi", "en");
        self.complete(request).await.map(|_| ())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.first_segment().to_string()
    }
}
