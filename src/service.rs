//! In-process adapter for a request/response transport.
//!
//! Mirrors the wire contract of the `/chat` endpoint: a JSON body with the
//! document text under `prompt` plus two legacy generation knobs that are
//! accepted and ignored, answered with a body holding exactly one string.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ServiceConfig;
use crate::constants::{DEFAULT_MAX_LENGTH, DEFAULT_TEMPERATURE};
use crate::error::{ExtractorError, Result};
use crate::metrics::ExtractionMetrics;
use crate::pipeline::Extractor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
    /// Kept for API compatibility; has no effect on extraction
    #[serde(default = "default_max_length")]
    pub max_length: u32,
    /// Kept for API compatibility; has no effect on extraction
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_max_length() -> u32 {
    DEFAULT_MAX_LENGTH
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

impl ChatRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_length: DEFAULT_MAX_LENGTH,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

pub struct ExtractionService {
    extractor: Extractor,
    config: ServiceConfig,
}

impl ExtractionService {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        Ok(Self {
            extractor: Extractor::new()?,
            config,
        })
    }

    pub fn handle(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.validate(&request.prompt)?;
        debug!(
            max_length = request.max_length,
            temperature = request.temperature,
            "Ignoring legacy generation parameters"
        );
        let result = self.extractor.extract(&request.prompt);
        Ok(ChatResponse {
            response: result.to_string(),
        })
    }

    /// Decode a JSON request body, extract, and encode the JSON response body.
    pub fn handle_json(&self, body: &str) -> Result<String> {
        let request: ChatRequest = serde_json::from_str(body)?;
        let response = self.handle(&request)?;
        Ok(serde_json::to_string(&response)?)
    }

    fn validate(&self, prompt: &str) -> Result<()> {
        if prompt.trim().is_empty() {
            ExtractionMetrics::record_rejected("empty");
            warn!("Rejected request with empty prompt");
            return Err(ExtractorError::EmptyInput);
        }
        let len = prompt.chars().count();
        if len > self.config.max_input_chars {
            ExtractionMetrics::record_rejected("too_large");
            warn!("Rejected request of {} chars", len);
            return Err(ExtractorError::InputTooLarge {
                len,
                max: self.config.max_input_chars,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ExtractionService {
        ExtractionService::new(ServiceConfig { max_input_chars: 200 }).unwrap()
    }

    #[test]
    fn test_handle_returns_single_string() {
        let response = service()
            .handle(&ChatRequest::new("Named Insured: Acme Construction LLC. Policy Number: 123."))
            .unwrap();
        assert_eq!(response.response, "Acme Construction LLC");
    }

    #[test]
    fn test_legacy_knobs_do_not_change_result() {
        let svc = service();
        let mut request = ChatRequest::new("The primary insured is Johnson Family Farms");
        let baseline = svc.handle(&request).unwrap();
        request.max_length = 5;
        request.temperature = 1.9;
        assert_eq!(svc.handle(&request).unwrap(), baseline);
    }

    #[test]
    fn test_json_defaults_for_missing_knobs() {
        let request: ChatRequest = serde_json::from_str(r#"{"prompt": "FitH null"}"#).unwrap();
        assert_eq!(request.max_length, 200);
        assert_eq!(request.temperature, 0.7);
    }

    #[test]
    fn test_handle_json_round_trip() {
        let body = service()
            .handle_json(r#"{"prompt": "FitH null", "max_length": 50, "temperature": 0.3}"#)
            .unwrap();
        assert_eq!(body, r#"{"response":"UNKNOWN (PDF parsing error)"}"#);
    }

    #[test]
    fn test_rejects_empty_and_oversized_prompts() {
        let svc = service();
        assert!(matches!(
            svc.handle(&ChatRequest::new("   \n")),
            Err(ExtractorError::EmptyInput)
        ));
        let err = svc.handle(&ChatRequest::new("a".repeat(201))).unwrap_err();
        assert!(matches!(err, ExtractorError::InputTooLarge { len: 201, max: 200 }));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_malformed_json_is_client_error() {
        let err = service().handle_json("{not json").unwrap_err();
        assert!(err.is_client_error());
    }
}
