use crate::core::prompt::{build_prompt, response_schema};
use crate::models::{RecommendationRequest, RecommendationResponse, StudentProfile};
use crate::services::inference::{InferenceBackend, InferenceCall, InferenceError};
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by the requester; the caller decides how to recover
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("Inference backend failed: {0}")]
    Backend(#[from] InferenceError),

    #[error("Malformed recommendation response: {0}")]
    Malformed(String),
}

/// Builds recommendation requests and sends them to the inference backend
#[derive(Clone)]
pub struct RecommendationRequester {
    backend: Arc<dyn InferenceBackend>,
}

impl RecommendationRequester {
    pub fn new(backend: Arc<dyn InferenceBackend>) -> Self {
        Self { backend }
    }

    /// Ask the backend to rank `catalog` titles for `profile`.
    ///
    /// An empty catalog short-circuits to an empty response without calling
    /// the backend. Output that does not match the schema is rejected whole.
    pub async fn request_recommendations(
        &self,
        profile: &StudentProfile,
        catalog: &[String],
    ) -> Result<RecommendationResponse, RecommendationError> {
        if catalog.is_empty() {
            tracing::debug!("Empty catalog, skipping inference for {}", profile.student_id);
            return Ok(RecommendationResponse::default());
        }

        let request = RecommendationRequest {
            student_id: profile.student_id.clone(),
            interests: profile.interests.clone(),
            past_activity: profile.past_activity.clone(),
            all_events: catalog.to_vec(),
        };

        let call = InferenceCall {
            prompt: build_prompt(&request),
            schema: response_schema(),
            request,
        };

        let raw = self.backend.generate(&call).await?;

        parse_response(&raw)
    }
}

fn parse_response(raw: &str) -> Result<RecommendationResponse, RecommendationError> {
    let trimmed = strip_code_fence(raw.trim());
    serde_json::from_str(trimmed).map_err(|e| RecommendationError::Malformed(e.to_string()))
}

/// Some models wrap JSON output in a markdown fence even in JSON mode
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let parsed = parse_response(r#"{"recommendedEvents": ["Music Fest"]}"#).unwrap();
        assert_eq!(parsed.recommended_events, vec!["Music Fest"]);
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = "```json\n{\"recommendedEvents\": [\"Tech Summit\"]}\n```";
        let parsed = parse_response(raw).unwrap();
        assert_eq!(parsed.recommended_events, vec!["Tech Summit"]);
    }

    #[test]
    fn test_parse_rejects_prose() {
        let err = parse_response("I recommend Music Fest!").unwrap_err();
        assert!(matches!(err, RecommendationError::Malformed(_)));
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(parse_response(r#"{"events": ["Music Fest"]}"#).is_err());
        assert!(parse_response(r#"["Music Fest"]"#).is_err());
    }
}
