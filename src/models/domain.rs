use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bookable campus event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub price: f64,
    #[serde(rename = "committeeId")]
    pub committee_id: String,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Event {
    /// Free events skip the payment step entirely
    pub fn is_free(&self) -> bool {
        self.price <= 0.0
    }
}

/// A student's reservation against an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    #[serde(rename = "eventId")]
    pub event_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "bookingDate")]
    pub booking_date: DateTime<Utc>,
    #[serde(rename = "qrCode")]
    pub qr_code: String,
}

/// Everything the recommendation flow knows about a student.
///
/// Passed explicitly into the core rather than looked up from a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub student_id: String,
    pub interests: Vec<String>,
    /// Titles of events the student already booked, most recent first
    pub past_activity: Vec<String>,
}

/// Input sent across the inference boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub student_id: String,
    pub interests: Vec<String>,
    pub past_activity: Vec<String>,
    pub all_events: Vec<String>,
}

/// Output of the inference boundary.
///
/// Unknown fields are rejected so a response that drifts from the schema
/// is refused as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecommendationResponse {
    pub recommended_events: Vec<String>,
}

/// Where a set of recommendations came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    /// Ranked by the generative model and reconciled against the catalog
    Model,
    /// Most recent events, used when the model could not be consulted
    Fallback,
    /// Nothing to recommend from
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_roundtrips_camel_case_fields() {
        let json = serde_json::json!({
            "id": "evt-1",
            "title": "Tech Summit",
            "description": "Talks and demos",
            "date": "2026-11-02T18:00:00Z",
            "venue": "Main Hall",
            "price": 0.0,
            "committeeId": "tech-club"
        });

        let event: Event = serde_json::from_value(json).unwrap();
        assert_eq!(event.committee_id, "tech-club");
        assert!(event.image_url.is_none());
        assert!(event.is_free());

        let back = serde_json::to_value(&event).unwrap();
        assert!(back.get("imageUrl").is_none());
        assert_eq!(back["committeeId"], "tech-club");
    }

    #[test]
    fn test_response_rejects_unknown_fields() {
        let raw = r#"{"recommendedEvents": ["A"], "reasoning": "because"}"#;
        assert!(serde_json::from_str::<RecommendationResponse>(raw).is_err());
    }

    #[test]
    fn test_response_requires_titles_field() {
        assert!(serde_json::from_str::<RecommendationResponse>("{}").is_err());
        assert!(serde_json::from_str::<RecommendationResponse>(r#"{"recommendedEvents": [1, 2]}"#).is_err());
    }

    #[test]
    fn test_source_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RecommendationSource::Fallback).unwrap(), "\"fallback\"");
    }
}
