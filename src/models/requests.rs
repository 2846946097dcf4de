use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Organizer request to create an event
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(custom(function = "title_long_enough"))]
    pub title: String,
    #[validate(length(min = 10, message = "Description must be at least 10 characters."))]
    pub description: String,
    #[validate(custom(function = "not_in_past"))]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub venue: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be a positive number."))]
    pub price: f64,
    #[serde(alias = "committee_id", rename = "committeeId", default)]
    pub committee_id: Option<String>,
    #[validate(url)]
    #[serde(alias = "image_url", rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

/// Organizer edit. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(custom(function = "title_long_enough"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[validate(length(min = 10, message = "Description must be at least 10 characters."))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be a positive number."))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(alias = "committee_id", rename = "committeeId", skip_serializing_if = "Option::is_none")]
    pub committee_id: Option<String>,
    #[validate(url)]
    #[serde(alias = "image_url", rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl UpdateEventRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.venue.is_none()
            && self.price.is_none()
            && self.committee_id.is_none()
            && self.image_url.is_none()
    }

    /// Same edit with the title stored the way `create` stores it
    pub fn normalized(mut self) -> Self {
        self.title = self.title.map(|t| t.trim().to_string());
        self
    }
}

/// Request to book a ticket for the signed-in user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "event_id", rename = "eventId")]
    pub event_id: String,
}

/// Request for personalized recommendations.
///
/// The student is identified by the bearer token and past activity comes from
/// their bookings, so only interests travel in the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(max = 20))]
    #[serde(default)]
    pub interests: Vec<String>,
}

const MIN_TITLE_CHARS: usize = 3;

// Titles are stored trimmed, so padding does not count towards the minimum
fn title_long_enough(title: &str) -> Result<(), ValidationError> {
    if title.trim().chars().count() < MIN_TITLE_CHARS {
        let mut err = ValidationError::new("length");
        err.message = Some("Event title must be at least 3 characters.".into());
        return Err(err);
    }
    Ok(())
}

fn not_in_past(date: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *date < Utc::now() {
        let mut err = ValidationError::new("date_in_past");
        err.message = Some("Event date cannot be in the past.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_request() -> CreateEventRequest {
        CreateEventRequest {
            title: "Campus Music Fest".to_string(),
            description: "Live bands on the quad all evening".to_string(),
            date: Utc::now() + Duration::days(7),
            venue: None,
            price: 150.0,
            committee_id: None,
            image_url: None,
        }
    }

    #[test]
    fn test_valid_create_request() {
        assert!(create_request().validate().is_ok());
    }

    #[test]
    fn test_short_title_rejected() {
        let mut req = create_request();
        req.title = "Fe".to_string();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_blank_padded_title_rejected() {
        let mut req = create_request();
        req.title = "      ".to_string();
        assert!(req.validate().unwrap_err().field_errors().contains_key("title"));

        req.title = "  Fe  ".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_title_checked_and_trimmed() {
        let blank = UpdateEventRequest {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(blank.validate().unwrap_err().field_errors().contains_key("title"));

        let padded = UpdateEventRequest {
            title: Some(" Jazz Night ".to_string()),
            ..Default::default()
        };
        assert!(padded.validate().is_ok());
        assert_eq!(padded.normalized().title.as_deref(), Some("Jazz Night"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut req = create_request();
        req.price = -1.0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_past_date_rejected() {
        let mut req = create_request();
        req.date = Utc::now() - Duration::days(1);
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("date"));
    }

    #[test]
    fn test_update_request_partial_validation() {
        let req = UpdateEventRequest {
            price: Some(0.0),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
        assert!(!req.is_empty());
        assert!(UpdateEventRequest::default().is_empty());

        let bad = UpdateEventRequest {
            description: Some("short".to_string()),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_booking_request_accepts_snake_case_alias() {
        let req: CreateBookingRequest = serde_json::from_str(r#"{"event_id": "evt-1"}"#).unwrap();
        assert_eq!(req.event_id, "evt-1");
    }
}
