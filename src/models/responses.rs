use serde::{Deserialize, Serialize};
use crate::models::domain::{Booking, Event, RecommendationSource};

/// Response for the recommendations endpoint.
///
/// An empty `events` list means the client should omit the section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(rename = "studentId")]
    pub student_id: String,
    pub events: Vec<Event>,
    pub source: RecommendationSource,
}

/// Confirmation returned after a booking is written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub booking: Booking,
    #[serde(rename = "qrCodeUrl")]
    pub qr_code_url: String,
}

/// A booking enriched with its event for the tickets page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketResponse {
    pub booking: Booking,
    /// `None` when the event was deleted after booking
    pub event: Option<Event>,
    #[serde(rename = "qrCodeUrl")]
    pub qr_code_url: String,
}

/// Payment instructions for an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentResponse {
    #[serde(rename = "eventId")]
    pub event_id: String,
    pub required: bool,
    pub amount: f64,
    pub currency: String,
    #[serde(rename = "upiLink", skip_serializing_if = "Option::is_none")]
    pub upi_link: Option<String>,
    #[serde(rename = "qrCodeUrl", skip_serializing_if = "Option::is_none")]
    pub qr_code_url: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Delete event response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEventResponse {
    pub success: bool,
    pub id: String,
}
