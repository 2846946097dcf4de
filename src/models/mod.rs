// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Event, Booking, StudentProfile, RecommendationRequest, RecommendationResponse, RecommendationSource};
pub use requests::{CreateEventRequest, UpdateEventRequest, CreateBookingRequest, RecommendRequest};
pub use responses::{RecommendationsResponse, BookingResponse, TicketResponse, PaymentIntentResponse, HealthResponse, ErrorResponse, DeleteEventResponse};
