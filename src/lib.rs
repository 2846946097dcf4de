//! Campus Events - backend for browsing, booking and recommending campus events
//!
//! The recommendation flow asks a hosted generative model to rank the event
//! catalog for a student, then reconciles the returned titles against the
//! catalog so only real events reach the client.

pub mod auth;
pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{reconcile, Recommender, RecommendationRequester, RecommendationError, RecommendationOutcome};
pub use models::{Event, Booking, StudentProfile, RecommendationRequest, RecommendationResponse, RecommendationSource};
pub use services::{InferenceBackend, InferenceCall, InferenceError};
