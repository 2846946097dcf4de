// Core recommendation flow and booking helpers
pub mod history;
pub mod payment;
pub mod prompt;
pub mod reconciler;
pub mod recommender;
pub mod requester;
pub mod ticket;

pub use history::past_activity;
pub use payment::{payment_intent, upi_payment_link};
pub use prompt::{build_prompt, response_schema};
pub use reconciler::reconcile;
pub use recommender::{most_recent, RecommendationOutcome, Recommender};
pub use requester::{RecommendationError, RecommendationRequester};
pub use ticket::{qr_code_url, ticket_token};
