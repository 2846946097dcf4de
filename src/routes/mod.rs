// Route exports
pub mod bookings;
pub mod events;
pub mod health;
pub mod recommendations;

use crate::config::PaymentSettings;
use crate::core::Recommender;
use crate::models::{ErrorResponse, Event};
use crate::services::{AppwriteClient, AppwriteError, CacheKey, CacheManager};
use actix_web::{http::StatusCode, web, HttpResponse};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub appwrite: Arc<AppwriteClient>,
    pub cache: Arc<CacheManager>,
    pub recommender: Recommender,
    pub payment: PaymentSettings,
}

impl AppState {
    /// Current catalog snapshot, served from cache when fresh
    pub async fn catalog(&self) -> Result<Vec<Event>, AppwriteError> {
        let key = CacheKey::catalog();

        if let Ok(events) = self.cache.get::<Vec<Event>>(&key).await {
            return Ok(events);
        }

        let events = self.appwrite.list_events().await?;

        if let Err(e) = self.cache.set(&key, &events).await {
            tracing::warn!("Failed to cache catalog: {}", e);
        }

        Ok(events)
    }

    /// Drop the cached catalog after an organizer edit
    pub async fn invalidate_catalog(&self) {
        self.cache.delete(&CacheKey::catalog()).await;
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(events::configure)
            .configure(bookings::configure)
            .configure(recommendations::configure),
    );
}

pub(crate) fn error_response(status: StatusCode, error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
    })
}

const STORE_UNAVAILABLE: &str = "The event store is temporarily unavailable. Please try again.";

/// Map a document-store failure onto an HTTP response; upstream detail is only logged
pub(crate) fn store_error(context: &str, err: &AppwriteError) -> HttpResponse {
    match err {
        AppwriteError::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Not found", err),
        _ => {
            tracing::error!("{}: {}", context, err);
            error_response(StatusCode::BAD_GATEWAY, context, STORE_UNAVAILABLE)
        }
    }
}
