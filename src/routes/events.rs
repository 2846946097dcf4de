use super::{error_response, store_error, AppState};
use crate::auth::AuthenticatedUser;
use crate::core::payment_intent;
use crate::models::{CreateEventRequest, DeleteEventResponse, Event, UpdateEventRequest};
use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

/// Placeholder for venue and committee when the organizer leaves them blank
const TO_BE_DECIDED: &str = "TBD";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/events", web::get().to(list_events))
        .route("/events", web::post().to(create_event))
        .route("/events/{id}", web::get().to(get_event))
        .route("/events/{id}", web::patch().to(update_event))
        .route("/events/{id}", web::delete().to(delete_event))
        .route("/events/{id}/payment", web::get().to(get_payment_intent));
}

/// Event catalog, newest date first
///
/// GET /api/v1/events
async fn list_events(state: web::Data<AppState>) -> impl Responder {
    match state.catalog().await {
        Ok(events) => HttpResponse::Ok().json(events),
        Err(e) => store_error("Failed to fetch events", &e),
    }
}

/// GET /api/v1/events/{id}
async fn get_event(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.appwrite.get_event(&path).await {
        Ok(event) => HttpResponse::Ok().json(event),
        Err(e) => store_error("Failed to fetch event", &e),
    }
}

/// Create an event from the organizer dashboard
///
/// POST /api/v1/events
///
/// Request body:
/// ```json
/// {
///   "title": "Campus Music Fest",
///   "description": "Live bands on the quad",
///   "date": "2026-11-02T18:00:00Z",
///   "price": 150,
///   "venue": "Main Quad",
///   "committeeId": "music-club",
///   "imageUrl": "https://..."
/// }
/// ```
async fn create_event(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CreateEventRequest>,
) -> impl Responder {
    if let Some(denied) = require_organizer(&user) {
        return denied;
    }

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_event request: {:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let req = req.into_inner();
    let event = Event {
        id: format!("evt-{}", uuid::Uuid::new_v4().simple()),
        title: req.title.trim().to_string(),
        description: req.description,
        date: req.date,
        venue: non_blank_or_tbd(req.venue),
        price: req.price,
        committee_id: non_blank_or_tbd(req.committee_id),
        image_url: req.image_url,
    };

    match state.appwrite.create_event(&event).await {
        Ok(created) => {
            state.invalidate_catalog().await;
            tracing::info!("Organizer {} created event {}", user.user_id, created.id);
            HttpResponse::Created().json(created)
        }
        Err(e) => store_error("Failed to create event", &e),
    }
}

/// Edit an existing event; the event ID never changes
///
/// PATCH /api/v1/events/{id}
async fn update_event(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    req: web::Json<UpdateEventRequest>,
) -> impl Responder {
    if let Some(denied) = require_organizer(&user) {
        return denied;
    }

    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    if req.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", "No fields to update");
    }

    let patch = req.into_inner().normalized();

    match state.appwrite.update_event(&path, &patch).await {
        Ok(updated) => {
            state.invalidate_catalog().await;
            tracing::info!("Organizer {} updated event {}", user.user_id, updated.id);
            HttpResponse::Ok().json(updated)
        }
        Err(e) => store_error("Failed to update event", &e),
    }
}

/// DELETE /api/v1/events/{id}
async fn delete_event(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> impl Responder {
    if let Some(denied) = require_organizer(&user) {
        return denied;
    }

    let event_id = path.into_inner();

    match state.appwrite.delete_event(&event_id).await {
        Ok(()) => {
            state.invalidate_catalog().await;
            tracing::info!("Organizer {} deleted event {}", user.user_id, event_id);
            HttpResponse::Ok().json(DeleteEventResponse {
                success: true,
                id: event_id,
            })
        }
        Err(e) => store_error("Failed to delete event", &e),
    }
}

/// Payment instructions shown before a booking is confirmed
///
/// GET /api/v1/events/{id}/payment
async fn get_payment_intent(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.appwrite.get_event(&path).await {
        Ok(event) => HttpResponse::Ok().json(payment_intent(
            &event,
            &state.payment.upi_id,
            &state.payment.payee_name,
        )),
        Err(e) => store_error("Failed to fetch event", &e),
    }
}

/// Anonymous sessions can browse and book but not manage listings
fn require_organizer(user: &AuthenticatedUser) -> Option<HttpResponse> {
    if user.is_anonymous() {
        return Some(error_response(
            StatusCode::FORBIDDEN,
            "Forbidden",
            "Sign in with an email account to manage events",
        ));
    }
    None
}

fn non_blank_or_tbd(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| TO_BE_DECIDED.to_string())
}
