use super::{error_response, store_error, AppState};
use crate::auth::AuthenticatedUser;
use crate::core::ticket::{qr_code_url, ticket_token, TICKET_QR_SIZE};
use crate::models::{Booking, BookingResponse, CreateBookingRequest, Event, TicketResponse};
use crate::services::AppwriteError;
use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::collections::HashMap;
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/bookings", web::post().to(create_booking))
        .route("/tickets", web::get().to(list_tickets));
}

/// Book a ticket for the signed-in user
///
/// POST /api/v1/bookings
///
/// Request body:
/// ```json
/// { "eventId": "string" }
/// ```
async fn create_booking(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CreateBookingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let event = match state.appwrite.get_event(&req.event_id).await {
        Ok(event) => event,
        Err(e) => return store_error("Failed to fetch event", &e),
    };

    let booking = Booking {
        id: uuid::Uuid::new_v4().simple().to_string(),
        event_id: event.id.clone(),
        user_id: user.user_id.clone(),
        booking_date: chrono::Utc::now(),
        qr_code: ticket_token(&user.user_id, &event.id),
    };

    match state.appwrite.create_booking(&booking).await {
        Ok(saved) => {
            tracing::info!("Booked {} for user {}", event.title, user.user_id);
            HttpResponse::Created().json(BookingResponse {
                qr_code_url: qr_code_url(&saved.qr_code, TICKET_QR_SIZE),
                booking: saved,
            })
        }
        Err(e) => {
            tracing::error!("Booking write failed for {} -> {}: {}", user.user_id, event.id, e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not book ticket",
                "Could not book ticket. Please try again.",
            )
        }
    }
}

/// The signed-in user's tickets, most recent booking first
///
/// GET /api/v1/tickets
async fn list_tickets(state: web::Data<AppState>, user: AuthenticatedUser) -> impl Responder {
    let result = async {
        let bookings = state.appwrite.list_bookings(&user.user_id).await?;
        let catalog = state.catalog().await?;
        Ok::<_, AppwriteError>(enrich(bookings, &catalog))
    }
    .await;

    match result {
        Ok(tickets) => HttpResponse::Ok().json(tickets),
        Err(e) => store_error("Failed to fetch tickets", &e),
    }
}

/// Attach each booking's event and ticket QR image
fn enrich(bookings: Vec<Booking>, catalog: &[Event]) -> Vec<TicketResponse> {
    let by_id: HashMap<&str, &Event> = catalog.iter().map(|e| (e.id.as_str(), e)).collect();

    bookings
        .into_iter()
        .map(|booking| TicketResponse {
            event: by_id.get(booking.event_id.as_str()).map(|e| (*e).clone()),
            qr_code_url: qr_code_url(&booking.qr_code, TICKET_QR_SIZE),
            booking,
        })
        .collect()
}
