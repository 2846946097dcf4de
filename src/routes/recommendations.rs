use super::{error_response, store_error, AppState};
use crate::auth::AuthenticatedUser;
use crate::core::past_activity;
use crate::models::{RecommendRequest, RecommendationSource, RecommendationsResponse, StudentProfile};
use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/recommendations", web::post().to(recommend));
}

/// Personalized recommendations for the signed-in student
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// { "interests": ["music", "technology"] }
/// ```
///
/// Inference failures never surface here; the response `source` reports
/// whether the list came from the model or the most-recent fallback.
async fn recommend(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let catalog = match state.catalog().await {
        Ok(catalog) => catalog,
        Err(e) => return store_error("Failed to fetch events", &e),
    };

    if catalog.is_empty() {
        return HttpResponse::Ok().json(RecommendationsResponse {
            student_id: user.user_id,
            events: Vec::new(),
            source: RecommendationSource::Empty,
        });
    }

    let bookings = match state.appwrite.list_bookings(&user.user_id).await {
        Ok(bookings) => bookings,
        Err(e) => return store_error("Failed to fetch booking history", &e),
    };

    let profile = StudentProfile {
        student_id: user.user_id,
        interests: normalize_interests(&req.interests),
        past_activity: past_activity(&bookings, &catalog),
    };

    let outcome = state.recommender.recommend(&profile, &catalog).await;

    tracing::info!(
        "Returning {} recommendations for {} ({:?}, catalog {})",
        outcome.events.len(),
        profile.student_id,
        outcome.source,
        catalog.len()
    );

    HttpResponse::Ok().json(RecommendationsResponse {
        student_id: profile.student_id,
        events: outcome.events,
        source: outcome.source,
    })
}

/// Trim tags and drop blanks and case-insensitive repeats
fn normalize_interests(interests: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    interests
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.to_lowercase()))
        .map(str::to_string)
        .collect()
}
