use crate::core::reconciler::reconcile;
use crate::core::requester::RecommendationRequester;
use crate::models::{Event, RecommendationSource, StudentProfile};
use std::collections::HashSet;

/// Default number of events returned when the model cannot be consulted
pub const DEFAULT_FALLBACK_COUNT: usize = 5;

/// Result of a recommendation run
#[derive(Debug, Clone)]
pub struct RecommendationOutcome {
    pub events: Vec<Event>,
    pub source: RecommendationSource,
}

impl RecommendationOutcome {
    fn empty() -> Self {
        Self {
            events: Vec::new(),
            source: RecommendationSource::Empty,
        }
    }
}

/// Caller-side orchestration of the recommendation flow
///
/// # Policy
/// 1. Empty catalog: nothing to recommend, the backend is not called
/// 2. Backend answer: reconciled against the catalog, attended events removed
/// 3. Backend failure or malformed answer: most recent unattended events
#[derive(Clone)]
pub struct Recommender {
    requester: RecommendationRequester,
    fallback_count: usize,
}

impl Recommender {
    pub fn new(requester: RecommendationRequester, fallback_count: usize) -> Self {
        Self {
            requester,
            fallback_count,
        }
    }

    /// Recommend events from `catalog` for `profile`.
    ///
    /// Never fails: backend problems degrade to the fallback list.
    pub async fn recommend(&self, profile: &StudentProfile, catalog: &[Event]) -> RecommendationOutcome {
        if catalog.is_empty() {
            return RecommendationOutcome::empty();
        }

        let titles = catalog_titles(catalog);
        let attended: HashSet<&str> = profile.past_activity.iter().map(String::as_str).collect();

        match self.requester.request_recommendations(profile, &titles).await {
            Ok(response) => {
                let events: Vec<Event> = reconcile(&response, catalog)
                    .into_iter()
                    .filter(|event| !attended.contains(event.title.as_str()))
                    .collect();

                tracing::debug!(
                    "Model returned {} titles for {}, {} reconciled",
                    response.recommended_events.len(),
                    profile.student_id,
                    events.len()
                );

                RecommendationOutcome {
                    events,
                    source: RecommendationSource::Model,
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Recommendation backend failed for {}, using most recent events: {}",
                    profile.student_id,
                    e
                );

                RecommendationOutcome {
                    events: most_recent(catalog, &attended, self.fallback_count),
                    source: RecommendationSource::Fallback,
                }
            }
        }
    }
}

/// Distinct catalog titles in catalog order
fn catalog_titles(catalog: &[Event]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(catalog.len());
    catalog
        .iter()
        .filter(|event| seen.insert(event.title.as_str()))
        .map(|event| event.title.clone())
        .collect()
}

/// The `limit` latest events by date, skipping titles in `exclude`
pub fn most_recent(catalog: &[Event], exclude: &HashSet<&str>, limit: usize) -> Vec<Event> {
    let mut events: Vec<&Event> = catalog
        .iter()
        .filter(|event| !exclude.contains(event.title.as_str()))
        .collect();

    // Stable sort keeps catalog order for events on the same date
    events.sort_by(|a, b| b.date.cmp(&a.date));

    events.into_iter().take(limit).cloned().collect()
}
