use crate::models::{Event, RecommendationResponse};
use std::collections::HashSet;

/// Map backend titles back to catalog events.
///
/// - Titles with no catalog entry are dropped.
/// - Backend order is kept, it is the relevance ranking.
/// - A repeated title is returned once, at its first position.
/// - When the catalog holds several events with the same title, the first wins.
/// - Surrounding whitespace is ignored on both sides.
pub fn reconcile(response: &RecommendationResponse, catalog: &[Event]) -> Vec<Event> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(response.recommended_events.len());

    response
        .recommended_events
        .iter()
        .map(|title| title.trim())
        .filter(|title| seen.insert(*title))
        .filter_map(|title| {
            let found = catalog.iter().find(|event| event.title.trim() == title);
            if found.is_none() {
                tracing::debug!("Dropping recommended title not in catalog: {:?}", title);
            }
            found.cloned()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(id: &str, title: &str) -> Event {
        Event {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("About {}", title),
            date: Utc.with_ymd_and_hms(2026, 11, 1, 18, 0, 0).unwrap(),
            venue: "Main Hall".to_string(),
            price: 0.0,
            committee_id: "committee".to_string(),
            image_url: None,
        }
    }

    fn response(titles: &[&str]) -> RecommendationResponse {
        RecommendationResponse {
            recommended_events: titles.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn titles(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_preserves_backend_order() {
        let catalog = vec![event("1", "A"), event("2", "B"), event("3", "C"), event("4", "D")];

        let result = reconcile(&response(&["B", "A", "C"]), &catalog);

        assert_eq!(titles(&result), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_padded_catalog_title_still_matches() {
        let catalog = vec![event("1", " Jazz Night "), event("2", "Music Fest")];

        let result = reconcile(&response(&[" Jazz Night ", "Jazz Night"]), &catalog);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");
    }

    #[test]
    fn test_drops_unknown_titles() {
        let catalog = vec![event("1", "Tech Summit"), event("2", "Music Fest")];

        let result = reconcile(&response(&["Unknown Gala", "Music Fest"]), &catalog);

        assert_eq!(titles(&result), vec!["Music Fest"]);
    }

    #[test]
    fn test_duplicate_titles_returned_once() {
        let catalog = vec![event("1", "Tech Summit"), event("2", "Music Fest")];

        let result = reconcile(&response(&["Music Fest", "Tech Summit", "Music Fest"]), &catalog);

        assert_eq!(titles(&result), vec!["Music Fest", "Tech Summit"]);
    }

    #[test]
    fn test_first_catalog_match_wins() {
        let catalog = vec![event("first", "Open Mic"), event("second", "Open Mic")];

        let result = reconcile(&response(&["Open Mic"]), &catalog);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "first");
    }

    #[test]
    fn test_trims_whitespace_but_matches_case_exactly() {
        let catalog = vec![event("1", "Music Fest")];

        let result = reconcile(&response(&["  Music Fest ", "music fest"]), &catalog);

        assert_eq!(titles(&result), vec!["Music Fest"]);
    }

    #[test]
    fn test_every_result_is_in_catalog() {
        let catalog = vec![event("1", "A"), event("2", "B")];
        let noisy = response(&["", "A", "Z", "B", "A ", "b", "C"]);

        let result = reconcile(&noisy, &catalog);

        assert!(result.iter().all(|e| catalog.contains(e)));
        assert_eq!(titles(&result), vec!["A", "B"]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(reconcile(&response(&[]), &[event("1", "A")]).is_empty());
        assert!(reconcile(&response(&["A"]), &[]).is_empty());
    }
}
