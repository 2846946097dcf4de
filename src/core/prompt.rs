use crate::models::RecommendationRequest;
use serde_json::{json, Value};

/// Fewest events the model is asked to recommend
pub const MIN_RECOMMENDATIONS: usize = 3;
/// Most events the model is asked to recommend
pub const MAX_RECOMMENDATIONS: usize = 5;

/// JSON schema the backend's output must match
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recommendedEvents": {
                "type": "ARRAY",
                "description": "Titles of recommended events, copied exactly from the list of available events, best match first.",
                "items": { "type": "STRING" }
            }
        },
        "required": ["recommendedEvents"]
    })
}

/// Render the recommendation prompt for a request.
///
/// Interests, past activity and the candidate titles are embedded verbatim so
/// the model can copy titles back exactly.
pub fn build_prompt(request: &RecommendationRequest) -> String {
    let mut prompt = String::with_capacity(1024 + request.all_events.len() * 48);

    prompt.push_str(
        "You are an assistant that recommends campus events to college students.\n\
         Choose events for the student from the list of available events below.\n\n",
    );

    prompt.push_str("Student interests: ");
    prompt.push_str(&join_or(&request.interests, "none stated"));
    prompt.push_str("\n\n");

    prompt.push_str("Events the student already attended (never recommend these):\n");
    push_list(&mut prompt, &request.past_activity, "- ");
    prompt.push('\n');

    prompt.push_str("Available events:\n");
    push_numbered(&mut prompt, &request.all_events);
    prompt.push('\n');

    prompt.push_str(&format!(
        "Rules:\n\
         - Recommend between {min} and {max} events, fewer only if fewer are available.\n\
         - Put events that match the student's interests first.\n\
         - Include 1 or 2 discovery picks: popular or loosely related events that are not an obvious interest match.\n\
         - Do not recommend any event the student already attended.\n\
         - Only use titles from the list of available events, copied exactly.\n\
         Respond with JSON of the form {{\"recommendedEvents\": [\"<title>\", ...]}}.\n",
        min = MIN_RECOMMENDATIONS,
        max = MAX_RECOMMENDATIONS,
    ));

    prompt
}

fn join_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}

fn push_list(out: &mut String, items: &[String], bullet: &str) {
    if items.is_empty() {
        out.push_str("(none)\n");
        return;
    }
    for item in items {
        out.push_str(bullet);
        out.push_str(item);
        out.push('\n');
    }
}

fn push_numbered(out: &mut String, items: &[String]) {
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, item));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RecommendationRequest {
        RecommendationRequest {
            student_id: "student123".to_string(),
            interests: vec!["music".to_string(), "technology".to_string()],
            past_activity: vec!["Art in Bloom".to_string()],
            all_events: vec!["Tech Summit".to_string(), "Music Fest".to_string()],
        }
    }

    #[test]
    fn test_prompt_embeds_profile_and_catalog() {
        let prompt = build_prompt(&request());

        assert!(prompt.contains("Student interests: music, technology"));
        assert!(prompt.contains("- Art in Bloom\n"));
        assert!(prompt.contains("1. Tech Summit\n2. Music Fest\n"));
        assert!(prompt.contains("between 3 and 5 events"));
        assert!(prompt.contains("discovery picks"));
    }

    #[test]
    fn test_prompt_handles_empty_profile() {
        let mut req = request();
        req.interests.clear();
        req.past_activity.clear();

        let prompt = build_prompt(&req);

        assert!(prompt.contains("Student interests: none stated"));
        assert!(prompt.contains("(never recommend these):\n(none)\n"));
    }

    #[test]
    fn test_schema_requires_titles() {
        let schema = response_schema();
        assert_eq!(schema["required"][0], "recommendedEvents");
        assert_eq!(schema["properties"]["recommendedEvents"]["items"]["type"], "STRING");
    }
}
