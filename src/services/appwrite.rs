use crate::models::{Booking, Event, UpdateEventRequest};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Upper bound on documents fetched per list query
const LIST_LIMIT: usize = 500;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Appwrite API client
///
/// Handles all communication with the document database including:
/// - Reading the event catalog
/// - Organizer edits to events
/// - Writing and listing bookings
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub events: String,
    pub bookings: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        })
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection
        )
    }

    fn document_url(&self, collection: &str, document_id: &str) -> String {
        format!(
            "{}/{}",
            self.documents_url(collection),
            urlencoding::encode(document_id)
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
    }

    /// Fetch the full event catalog, newest date first
    pub async fn list_events(&self) -> Result<Vec<Event>, AppwriteError> {
        let queries = vec![
            "orderDesc(\"date\")".to_string(),
            format!("limit({})", LIST_LIMIT),
        ];

        let mut events: Vec<Event> = self
            .list_documents(&self.collections.events, &queries)
            .await?;

        events.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::debug!("Fetched {} events", events.len());

        Ok(events)
    }

    /// Get a single event by ID
    pub async fn get_event(&self, event_id: &str) -> Result<Event, AppwriteError> {
        let url = self.document_url(&self.collections.events, event_id);

        tracing::debug!("Fetching event: {}", event_id);

        let response = self.authorized(self.client.get(&url)).send().await?;
        let response = check_status(response, &format!("event {}", event_id)).await?;

        let doc: Value = response.json().await?;
        parse_document(&doc)
    }

    /// Create an event document keyed by the event ID
    pub async fn create_event(&self, event: &Event) -> Result<Event, AppwriteError> {
        let url = self.documents_url(&self.collections.events);
        let payload = document_payload(&event.id, event)?;

        let response = self
            .authorized(self.client.post(&url))
            .json(&payload)
            .send()
            .await?;
        let response = check_status(response, &format!("event {}", event.id)).await?;

        tracing::info!("Created event {} ({})", event.id, event.title);

        let doc: Value = response.json().await?;
        parse_document(&doc)
    }

    /// Apply an organizer edit to an event
    pub async fn update_event(
        &self,
        event_id: &str,
        patch: &UpdateEventRequest,
    ) -> Result<Event, AppwriteError> {
        let url = self.document_url(&self.collections.events, event_id);
        let data = serde_json::to_value(patch)
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to encode update: {}", e)))?;

        let response = self
            .authorized(self.client.patch(&url))
            .json(&json!({ "data": data }))
            .send()
            .await?;
        let response = check_status(response, &format!("event {}", event_id)).await?;

        tracing::info!("Updated event {}", event_id);

        let doc: Value = response.json().await?;
        parse_document(&doc)
    }

    /// Delete an event. Existing bookings keep their event ID.
    pub async fn delete_event(&self, event_id: &str) -> Result<(), AppwriteError> {
        let url = self.document_url(&self.collections.events, event_id);

        let response = self.authorized(self.client.delete(&url)).send().await?;
        check_status(response, &format!("event {}", event_id)).await?;

        tracing::info!("Deleted event {}", event_id);

        Ok(())
    }

    /// List a user's bookings, most recent first
    pub async fn list_bookings(&self, user_id: &str) -> Result<Vec<Booking>, AppwriteError> {
        let queries = vec![
            format!("equal(\"userId\", [{}])", quoted(user_id)),
            "orderDesc(\"bookingDate\")".to_string(),
            format!("limit({})", LIST_LIMIT),
        ];

        let mut bookings: Vec<Booking> = self
            .list_documents(&self.collections.bookings, &queries)
            .await?;

        bookings.retain(|b| b.user_id == user_id);
        bookings.sort_by(|a, b| b.booking_date.cmp(&a.booking_date));

        tracing::debug!("User {} has {} bookings", user_id, bookings.len());

        Ok(bookings)
    }

    /// Write a booking. The booking only exists once this returns `Ok`.
    pub async fn create_booking(&self, booking: &Booking) -> Result<Booking, AppwriteError> {
        let url = self.documents_url(&self.collections.bookings);
        let payload = document_payload(&booking.id, booking)?;

        let response = self
            .authorized(self.client.post(&url))
            .json(&payload)
            .send()
            .await?;
        let response = check_status(response, &format!("booking {}", booking.id)).await?;

        tracing::debug!("Recorded booking: {} -> {}", booking.user_id, booking.event_id);

        let doc: Value = response.json().await?;
        parse_document(&doc)
    }

    /// Check that the database is reachable with our credentials
    pub async fn health_check(&self) -> Result<bool, AppwriteError> {
        let url = format!(
            "{}/databases/{}",
            self.base_url.trim_end_matches('/'),
            self.database_id
        );

        let response = self.authorized(self.client.get(&url)).send().await?;
        Ok(response.status().is_success())
    }

    async fn list_documents<T: DeserializeOwned>(
        &self,
        collection: &str,
        queries: &[String],
    ) -> Result<Vec<T>, AppwriteError> {
        let url = self.documents_url(collection);
        let params: Vec<(&str, &str)> = queries
            .iter()
            .map(|q| ("queries[]", q.as_str()))
            .collect();

        let response = self
            .authorized(self.client.get(&url))
            .query(&params)
            .send()
            .await?;
        let response = check_status(response, collection).await?;

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        let parsed = documents
            .iter()
            .filter_map(|doc| match parse_document(doc) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!("Skipping malformed document in {}: {}", collection, e);
                    None
                }
            })
            .collect();

        Ok(parsed)
    }
}

async fn check_status(response: Response, what: &str) -> Result<Response, AppwriteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::NOT_FOUND => Err(AppwriteError::NotFound(what.to_string())),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppwriteError::Unauthorized),
        _ => {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Appwrite request for {} failed: {} - {}", what, status, body);
            Err(AppwriteError::ApiError(format!("{} ({})", status, what)))
        }
    }
}

/// Build a create-document body; the record ID becomes the document ID
fn document_payload<T: serde::Serialize>(id: &str, record: &T) -> Result<Value, AppwriteError> {
    let mut data = serde_json::to_value(record)
        .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to encode document: {}", e)))?;

    if let Some(obj) = data.as_object_mut() {
        obj.remove("id");
    }

    Ok(json!({ "documentId": id, "data": data }))
}

/// Decode an Appwrite document, mapping `$id` onto the record's `id`
fn parse_document<T: DeserializeOwned>(doc: &Value) -> Result<T, AppwriteError> {
    let mut data = doc.get("data").unwrap_or(doc).clone();

    if let (Some(obj), Some(id)) = (data.as_object_mut(), doc.get("$id")) {
        obj.entry("id").or_insert_with(|| id.clone());
    }

    serde_json::from_value(data)
        .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse document: {}", e)))
}

fn quoted(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mockito::Matcher;

    fn client(base_url: String) -> AppwriteClient {
        AppwriteClient::new(
            base_url,
            "test_key".to_string(),
            "test_project".to_string(),
            "test_db".to_string(),
            AppwriteCollections {
                events: "events".to_string(),
                bookings: "bookings".to_string(),
            },
        )
        .unwrap()
    }

    fn event_doc(id: &str, title: &str, date: &str) -> Value {
        json!({
            "$id": id,
            "$collectionId": "events",
            "title": title,
            "description": "An event",
            "date": date,
            "venue": "Hall",
            "price": 0,
            "committeeId": "club"
        })
    }

    #[test]
    fn test_appwrite_client_creation() {
        let client = client("https://appwrite.test/v1/".to_string());

        assert_eq!(client.base_url, "https://appwrite.test/v1/");
        assert_eq!(client.api_key, "test_key");
        assert_eq!(
            client.documents_url("events"),
            "https://appwrite.test/v1/databases/test_db/collections/events/documents"
        );
    }

    #[test]
    fn test_parse_document_uses_dollar_id() {
        let event: Event = parse_document(&event_doc("evt-9", "Open Mic", "2026-11-01T18:00:00.000+00:00")).unwrap();
        assert_eq!(event.id, "evt-9");
        assert_eq!(event.date, Utc.with_ymd_and_hms(2026, 11, 1, 18, 0, 0).unwrap());
    }

    #[test]
    fn test_document_payload_moves_id() {
        let booking = Booking {
            id: "b-1".to_string(),
            event_id: "evt-1".to_string(),
            user_id: "u-1".to_string(),
            booking_date: Utc::now(),
            qr_code: "tkt-u-1-evt-".to_string(),
        };

        let payload = document_payload(&booking.id, &booking).unwrap();
        assert_eq!(payload["documentId"], "b-1");
        assert!(payload["data"].get("id").is_none());
        assert_eq!(payload["data"]["qrCode"], "tkt-u-1-evt-");
    }

    #[test]
    fn test_quoted_escapes() {
        assert_eq!(quoted("a\"b"), r#""a\"b""#);
    }

    #[tokio::test]
    async fn test_list_events_sorted_and_skips_malformed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/databases/test_db/collections/events/documents")
            .match_query(Matcher::Any)
            .match_header("X-Appwrite-Key", "test_key")
            .match_header("X-Appwrite-Project", "test_project")
            .with_status(200)
            .with_body(
                json!({
                    "total": 3,
                    "documents": [
                        event_doc("e1", "Older", "2026-10-01T10:00:00Z"),
                        { "$id": "broken", "title": "No date" },
                        event_doc("e2", "Newer", "2026-12-01T10:00:00Z")
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let events = client(server.url()).list_events().await.unwrap();

        mock.assert_async().await;
        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Newer", "Older"]);
    }

    #[tokio::test]
    async fn test_get_event_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/databases/test_db/collections/events/documents/missing")
            .with_status(404)
            .with_body(r#"{"message": "Document not found"}"#)
            .create_async()
            .await;

        let err = client(server.url()).get_event("missing").await.unwrap_err();
        assert!(matches!(err, AppwriteError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_booking_failure_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/databases/test_db/collections/bookings/documents")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let booking = Booking {
            id: "b-1".to_string(),
            event_id: "evt-1".to_string(),
            user_id: "u-1".to_string(),
            booking_date: Utc::now(),
            qr_code: "tkt-u-1-evt-".to_string(),
        };

        let err = client(server.url()).create_booking(&booking).await.unwrap_err();
        assert!(matches!(err, AppwriteError::ApiError(_)));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/databases/test_db/collections/events/documents/e1")
            .with_status(401)
            .create_async()
            .await;

        let err = client(server.url()).delete_event("e1").await.unwrap_err();
        assert!(matches!(err, AppwriteError::Unauthorized));
    }
}
