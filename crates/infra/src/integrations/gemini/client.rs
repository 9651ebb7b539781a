//! Gemini API client for structured scheduling-field extraction.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;
use slotify_core::extraction::salvage_fields;
use slotify_core::{PartialFields, StructuredExtractor};
use slotify_domain::{Result, SlotifyError};
use tracing::debug;

use super::types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};
use crate::http::HttpClient;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Gemini API client implementing the structured-extraction port.
pub struct GeminiClient {
    http_client: HttpClient,
    api_key: String,
    model: String,
    max_output_tokens: u32,
    api_base: String,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: String,
        max_output_tokens: u32,
        http_client: HttpClient,
    ) -> Self {
        Self {
            http_client,
            api_key,
            model,
            max_output_tokens,
            api_base: GEMINI_API_BASE.to_string(),
        }
    }

    /// Override the API base URL (for testing against a mock server).
    #[cfg(test)]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Prompt instructing the model to return only the scheduling-field JSON
    /// object, anchored to today's date so relative phrasing resolves.
    fn build_prompt(input: &str, today: NaiveDate) -> String {
        format!(
            r#"You are a conversational calendar assistant. Today is {today}.
Extract scheduling details from this input and return ONLY valid JSON:

{{
    "intent": "book" or "check",
    "date": "YYYY-MM-DD",
    "time": "HH:MM" (24-hour),
    "reason": "Meeting title"
}}

User: "{input}"
"#,
            today = today.format("%Y-%m-%d"),
            input = input
        )
    }

    async fn generate(&self, prompt: String) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, self.model, self.api_key
        );

        let payload = GenerateContentRequest {
            contents: vec![Content { parts: vec![Part { text: prompt }] }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_output_tokens,
                temperature: DEFAULT_TEMPERATURE,
            },
        };

        let request = self.http_client.request(Method::POST, &url).json(&payload);
        let response = self.http_client.send(request).await?;

        let status = response.status();
        debug!(status = status.as_u16(), "received Gemini response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown error".to_string());
            return Err(SlotifyError::Extraction(format!(
                "extraction service returned {}: {}",
                status, body
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SlotifyError::Extraction(format!("malformed service response: {}", e)))?;

        parsed
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| SlotifyError::Extraction("service response had no candidates".into()))
    }
}

#[async_trait]
impl StructuredExtractor for GeminiClient {
    async fn extract(&self, text: &str, today: NaiveDate) -> Result<PartialFields> {
        let prompt = Self::build_prompt(text, today);
        let payload = self.generate(prompt).await?;
        Ok(salvage_fields(&payload))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(api_base: String) -> GeminiClient {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(5))
            .max_attempts(1) // No retries in tests
            .build()
            .expect("http client");

        GeminiClient::new("test-api-key".to_string(), "gemini-1.5-flash".to_string(), 512, http_client)
            .with_api_base(api_base)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 10).unwrap()
    }

    fn candidate_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": text }]
                }
            }]
        })
    }

    #[tokio::test]
    async fn extracts_fields_from_fenced_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .and(query_param("key", "test-api-key"))
            .and(body_string_contains("Today is 2025-07-10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(
                "```json\n{\"intent\": \"book\", \"date\": \"2025-07-11\", \"time\": \"15:00\", \"reason\": \"Team sync\"}\n```",
            )))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let fields = client.extract("book team sync tomorrow at 3pm", today()).await.unwrap();

        assert_eq!(fields.intent.as_deref(), Some("book"));
        assert_eq!(fields.date.as_deref(), Some("2025-07-11"));
        assert_eq!(fields.time.as_deref(), Some("15:00"));
        assert_eq!(fields.reason.as_deref(), Some("Team sync"));
    }

    #[tokio::test]
    async fn unparseable_payload_degrades_to_empty_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(
                "Sorry, I cannot help with that.",
            )))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let fields = client.extract("book something", today()).await.unwrap();

        assert!(fields.is_empty());
    }

    #[tokio::test]
    async fn service_error_status_is_an_extraction_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let result = client.extract("book something", today()).await;

        assert!(matches!(result, Err(SlotifyError::Extraction(_))));
    }

    #[tokio::test]
    async fn empty_candidate_list_is_an_extraction_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let result = client.extract("book something", today()).await;

        assert!(matches!(result, Err(SlotifyError::Extraction(_))));
    }
}
