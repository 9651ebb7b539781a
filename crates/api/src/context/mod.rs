//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use slotify_core::{Assistant, CalendarPort, StructuredExtractor};
use slotify_domain::{Config, Result, SlotifyError};
use slotify_infra::{config as config_loader, GeminiClient, GoogleCalendarClient, HttpClient};
use tracing::info;

use crate::compose::{self, ChatReply};

/// Application context - holds the configuration and the wired assistant.
pub struct AppContext {
    pub config: Config,
    assistant: Assistant,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build the context from loaded configuration and environment
    /// credentials (`SLOTIFY_GEMINI_API_KEY`, `SLOTIFY_GCAL_ACCESS_TOKEN`).
    pub fn new() -> Result<Self> {
        let config = config_loader::load()?;

        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("slotify")
            .build()?;

        let gemini_key = required_env("SLOTIFY_GEMINI_API_KEY")?;
        let calendar_token = required_env("SLOTIFY_GCAL_ACCESS_TOKEN")?;

        let extractor: Arc<dyn StructuredExtractor> = Arc::new(GeminiClient::new(
            gemini_key,
            config.extraction.model.clone(),
            config.extraction.max_output_tokens,
            http_client.clone(),
        ));
        let calendar: Arc<dyn CalendarPort> = Arc::new(GoogleCalendarClient::new(
            calendar_token,
            config.calendar.calendar_id.clone(),
            http_client,
        ));

        info!(timezone = %config.timezone, model = %config.extraction.model, "context initialized");
        Self::with_ports(config, extractor, calendar)
    }

    /// Build the context with explicit port implementations. Used by tests
    /// and by embedders that bring their own adapters.
    pub fn with_ports(
        config: Config,
        extractor: Arc<dyn StructuredExtractor>,
        calendar: Arc<dyn CalendarPort>,
    ) -> Result<Self> {
        let assistant = Assistant::new(&config, extractor, calendar)?;
        Ok(Self { config, assistant })
    }

    /// Process one chat message into a composed reply.
    pub async fn process_message(&self, input: &str) -> Result<ChatReply> {
        let outcome = self.assistant.process(input).await?;
        Ok(compose::compose(outcome))
    }

    /// Direct access to the assistant, for callers that need the structured
    /// outcome with an explicit reference instant.
    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }
}

fn required_env(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| SlotifyError::Config(format!("Missing required environment variable: {}", key)))
}
