//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use slotify_domain::SlotifyError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SlotifyError);

impl From<InfraError> for SlotifyError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SlotifyError> for InfraError {
    fn from(value: SlotifyError) -> Self {
        InfraError(value)
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(http_to_domain(value))
    }
}

fn http_to_domain(err: HttpError) -> SlotifyError {
    if err.is_timeout() {
        return SlotifyError::Network("HTTP request timed out".into());
    }

    if err.is_connect() {
        return SlotifyError::Network("HTTP connection failure".into());
    }

    if let Some(status) = err.status() {
        let code = status.as_u16();
        let message =
            format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

        return match code {
            400..=499 => SlotifyError::InvalidInput(message),
            _ => SlotifyError::Network(message),
        };
    }

    SlotifyError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn http_status_400_maps_to_invalid_input() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::BAD_REQUEST))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: SlotifyError = InfraError::from(error).into();
        match mapped {
            SlotifyError::InvalidInput(msg) => assert!(msg.contains("400")),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn http_status_500_maps_to_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::INTERNAL_SERVER_ERROR))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: SlotifyError = InfraError::from(error).into();
        assert!(matches!(mapped, SlotifyError::Network(_)));
    }
}
