//! HTTP client for the word-frequency service

use crate::config::ScoringConfig;
use crate::lookup::{FrequencyService, LookupOutcome};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Relevant part of a word lookup response
#[derive(Debug, Deserialize)]
struct WordResponse {
    #[serde(rename = "frequencyClass")]
    frequency_class: u32,
}

#[derive(Debug, Clone)]
pub struct HttpFrequencyService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFrequencyService {
    /// Create a new client; `base_url` is used as a prefix for the encoded word
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build word-frequency HTTP client")?;
        Ok(Self::new(config.frequency_api_url.clone(), client))
    }

    fn word_url(&self, word: &str) -> String {
        format!("{}{}", self.base_url, urlencoding::encode(word))
    }
}

#[async_trait]
impl FrequencyService for HttpFrequencyService {
    fn name(&self) -> &'static str {
        "http_frequency"
    }

    async fn frequency_class(&self, word: &str) -> LookupOutcome<u32> {
        let url = self.word_url(word);
        debug!("Fetching frequency class from {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return LookupOutcome::Failed(format!("request to {url} failed: {e}")),
        };

        if !response.status().is_success() {
            debug!("Frequency lookup for '{}' returned {}", word, response.status());
            return LookupOutcome::NotFound;
        }

        match response.json::<WordResponse>().await {
            Ok(body) => LookupOutcome::Found(body.frequency_class),
            Err(e) => LookupOutcome::Failed(format!("malformed frequency response for '{word}': {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};

    /// Serve `router` on a loopback port; the returned URL expects a word appended
    async fn serve(router: Router) -> HttpFrequencyService {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        HttpFrequencyService::new(format!("http://{}/word/", addr), reqwest::Client::new())
    }

    #[test]
    fn test_word_url_is_encoded() {
        let service = HttpFrequencyService::new("http://example.test/word/", reqwest::Client::new());
        assert_eq!(service.word_url("Hund"), "http://example.test/word/Hund");
        assert_eq!(service.word_url("größe"), "http://example.test/word/gr%C3%B6%C3%9Fe");
    }

    #[test]
    fn test_parse_word_response() {
        let body = r#"{"id":1234,"word":"Hund","freq":5120,"frequencyClass":9}"#;
        let parsed: WordResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.frequency_class, 9);
    }

    #[tokio::test]
    async fn test_frequency_class_over_http() {
        let router = Router::new().route(
            "/word/:word",
            get(|| async { Json(serde_json::json!({"word": "Hund", "frequencyClass": 9})) }),
        );
        let service = serve(router).await;
        assert_eq!(service.frequency_class("Hund").await, LookupOutcome::Found(9));
    }

    #[tokio::test]
    async fn test_error_status_is_not_found() {
        let service = serve(Router::new().route("/word/:word", get(|| async { StatusCode::NOT_FOUND }))).await;
        assert_eq!(service.frequency_class("Xyzzy").await, LookupOutcome::NotFound);

        let service = serve(Router::new().route(
            "/word/:word",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        ))
        .await;
        assert_eq!(service.frequency_class("Hund").await, LookupOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_unreadable_body_is_failed() {
        let service = serve(Router::new().route("/word/:word", get(|| async { "not json" }))).await;
        assert!(matches!(
            service.frequency_class("Hund").await,
            LookupOutcome::Failed(_)
        ));
    }

    #[tokio::test]
    #[ignore] // Requires network access to the frequency service
    async fn test_frequency_service_integration() {
        let service = HttpFrequencyService::from_config(&ScoringConfig::default()).unwrap();
        let outcome = service.frequency_class("Hund").await;
        assert!(matches!(outcome, LookupOutcome::Found(_)));
    }
}
