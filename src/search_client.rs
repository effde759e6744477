//! HTTP client for the context-search (result count) service

use crate::config::ScoringConfig;
use crate::lookup::{ContextQuery, LookupOutcome, SearchHits, SearchService};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Fixed locale and output parameters appended to every search
const SEARCH_PARAMS: &[(&str, &str)] = &[
    ("google_domain", "google.de"),
    ("location", "Germany"),
    ("gl", "de"),
    ("hl", "de"),
    ("page", "1"),
    ("output", "json"),
];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    request_info: RequestInfo,
    #[serde(default)]
    search_information: Option<SearchInformation>,
}

#[derive(Debug, Deserialize)]
struct RequestInfo {
    success: bool,
}

#[derive(Debug, Deserialize)]
struct SearchInformation {
    /// Reported either as a number or as a numeric string
    #[serde(default)]
    total_results: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct HttpSearchService {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpSearchService {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            client,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build context-search HTTP client")?;
        Ok(Self::new(
            config.search_api_url.clone(),
            config.search_api_key.clone(),
            client,
        ))
    }

    fn search_url(&self, query: &ContextQuery) -> String {
        let mut url = format!("{}?", self.base_url);
        if let Some(ref key) = self.api_key {
            url.push_str(&format!("api_key={}&", urlencoding::encode(key)));
        }
        url.push_str(&format!("q={}", urlencoding::encode(&query.phrase())));
        for (name, value) in SEARCH_PARAMS {
            url.push_str(&format!("&{}={}", name, value));
        }
        url
    }
}

/// Whole, non-negative count from a reported total; fractions are truncated
fn count_from(value: f64) -> Option<u64> {
    value.is_finite().then(|| value.max(0.0).trunc() as u64)
}

/// Interpret a decoded search response
fn interpret(response: SearchResponse) -> LookupOutcome<SearchHits> {
    if !response.request_info.success {
        return LookupOutcome::NotFound;
    }
    let Some(info) = response.search_information else {
        return LookupOutcome::Failed("response has no search_information".to_string());
    };
    let count = match info.total_results {
        None | Some(Value::Null) => return LookupOutcome::Found(SearchHits::Uncounted),
        Some(Value::Number(ref n)) => n.as_u64().or_else(|| n.as_f64().and_then(count_from)),
        Some(Value::String(ref s)) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<i64>().ok().map(|n| n.max(0) as u64))
        }
        Some(_) => None,
    };
    match count {
        Some(count) => LookupOutcome::Found(SearchHits::Counted(count)),
        None => LookupOutcome::Failed(format!(
            "total_results is not a count: {}",
            info.total_results.unwrap_or(Value::Null)
        )),
    }
}

#[async_trait]
impl SearchService for HttpSearchService {
    fn name(&self) -> &'static str {
        "http_search"
    }

    async fn result_count(&self, query: &ContextQuery) -> LookupOutcome<SearchHits> {
        let url = self.search_url(query);
        debug!("Searching {}", query.phrase());

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return LookupOutcome::Failed(format!("search request failed: {e}")),
        };

        let status = response.status();
        if !status.is_success() {
            return LookupOutcome::Failed(format!("search service returned {status}"));
        }

        match response.json::<SearchResponse>().await {
            Ok(body) => interpret(body),
            Err(e) => LookupOutcome::Failed(format!("malformed search response: {e}")),
        }
    }
}
