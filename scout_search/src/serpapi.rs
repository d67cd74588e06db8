use async_trait::async_trait;
use reqwest::Client;
use scout_core::{SearchProvider, SearchResult};
use serde_json::Value;
use std::time::Duration;
use tracing::info;

const DEFAULT_BASE_URL: &str = "https://serpapi.com";

/// Which specialization is asking. Sports and finance queries get seasoned
/// toward current results; the engine call itself is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Web,
    Sports,
    Finance,
}

impl SearchKind {
    fn season(self, query: &str) -> String {
        match self {
            Self::Web => query.to_string(),
            Self::Sports | Self::Finance => format!("{query} recent latest"),
        }
    }
}

/// SerpAPI search client.
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    kind: SearchKind,
}

impl SerpApiClient {
    pub fn new(api_key: String, timeout: u64) -> anyhow::Result<Self> {
        info!("Creating SerpApiClient");
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            kind: SearchKind::Web,
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: SearchKind) -> Self {
        self.kind = kind;
        self
    }
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    async fn search(&self, query: &str, limit: usize) -> anyhow::Result<Vec<SearchResult>> {
        let query = self.kind.season(query);
        info!("Searching SerpAPI: query={:?}, limit={}", query, limit);

        let response = self
            .client
            .get(format!("{}/search.json", self.base_url))
            .query(&[
                ("q", query.as_str()),
                ("engine", "google"),
                ("num", &limit.to_string()),
                ("api_key", &self.api_key),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        let results = parse_results(&response, limit);
        info!("SerpAPI returned {} results", results.len());
        Ok(results)
    }
}

/// Pull ranked records out of a SerpAPI response body. An absent
/// `organic_results` key means zero results, not an error.
fn parse_results(response: &Value, limit: usize) -> Vec<SearchResult> {
    let Some(organic) = response["organic_results"].as_array() else {
        return Vec::new();
    };

    organic
        .iter()
        .take(limit)
        .map(|result| SearchResult {
            title: text_field(result, "title"),
            url: text_field(result, "link"),
            snippet: text_field(result, "snippet"),
            source: text_field(result, "displayed_link"),
            date: result["date"].as_str().map(ToString::to_string),
        })
        .collect()
}

fn text_field(value: &Value, key: &str) -> String {
    value[key].as_str().unwrap_or_default().to_string()
}

/// Render results as the text block fed back to the model's tool call.
#[must_use]
pub fn format_results(query: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "No search results found.".to_string();
    }

    let mut out = format!("Web search results for '{query}':\n\n");
    out.push_str("=== SEARCH RESULTS ===\n\n");

    for (i, result) in results.iter().enumerate() {
        out.push_str(&format!("Result {}:\n", i + 1));
        out.push_str(&format!("Title: {}\n", result.title));
        out.push_str(&format!("URL: {}\n", result.url));
        out.push_str(&format!("Content: {}\n", result.snippet));
        out.push_str(&format!("Source: {}\n", result.source));
        if let Some(date) = &result.date {
            out.push_str(&format!("Date: {date}\n"));
        }
        out.push('\n');
    }

    out.push_str("=== END RESULTS ===\n\n");
    out.push_str(
        "Instructions: Use this information to create a comprehensive summary \
         and include ALL sources with their titles and URLs.",
    );

    out
}
