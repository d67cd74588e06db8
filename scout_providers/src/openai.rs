use async_trait::async_trait;
use reqwest::Client;
use scout_core::{ChatMessage, Responder, SearchProvider, StructuredAnswer};
use scout_search::format_results;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info};

use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Upper bound on search/tool round-trips within one respond() call.
const MAX_TOOL_ROUNDS: usize = 4;

const OUTPUT_FORMAT: &str = "\
Respond with a single JSON object and nothing else, shaped as:\n\
{\"summary\": \"<comprehensive answer text>\", \"sources\": [{\"title\": \"<exact title>\", \"url\": \"<complete url>\"}]}\n\
Include ALL sources from your search results, using the exact titles and URLs provided.";

/// Responder backed by an OpenAI-compatible chat-completions API, with a
/// single `web_search` tool wired to the injected search provider.
pub struct OpenAiResponder {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    instructions: String,
    search: Arc<dyn SearchProvider>,
    num_results: usize,
}

impl OpenAiResponder {
    pub fn new(
        api_key: String,
        model: String,
        instructions: String,
        search: Arc<dyn SearchProvider>,
    ) -> Self {
        info!("Creating OpenAiResponder: model={}", model);
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
            instructions,
            search,
            num_results: 5,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub const fn with_num_results(mut self, num_results: usize) -> Self {
        self.num_results = num_results;
        self
    }

    /// Assemble the wire messages: system instructions, the persisted
    /// history in order, then the new user message.
    fn build_messages(&self, history: &[ChatMessage], message: &str) -> Vec<Value> {
        let mut messages = Vec::with_capacity(history.len() + 2);

        messages.push(json!({
            "role": "system",
            "content": format!("{}\n\n{OUTPUT_FORMAT}", self.instructions),
        }));

        for msg in history {
            messages.push(json!({
                "role": msg.role.to_string(),
                "content": msg.content,
            }));
        }

        messages.push(json!({
            "role": "user",
            "content": message,
        }));

        messages
    }

    fn tool_definitions() -> Value {
        json!([{
            "type": "function",
            "function": {
                "name": "web_search",
                "description": "Search the web for current information on any topic",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The search query"
                        },
                        "num_results": {
                            "type": "integer",
                            "description": "Number of results to return (default: 5)"
                        }
                    },
                    "required": ["query"]
                }
            }
        }])
    }

    async fn try_send(&self, request: &Value) -> anyhow::Result<Value> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(response)
    }

    async fn send_with_retry(&self, request: &Value) -> anyhow::Result<Value> {
        // Backoff: 2s, 4s, 6s, 8s, then 10s x 3
        let base_delays: [u64; 4] = [2, 4, 6, 8];
        let final_retries = 3;

        retry_with_backoff(|| self.try_send(request), &base_delays, final_retries).await
    }

    /// Run one tool call and return the text block fed back to the model.
    /// Search failures are reported in-band; the model decides what to do
    /// with a failed lookup.
    async fn run_tool_call(&self, call: &Value) -> anyhow::Result<Value> {
        let id = call["id"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Tool call missing id"))?;
        let name = call["function"]["name"].as_str().unwrap_or_default();
        if name != "web_search" {
            anyhow::bail!("Model requested unknown tool: {name}");
        }

        let arguments: Value = serde_json::from_str(
            call["function"]["arguments"].as_str().unwrap_or("{}"),
        )?;
        let query = arguments["query"].as_str().unwrap_or_default();
        let limit = arguments["num_results"]
            .as_u64()
            .map_or(self.num_results, |n| n as usize);

        debug!("Tool call web_search: query={:?}, limit={}", query, limit);

        let content = match self.search.search(query, limit).await {
            Ok(results) => format_results(query, &results),
            Err(e) => format!("Search failed: {e}"),
        };

        Ok(json!({
            "role": "tool",
            "tool_call_id": id,
            "content": content,
        }))
    }
}

#[async_trait]
impl Responder for OpenAiResponder {
    async fn respond(
        &self,
        history: &[ChatMessage],
        message: &str,
    ) -> anyhow::Result<StructuredAnswer> {
        let mut messages = self.build_messages(history, message);
        let tools = Self::tool_definitions();

        for round in 0..=MAX_TOOL_ROUNDS {
            let request = json!({
                "model": self.model,
                "messages": messages,
                "tools": tools,
            });

            info!("Sending request to chat API: model={}, round={}", self.model, round);
            let response = self.send_with_retry(&request).await?;

            if let Some(usage) = response["usage"].as_object() {
                debug!(
                    "Token usage: prompt={}, completion={}",
                    usage.get("prompt_tokens").and_then(|v| v.as_u64()).unwrap_or(0),
                    usage.get("completion_tokens").and_then(|v| v.as_u64()).unwrap_or(0),
                );
            }

            let assistant = response["choices"][0]["message"].clone();
            if assistant.is_null() {
                anyhow::bail!("Invalid response format: missing message");
            }

            if let Some(tool_calls) = assistant["tool_calls"].as_array() {
                if !tool_calls.is_empty() {
                    let calls = tool_calls.clone();
                    messages.push(assistant);
                    for call in &calls {
                        messages.push(self.run_tool_call(call).await?);
                    }
                    continue;
                }
            }

            let content = assistant["content"]
                .as_str()
                .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing content"))?;

            return parse_structured_answer(content);
        }

        anyhow::bail!("Tool-call rounds exceeded without a final answer")
    }
}

/// Decode the model's final message into a [`StructuredAnswer`].
/// Tolerates a fenced code block around the JSON object.
fn parse_structured_answer(content: &str) -> anyhow::Result<StructuredAnswer> {
    let trimmed = content.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map_or(trimmed, |rest| rest.trim_end_matches("```"));

    serde_json::from_str(body.trim())
        .map_err(|e| anyhow::anyhow!("Malformed structured answer: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::{Role, SearchResult};

    struct NoopSearch;

    #[async_trait]
    impl SearchProvider for NoopSearch {
        async fn search(&self, _query: &str, _limit: usize) -> anyhow::Result<Vec<SearchResult>> {
            Ok(Vec::new())
        }
    }

    fn responder() -> OpenAiResponder {
        OpenAiResponder::new(
            "test-key".to_string(),
            "gpt-4o-mini".to_string(),
            "You are a helpful assistant.".to_string(),
            Arc::new(NoopSearch),
        )
    }

    #[test]
    fn builds_messages_with_history_between_system_and_user() {
        let history = vec![
            ChatMessage::new(Role::User, "first question"),
            ChatMessage::new(Role::Assistant, "{\"summary\":\"a\",\"sources\":[]}"),
        ];

        let messages = responder().build_messages(&history, "follow-up");

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "first question");
        assert_eq!(messages[2]["role"], "assistant");
        assert_eq!(messages[3]["role"], "user");
        assert_eq!(messages[3]["content"], "follow-up");
    }

    #[test]
    fn parses_plain_json_answer() {
        let answer = parse_structured_answer(
            r#"{"summary": "It is sunny.", "sources": [{"title": "Weather", "url": "https://w.example"}]}"#,
        )
        .unwrap();

        assert_eq!(answer.summary, "It is sunny.");
        assert_eq!(answer.sources.len(), 1);
        assert_eq!(answer.sources[0].url, "https://w.example");
    }

    #[test]
    fn parses_fenced_json_answer() {
        let answer = parse_structured_answer(
            "```json\n{\"summary\": \"ok\", \"sources\": []}\n```",
        )
        .unwrap();

        assert_eq!(answer.summary, "ok");
        assert!(answer.sources.is_empty());
    }

    #[test]
    fn rejects_non_json_answer() {
        assert!(parse_structured_answer("Sorry, I can't help.").is_err());
    }

    #[test]
    fn tool_definitions_declare_web_search() {
        let tools = OpenAiResponder::tool_definitions();
        assert_eq!(tools[0]["function"]["name"], "web_search");
        assert_eq!(
            tools[0]["function"]["parameters"]["required"][0],
            "query"
        );
    }
}
