//! The OpenRouter-backed assistant.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{Assistant, build_prompt};

/// The chat completions endpoint questions are sent to.
const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// The model used to answer questions.
const MODEL: &str = "qwen/qwen-2.5-7b-instruct";

/// The app name sent in the X-Title header for OpenRouter's usage reports.
const APP_TITLE: &str = "Rewards App";

/// The environment variable holding the OpenRouter API key.
pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";

/// The answer shown when the request to OpenRouter fails outright.
const FETCH_ERROR_ANSWER: &str = "Error: Unable to fetch AI response.";

/// The answer shown when OpenRouter replies without any content.
const EMPTY_RESPONSE_ANSWER: &str = "AI returned empty response.";

/// Answers questions through the OpenRouter chat completions API.
pub struct OpenRouterAssistant {
    client: Client,
    api_key: String,
    referer: String,
}

impl OpenRouterAssistant {
    /// Create an assistant that authenticates with `api_key`.
    ///
    /// `referer` is sent as the HTTP-Referer header OpenRouter uses to
    /// attribute traffic, e.g. "http://localhost:3000".
    pub fn new(api_key: impl Into<String>, referer: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            referer: referer.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// The slice of the chat completions response the assistant reads.
///
/// Error bodies have no `choices` key, so they parse as an empty list and
/// fall through to the empty response answer.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl Assistant for OpenRouterAssistant {
    async fn ask(&self, question: &str, context: &str) -> String {
        let prompt = build_prompt(question, context);
        let request = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
        };

        let response = match self
            .client
            .post(OPENROUTER_URL)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", APP_TITLE)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                tracing::error!("assistant request failed: {error}");
                return FETCH_ERROR_ANSWER.to_owned();
            }
        };

        let body: ChatResponse = match response.json().await {
            Ok(body) => body,
            Err(error) => {
                tracing::error!("could not parse assistant response: {error}");
                return FETCH_ERROR_ANSWER.to_owned();
            }
        };

        match body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
        {
            Some(content) if !content.trim().is_empty() => content,
            _ => EMPTY_RESPONSE_ANSWER.to_owned(),
        }
    }
}

#[cfg(test)]
mod openrouter_tests {
    use super::{ChatMessage, ChatRequest, ChatResponse, MODEL};

    #[test]
    fn requests_serialize_the_model_and_prompt() {
        let request = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: "Who earned the most points?",
            }],
        };

        let json = serde_json::to_string(&request).expect("request should serialize");

        assert!(json.contains("\"model\":\"qwen/qwen-2.5-7b-instruct\""));
        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("Who earned the most points?"));
    }

    #[test]
    fn parses_the_first_choice_content() {
        let body = r#"{
            "id": "gen-123",
            "choices": [{"message": {"role": "assistant", "content": "Amit Sharma."}}]
        }"#;

        let response: ChatResponse = serde_json::from_str(body).expect("body should parse");

        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("Amit Sharma.")
        );
    }

    #[test]
    fn error_bodies_parse_without_choices() {
        let body = r#"{"error": {"code": 401, "message": "No auth credentials found"}}"#;

        let response: ChatResponse = serde_json::from_str(body).expect("body should parse");

        assert!(response.choices.is_empty());
    }
}
