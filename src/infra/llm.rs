use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::services::LanguageModelService;

/// Client for an OpenAI-compatible chat completions endpoint.
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiClient {
    pub fn new(base_url: String, api_key: String, model: String, max_tokens: u32) -> Self {
        Self {
            http: Client::new(),
            base_url,
            api_key,
            model,
            max_tokens,
        }
    }

    fn completions_endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LanguageModelService for OpenAiClient {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let request_body = ChatCompletionRequest::user_prompt(&self.model, prompt, self.max_tokens);
        debug!(model = %self.model, max_tokens = self.max_tokens, "completion request");

        let response = self
            .http
            .post(self.completions_endpoint())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|err| {
                AppError::LanguageModel(format!("failed to call completion service: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::LanguageModel(format!(
                "completion service responded with {status}: {body}"
            )));
        }

        let payload: ChatCompletionResponse = response.json().await.map_err(|err| {
            AppError::LanguageModel(format!("failed to parse completion response: {err}"))
        })?;

        payload.into_text()
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

impl<'a> ChatCompletionRequest<'a> {
    fn user_prompt(model: &'a str, prompt: &'a str, max_tokens: u32) -> Self {
        Self {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
        }
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

impl ChatCompletionResponse {
    fn into_text(self) -> AppResult<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::LanguageModel("completion service returned no content".to_string())
            })
    }
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_single_user_message() {
        let request = ChatCompletionRequest::user_prompt("gpt-4o-mini", "Summarize this", 1000);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "user", "content": "Summarize this"}],
                "max_tokens": 1000
            })
        );
    }

    #[test]
    fn returns_first_choice_verbatim() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "  Two fixes landed.\n"}, "finish_reason": "stop"},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        }"#;
        let payload: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(payload.into_text().unwrap(), "  Two fixes landed.\n");
    }

    #[test]
    fn missing_choice_is_an_error() {
        let payload: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            payload.into_text(),
            Err(AppError::LanguageModel(_))
        ));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = OpenAiClient::new(
            "https://api.openai.com/v1/".to_string(),
            "key".to_string(),
            "gpt-4o-mini".to_string(),
            1000,
        );
        assert_eq!(
            client.completions_endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );
    }
}
