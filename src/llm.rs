//! Completion client for the remote chat-completions endpoint.
//!
//! One outbound POST per call, a generous timeout sized for multi-minute
//! reasoning models, and no internal retry. Callers that want the
//! reasoning/answer split go through [`CompletionClient::complete_with_reasoning`].

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::config::{ReasoningDepth, Settings};
use crate::error::SageError;
use crate::log_debug;
use crate::prompts::reasoning_instruction;

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged message in a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Per-call overrides; fields left unset fall back to [`Settings`] defaults.
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f32>,
    /// Force the incremental-delta response mode on or off for this call.
    pub stream: Option<bool>,
    /// Additional request-body parameters merged verbatim into the JSON body.
    pub extra_params: Option<Map<String, Value>>,
}

impl CompletionOptions {
    /// Options overriding only the sampling temperature.
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature: Some(temperature),
            ..Self::default()
        }
    }
}

/// A completed response split into its reasoning prefix and answer suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReasoningResponse {
    pub reasoning: String,
    pub answer: String,
}

/// Split completed text into reasoning and answer on the blank-line
/// heuristic: with two or more blank-line-separated blocks, the last block
/// is the answer and everything before it is the reasoning; otherwise the
/// whole text is the answer.
///
/// The upstream model is not obligated to separate its output this way, so
/// this is a best-effort presentation transform, not a parser.
pub fn split_reasoning(text: &str) -> ReasoningResponse {
    let blocks: Vec<&str> = text.split("\n\n").collect();
    if blocks.len() >= 2 {
        ReasoningResponse {
            reasoning: blocks[..blocks.len() - 1].join("\n\n"),
            answer: blocks[blocks.len() - 1].to_string(),
        }
    } else {
        ReasoningResponse {
            reasoning: String::new(),
            answer: text.to_string(),
        }
    }
}

/// Interface to the completion endpoint.
///
/// Object-safe so handlers can share one client reference and tests can
/// substitute a stub that records calls.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one completion request and return the first choice's text.
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<String, SageError>;

    /// Complete with an explicit reasoning instruction appended to the final
    /// user message, returning the reasoning/answer split.
    async fn complete_with_reasoning(
        &self,
        messages: Vec<ChatMessage>,
        depth: Option<ReasoningDepth>,
    ) -> Result<ReasoningResponse, SageError>;
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    http: Client,
    settings: Settings,
}

impl OpenAiClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            http: Client::new(),
            settings: settings.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    fn build_body(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
        stream: bool,
    ) -> Value {
        let mut body = json!({
            "model": self.settings.model,
            "messages": messages,
            "temperature": options.temperature.unwrap_or(self.settings.temperature),
            "max_tokens": options.max_tokens.unwrap_or(self.settings.max_tokens),
            "top_p": options.top_p.unwrap_or(self.settings.top_p),
        });
        if stream {
            body["stream"] = json!(true);
        }
        if let Some(extra) = &options.extra_params
            && let Some(object) = body.as_object_mut()
        {
            for (key, value) in extra {
                object.insert(key.clone(), value.clone());
            }
        }
        body
    }

    /// Issue the POST and surface non-success statuses and timeouts as their
    /// distinct error kinds.
    async fn send(&self, body: &Value) -> Result<reqwest::Response, SageError> {
        let timeout_secs = self.settings.request_timeout_secs;
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(body)
            .timeout(Duration::from_secs(timeout_secs))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SageError::Timeout { timeout_secs }
                } else {
                    SageError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(no body)".to_string());
            return Err(SageError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn complete_sync(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String, SageError> {
        let body = self.build_body(messages, options, false);
        let response = self.send(&body).await?;
        let parsed: Value = response
            .json()
            .await
            .map_err(|e| SageError::ResponseFormat(format!("failed to parse response body: {e}")))?;
        extract_message_content(&parsed)
    }

    /// Incremental-delta mode: accumulate `choices[0].delta.content`
    /// fragments from SSE frames into the final text.
    async fn complete_streaming(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String, SageError> {
        let timeout_secs = self.settings.request_timeout_secs;
        let body = self.build_body(messages, options, true);
        let response = self.send(&body).await?;

        let mut stream = response.bytes_stream();
        let mut buffer = String::new();
        let mut text = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                if e.is_timeout() {
                    SageError::Timeout { timeout_secs }
                } else {
                    SageError::Request(e.to_string())
                }
            })?;
            buffer.push_str(&String::from_utf8_lossy(&chunk));

            // Frames are separated by a blank line; leftover bytes stay
            // buffered until the next chunk completes them.
            while let Some(frame_end) = buffer.find("\n\n") {
                let frame: String = buffer.drain(..frame_end + 2).collect();
                for line in frame.lines() {
                    let Some(data) = line.strip_prefix("data: ") else {
                        continue;
                    };
                    if data.trim() == "[DONE]" {
                        return Ok(text);
                    }
                    let event: Value = serde_json::from_str(data).map_err(|e| {
                        SageError::ResponseFormat(format!("malformed stream event: {e}"))
                    })?;
                    if let Some(delta) = event
                        .pointer("/choices/0/delta/content")
                        .and_then(Value::as_str)
                    {
                        text.push_str(delta);
                    }
                }
            }
        }
        Ok(text)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<String, SageError> {
        let stream = options.stream.unwrap_or(self.settings.enable_streaming);
        log_debug!(
            "Completion request: model={}, messages={}, stream={}",
            self.settings.model,
            messages.len(),
            stream
        );
        if stream {
            self.complete_streaming(&messages, &options).await
        } else {
            self.complete_sync(&messages, &options).await
        }
    }

    async fn complete_with_reasoning(
        &self,
        mut messages: Vec<ChatMessage>,
        depth: Option<ReasoningDepth>,
    ) -> Result<ReasoningResponse, SageError> {
        let depth = depth.unwrap_or(self.settings.reasoning_depth);
        if let Some(last) = messages.last_mut()
            && last.role == Role::User
        {
            last.content = format!("{}\n\n{}", last.content, reasoning_instruction(depth));
        }
        let text = self.complete(messages, CompletionOptions::default()).await?;
        Ok(split_reasoning(&text))
    }
}

/// Pull the first choice's message content out of a completion response,
/// failing on any other shape rather than returning empty text.
fn extract_message_content(response: &Value) -> Result<String, SageError> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            SageError::ResponseFormat(
                "response has no choices[0].message.content text".to_string(),
            )
        })
}
