use super::messages::{ChatContext, ChatMessage, ChatRole};
use super::port::{ChatError, ChatPort};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Chat Port backed by the mentor HTTP backend
pub struct HttpChatClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequestBody<'a> {
    messages: Vec<WireMessage<'a>>,
    context: &'a ChatContext,
}

#[derive(Deserialize)]
struct ChatResponseBody {
    response: String,
}

impl HttpChatClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build chat HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl ChatPort for HttpChatClient {
    async fn send_chat(
        &self,
        messages: &[ChatMessage],
        context: &ChatContext,
    ) -> Result<String, ChatError> {
        let body = ChatRequestBody {
            messages: messages
                .iter()
                .map(|message| WireMessage {
                    role: match message.role {
                        ChatRole::User => "user",
                        ChatRole::Assistant => "assistant",
                    },
                    content: &message.content,
                })
                .collect(),
            context,
        };

        let url = format!("{}/cooking/chat", self.base_url);
        debug!("Sending chat request to {} ({} messages)", url, messages.len());

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Server(status.as_u16()));
        }

        let parsed: ChatResponseBody = response
            .json()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        Ok(parsed.response)
    }
}
