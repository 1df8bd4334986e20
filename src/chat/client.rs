//! HTTP client for the remote chat assistant.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;

/// Shown when the assistant answered without any usable text.
pub const EMPTY_REPLY: &str = "I received your message but couldn't process a response.";

/// Shown when the assistant could not be reached.
pub const CONNECTION_FALLBACK: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// The assistant may answer under any of three keys.
#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    response: Option<String>,
    reply: Option<String>,
    text: Option<String>,
}

impl ChatResponse {
    fn into_reply(self) -> Option<String> {
        [self.response, self.reply, self.text]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
    }
}

pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// Ask the assistant. Never fails: problems are logged and turned into
    /// a fallback reply.
    pub async fn ask(&self, message: &str) -> String {
        match self.try_ask(message).await {
            Ok(Some(reply)) => reply,
            Ok(None) => EMPTY_REPLY.to_string(),
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "Chat assistant request failed");
                CONNECTION_FALLBACK.to_string()
            }
        }
    }

    async fn try_ask(&self, message: &str) -> Result<Option<String>, reqwest::Error> {
        debug!(endpoint = %self.endpoint, chars = message.len(), "Sending chat message");
        let body: ChatResponse = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { message })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.into_reply())
    }
}
