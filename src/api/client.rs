//! HTTP client for the chat server.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::types::{
    ChatReply, ChatRequest, ConversationResponse, Exchange, HistoryEntry, HistoryResponse,
};
use super::ChatBackend;
use crate::error::{Error, Result};

/// HTTP client for the chat server API.
///
/// # Example
///
/// ```rust,no_run
/// use chat_ui_client::api::{ChatBackend, Client};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new("http://127.0.0.1:5000")?;
/// let reply = client.send_message("Hello!", "3f2b6c1e-0d4a-4b7e-9c1f-2a3b4c5d6e7f").await?;
/// println!("{}", reply.reply);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the server (e.g., "http://127.0.0.1:5000")
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, http)
    }

    /// Create a new client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        // Endpoints are joined relative to the base, which needs a trailing slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url, http })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Decode a JSON body whatever the status.
    ///
    /// The server puts usable payloads in some failure responses, so the body
    /// wins when it parses. A body that does not parse is reported as an API
    /// error for failure statuses and as a JSON error otherwise.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(Error::Api {
                status: status.as_u16(),
                message: body,
            }),
            Err(err) => Err(Error::Json(err)),
        }
    }

    /// Succeed on any 2xx, ignoring the body.
    async fn expect_success(response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl ChatBackend for Client {
    async fn send_message(&self, message: &str, session_id: &str) -> Result<ChatReply> {
        let req = ChatRequest {
            message: message.to_string(),
            session_id: session_id.to_string(),
        };
        let response = self.http.post(self.url("chat")?).json(&req).send().await?;
        debug!(name: "api.chat.response", status = %response.status(), "Chat response received");
        Self::read_json(response).await
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>> {
        let response = self.http.get(self.url("history")?).send().await?;
        let body: HistoryResponse = Self::read_json(response).await?;
        Ok(body.history)
    }

    async fn get_conversation(&self, session_id: &str) -> Result<Vec<Exchange>> {
        let mut url = self.url("get_session_conversation/")?;
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .push(session_id);
        let response = self.http.get(url).send().await?;
        let body: ConversationResponse = Self::read_json(response).await?;
        Ok(body.into_exchanges())
    }

    async fn delete_chat(&self, chat_id: i64) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("delete_chat/{chat_id}"))?)
            .send()
            .await?;
        Self::expect_success(response).await
    }

    async fn clear_history(&self) -> Result<()> {
        let response = self.http.post(self.url("clear_history")?).send().await?;
        Self::expect_success(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_resolve_under_base_path() {
        let client = Client::new("http://localhost:5000/app").unwrap();
        assert_eq!(
            client.url("history").unwrap().as_str(),
            "http://localhost:5000/app/history"
        );

        let root = Client::new("http://localhost:5000").unwrap();
        assert_eq!(
            root.url("delete_chat/4").unwrap().as_str(),
            "http://localhost:5000/delete_chat/4"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            Client::new("not a url"),
            Err(Error::InvalidUrl(_))
        ));
    }
}
