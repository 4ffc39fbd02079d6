use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::HttpTransport;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::models::{ApiResponse, ChatTurnRequest, ConversationList, ConversationWithMessages};
use crate::streaming::{StreamingChatSession, TurnOutcome};
use crate::transport::Transport;

const CHAT_PATH: &str = "/ai/chat";
const CONVERSATIONS_PATH: &str = "/ai/conversations";

/// High-level chat API client: one streaming operation plus the plain REST
/// endpoints for browsing conversations.
pub struct ChatClient {
    transport: Arc<dyn Transport>,
}

impl ChatClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport: Arc::new(HttpTransport::new(config)?),
        })
    }

    /// Build a client over a custom transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Stream one chat turn, driving the callbacks until the terminal
    /// outcome. See [`StreamingChatSession::run`] for the callback contract.
    pub async fn send_message<T, E, C>(
        &self,
        request: &ChatTurnRequest,
        on_token: T,
        on_error: E,
        on_complete: C,
    ) -> TurnOutcome
    where
        T: FnMut(&str),
        E: FnMut(&ClientError),
        C: FnMut(Option<&str>),
    {
        let session = StreamingChatSession::new(self.transport.clone(), CHAT_PATH);
        session.run(request, on_token, on_error, on_complete).await
    }

    /// List the caller's conversations
    pub async fn conversations(&self) -> Result<ConversationList> {
        self.get_json(CONVERSATIONS_PATH).await
    }

    /// Fetch one conversation with its messages
    pub async fn conversation(&self, id: &str) -> Result<ConversationWithMessages> {
        self.get_json(&format!("{}/{}", CONVERSATIONS_PATH, id)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path, "Fetching REST endpoint");

        let bytes = self.transport.fetch(path).await?;
        let envelope: ApiResponse<T> = serde_json::from_slice(&bytes)?;

        if !envelope.success {
            return Err(ClientError::ServerError(
                envelope
                    .message
                    .unwrap_or_else(|| "Request failed".to_string()),
            ));
        }

        envelope
            .data
            .ok_or_else(|| ClientError::ServerError("Response missing data".to_string()))
    }
}
