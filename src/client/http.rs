use bytes::Bytes;
use futures::StreamExt;
use reqwest::Client;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::transport::{ByteStream, FetchFuture, StreamFuture, Transport};

pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ClientError::TransportError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

impl Transport for HttpTransport {
    fn open_stream(&self, path: &str, body: Bytes) -> StreamFuture {
        let url = self.url(path);
        let client = self.client.clone();
        let token = self.config.auth_token.clone();

        Box::pin(async move { Self::open_stream_impl(url, body, client, token).await })
    }

    fn fetch(&self, path: &str) -> FetchFuture {
        let url = self.url(path);
        let client = self.client.clone();
        let token = self.config.auth_token.clone();

        Box::pin(async move { Self::fetch_impl(url, client, token).await })
    }

    fn name(&self) -> &str {
        "http"
    }
}

impl HttpTransport {
    async fn open_stream_impl(
        url: String,
        body: Bytes,
        client: Client,
        token: Option<String>,
    ) -> Result<ByteStream> {
        debug!("Sending {} bytes to {}", body.len(), url);

        let mut request = client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream")
            .body(body);

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::TransportError(format!("Chat request failed: {}", e)))?;

        let status = response.status();
        info!("Chat endpoint responded with status: {}", status);

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::TransportError(format!(
                "Chat API error {}: {}",
                status, error_body
            )));
        }

        Ok(Box::pin(response.bytes_stream().map(|chunk| {
            chunk.map_err(|e| ClientError::ReadError(e.to_string()))
        })))
    }

    async fn fetch_impl(url: String, client: Client, token: Option<String>) -> Result<Bytes> {
        debug!("Fetching {}", url);

        let mut request = client.get(&url).header("Accept", "application/json");

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::TransportError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::TransportError(format!(
                "Chat API error {}: {}",
                status, error_body
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| ClientError::ReadError(e.to_string()))
    }
}
