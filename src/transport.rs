use bytes::Bytes;
use futures::Stream;
use std::future::Future;
use std::pin::Pin;

use crate::error::Result;

/// Type alias for the raw byte stream of a chat response body
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// Type alias for the future returned by open_stream
pub type StreamFuture = Pin<Box<dyn Future<Output = Result<ByteStream>> + Send>>;

/// Type alias for the future returned by fetch
pub type FetchFuture = Pin<Box<dyn Future<Output = Result<Bytes>> + Send>>;

/// Trait for transports that carry chat traffic to the backend
pub trait Transport: Send + Sync {
    /// Open a streaming request against the backend
    ///
    /// # Arguments
    /// * `path` - The endpoint path, appended to the transport's base URL
    /// * `body` - The JSON request body as bytes
    ///
    /// # Returns
    /// A stream of raw byte chunks terminated by the transport's own
    /// end-of-data signal. A request that cannot be issued, or a response
    /// with a non-success status, fails here before any bytes are streamed.
    fn open_stream(&self, path: &str, body: Bytes) -> StreamFuture;

    /// Fetch a non-streaming endpoint, returning the full response body
    fn fetch(&self, path: &str) -> FetchFuture;

    /// Get the transport name for logging
    fn name(&self) -> &str;
}
