//! # Chat Stream Client
//!
//! A client for chat backends that stream assistant replies as a
//! newline-delimited `data: ` event stream over a single HTTP response.
//!
//! ## Overview
//!
//! This library provides the core functionality for one chat turn:
//! - Issuing the streaming request with ambient auth attached
//! - Incremental reassembly of byte chunks into protocol lines, tolerant of
//!   chunk boundaries that fall inside lines, the `data: ` marker, or a
//!   multi-byte character
//! - Frame classification (token, done, error) with malformed lines absorbed
//! - Callback dispatch with exactly-once completion/error semantics
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chat_stream_client::{ChatClient, ChatTurnRequest, ClientConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let client = ChatClient::new(config)?;
//!
//! let request = ChatTurnRequest::new("Hello there");
//! let outcome = client
//!     .send_message(
//!         &request,
//!         |token| print!("{}", token),
//!         |err| eprintln!("error: {}", err),
//!         |_conversation| {},
//!     )
//!     .await;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Error types and handling
//! - [`models`] - Request and REST response data structures
//! - [`streaming`] - Line decoder, frame classification, and the chat session
//! - [`transport`] - The byte-stream transport seam
//! - [`client`] - The reqwest-backed transport implementation
//! - [`chat`] - High-level client tying the session to the API endpoints

pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod streaming;
pub mod transport;

pub use chat::ChatClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use models::ChatTurnRequest;
pub use streaming::{EventFrame, StreamingChatSession, TurnOutcome};
