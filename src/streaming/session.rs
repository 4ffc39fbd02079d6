use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::error::ClientError;
use crate::models::ChatTurnRequest;
use crate::transport::Transport;

use super::decoder::LineDecoder;
use super::frames::EventFrame;

/// Terminal result of one chat turn. Exactly one is produced per turn.
#[derive(Debug)]
pub enum TurnOutcome {
    Completed {
        /// Concatenation of every token in arrival order.
        full_text: String,
        conversation_id: Option<String>,
    },
    Failed {
        cause: ClientError,
    },
}

impl TurnOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TurnOutcome::Completed { .. })
    }
}

/// Drives one request/response chat turn from submission to terminal outcome.
///
/// The session issues a single streaming request, reassembles the response
/// bytes into protocol frames, and dispatches them to the caller's callbacks:
/// `on_token` once per token frame in arrival order, then exactly one of
/// `on_complete` / `on_error`. Token callbacks never fire after a terminal
/// callback.
///
/// Each session owns its decode buffer and running text for the duration of
/// one turn; concurrent turns are independent. There is no retry and no
/// cancellation primitive at this layer.
pub struct StreamingChatSession {
    transport: Arc<dyn Transport>,
    path: String,
}

impl StreamingChatSession {
    pub fn new(transport: Arc<dyn Transport>, path: impl Into<String>) -> Self {
        Self {
            transport,
            path: path.into(),
        }
    }

    /// Run the turn to its terminal outcome.
    ///
    /// A transport failure before any bytes are streamed, a read error
    /// mid-stream, and an explicit error frame all route to `on_error` and a
    /// `Failed` outcome. A done frame, or end-of-data without one, routes to
    /// `on_complete` and a `Completed` outcome. End-of-data without a
    /// terminal frame is a quiet success: some backends close the connection
    /// right after their last token.
    pub async fn run<T, E, C>(
        self,
        request: &ChatTurnRequest,
        mut on_token: T,
        mut on_error: E,
        mut on_complete: C,
    ) -> TurnOutcome
    where
        T: FnMut(&str),
        E: FnMut(&ClientError),
        C: FnMut(Option<&str>),
    {
        let turn_id = Uuid::new_v4();

        let body = match serde_json::to_vec(request) {
            Ok(b) => Bytes::from(b),
            Err(e) => {
                let cause = ClientError::from(e);
                on_error(&cause);
                return TurnOutcome::Failed { cause };
            }
        };

        debug!(%turn_id, transport = self.transport.name(), bytes = body.len(), "Opening chat stream");

        let mut stream = match self.transport.open_stream(&self.path, body).await {
            Ok(s) => s,
            Err(cause) => {
                error!(%turn_id, %cause, "Failed to open chat stream");
                on_error(&cause);
                return TurnOutcome::Failed { cause };
            }
        };

        let mut decoder = LineDecoder::new();
        let mut full_text = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(c) => c,
                Err(cause) => {
                    error!(%turn_id, %cause, "Chat stream failed mid-read");
                    on_error(&cause);
                    return TurnOutcome::Failed { cause };
                }
            };

            decoder.push(&chunk);
            while let Some(frame) = decoder.next_frame() {
                match frame {
                    EventFrame::Token { token } => {
                        full_text.push_str(&token);
                        on_token(&token);
                    }
                    EventFrame::Done { conversation_id } => {
                        // Terminal frame: whatever is still buffered behind
                        // it stays unparsed.
                        info!(%turn_id, chars = full_text.len(), "Chat turn completed");
                        on_complete(conversation_id.as_deref());
                        return TurnOutcome::Completed {
                            full_text,
                            conversation_id,
                        };
                    }
                    EventFrame::Error { message } => {
                        let cause = ClientError::ServerError(message);
                        error!(%turn_id, %cause, "Server signaled an error");
                        on_error(&cause);
                        return TurnOutcome::Failed { cause };
                    }
                    EventFrame::Unrecognized => {}
                }
            }
        }

        info!(%turn_id, chars = full_text.len(), "Chat stream ended without terminal frame");
        on_complete(None);
        TurnOutcome::Completed {
            full_text,
            conversation_id: None,
        }
    }
}
