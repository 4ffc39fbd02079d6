use serde::Deserialize;
use tracing::debug;

/// Literal marker that prefixes every meaningful line of the stream.
const DATA_PREFIX: &str = "data: ";

/// One parsed protocol event extracted from a line of the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFrame {
    /// Incremental assistant output.
    Token { token: String },
    /// Successful end of turn, optionally naming the conversation.
    Done { conversation_id: Option<String> },
    /// Server-signaled failure.
    Error { message: String },
    /// A line that is not a recognizable event. Ignored, never an error.
    Unrecognized,
}

/// Wire shape of a `data: ` payload. Every field is optional; classification
/// checks token, then done, then error.
#[derive(Debug, Deserialize)]
struct FramePayload {
    token: Option<String>,
    done: Option<bool>,
    conversation_id: Option<String>,
    error: Option<String>,
}

/// Classify one complete, trimmed line of the stream.
///
/// Malformed payloads and lines without the `data: ` prefix come back as
/// [`EventFrame::Unrecognized`]; one corrupt event must not discard an
/// otherwise-good stream.
pub fn classify_line(line: &str) -> EventFrame {
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return EventFrame::Unrecognized;
    };

    let payload: FramePayload = match serde_json::from_str(payload) {
        Ok(p) => p,
        Err(e) => {
            debug!(line, error = %e, "Ignoring malformed stream frame");
            return EventFrame::Unrecognized;
        }
    };

    if let Some(token) = payload.token {
        EventFrame::Token { token }
    } else if payload.done == Some(true) {
        EventFrame::Done {
            conversation_id: payload.conversation_id,
        }
    } else if let Some(message) = payload.error {
        EventFrame::Error { message }
    } else {
        EventFrame::Unrecognized
    }
}
