use std::sync::{Arc, Mutex};

use bytes::Bytes;
use chat_stream_client::error::{ClientError, Result};
use chat_stream_client::models::ChatTurnRequest;
use chat_stream_client::streaming::{StreamingChatSession, TurnOutcome};
use chat_stream_client::transport::{ByteStream, FetchFuture, StreamFuture, Transport};

/// Transport whose stream replays scripted chunk results, or refuses to open
/// at all.
struct FaultyTransport {
    refuse_open: bool,
    script: Mutex<Option<Vec<Result<Bytes>>>>,
}

impl FaultyTransport {
    fn refusing() -> Arc<Self> {
        Arc::new(Self {
            refuse_open: true,
            script: Mutex::new(Some(Vec::new())),
        })
    }

    fn with_script(items: Vec<Result<Bytes>>) -> Arc<Self> {
        Arc::new(Self {
            refuse_open: false,
            script: Mutex::new(Some(items)),
        })
    }
}

impl Transport for FaultyTransport {
    fn open_stream(&self, _path: &str, _body: Bytes) -> StreamFuture {
        if self.refuse_open {
            return Box::pin(async {
                Err(ClientError::TransportError(
                    "connection refused".to_string(),
                ))
            });
        }

        let items = self
            .script
            .lock()
            .unwrap()
            .take()
            .expect("stream opened twice");
        Box::pin(async move {
            let stream: ByteStream = Box::pin(futures::stream::iter(items));
            Ok(stream)
        })
    }

    fn fetch(&self, _path: &str) -> FetchFuture {
        Box::pin(async { Err(ClientError::TransportError("not scripted".to_string())) })
    }

    fn name(&self) -> &str {
        "faulty"
    }
}

async fn run_turn(
    transport: Arc<dyn Transport>,
) -> (TurnOutcome, Vec<String>, Vec<String>, usize) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut completions = 0usize;

    let session = StreamingChatSession::new(transport, "/ai/chat");
    let request = ChatTurnRequest::new("hello");

    let outcome = session
        .run(
            &request,
            |t| tokens.push(t.to_string()),
            |e| errors.push(e.to_string()),
            |_| completions += 1,
        )
        .await;

    (outcome, tokens, errors, completions)
}

#[tokio::test]
async fn transport_failure_errors_before_any_parsing() {
    let (outcome, tokens, errors, completions) = run_turn(FaultyTransport::refusing()).await;

    assert!(tokens.is_empty());
    assert_eq!(completions, 0);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("connection refused"));
    assert!(matches!(
        outcome,
        TurnOutcome::Failed {
            cause: ClientError::TransportError(_)
        }
    ));
}

#[tokio::test]
async fn read_error_mid_stream_fails_after_delivered_tokens() {
    let transport = FaultyTransport::with_script(vec![
        Ok(Bytes::from_static(b"data: {\"token\":\"partial\"}\n")),
        Err(ClientError::ReadError("connection reset".to_string())),
    ]);
    let (outcome, tokens, errors, completions) = run_turn(transport).await;

    // The token arrived before the failure and was dispatched
    assert_eq!(tokens, vec!["partial"]);
    assert_eq!(completions, 0);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("connection reset"));
    assert!(matches!(
        outcome,
        TurnOutcome::Failed {
            cause: ClientError::ReadError(_)
        }
    ));
}

#[tokio::test]
async fn error_frame_stops_processing_immediately() {
    let transport = FaultyTransport::with_script(vec![Ok(Bytes::from_static(
        b"data: {\"error\":\"model overloaded\"}\ndata: {\"token\":\"never\"}\n",
    ))]);
    let (outcome, tokens, errors, completions) = run_turn(transport).await;

    assert!(tokens.is_empty());
    assert_eq!(completions, 0);
    assert_eq!(errors, vec!["Server error: model overloaded"]);
    assert!(!outcome.is_completed());
}

#[tokio::test]
async fn error_after_tokens_keeps_token_order() {
    let transport = FaultyTransport::with_script(vec![
        Ok(Bytes::from_static(b"data: {\"token\":\"a\"}\n")),
        Ok(Bytes::from_static(b"data: {\"token\":\"b\"}\n")),
        Ok(Bytes::from_static(b"data: {\"error\":\"boom\"}\n")),
    ]);
    let (outcome, tokens, errors, completions) = run_turn(transport).await;

    assert_eq!(tokens, vec!["a", "b"]);
    assert_eq!(errors.len(), 1);
    assert_eq!(completions, 0);
    assert!(matches!(outcome, TurnOutcome::Failed { .. }));
}
