use std::sync::Arc;

use bytes::Bytes;
use chat_stream_client::ChatClient;
use chat_stream_client::error::ClientError;
use chat_stream_client::transport::{FetchFuture, StreamFuture, Transport};

/// Transport that serves a fixed JSON body for every fetch.
struct FixtureTransport {
    body: &'static str,
}

impl Transport for FixtureTransport {
    fn open_stream(&self, _path: &str, _body: Bytes) -> StreamFuture {
        Box::pin(async { Err(ClientError::TransportError("not scripted".to_string())) })
    }

    fn fetch(&self, _path: &str) -> FetchFuture {
        let body = self.body;
        Box::pin(async move { Ok(Bytes::from_static(body.as_bytes())) })
    }

    fn name(&self) -> &str {
        "fixture"
    }
}

fn client_with_body(body: &'static str) -> ChatClient {
    ChatClient::with_transport(Arc::new(FixtureTransport { body }))
}

#[tokio::test]
async fn conversations_unwraps_the_envelope() {
    let client = client_with_body(
        r#"{
            "success": true,
            "data": {
                "conversations": [{
                    "id": "c1",
                    "user_id": "u1",
                    "title": "First chat",
                    "created_at": "2025-01-01T00:00:00Z",
                    "updated_at": "2025-01-02T00:00:00Z"
                }]
            }
        }"#,
    );

    let list = client.conversations().await.unwrap();
    assert_eq!(list.conversations.len(), 1);
    assert_eq!(list.conversations[0].id, "c1");
    assert_eq!(list.conversations[0].title.as_deref(), Some("First chat"));
    assert!(list.conversations[0].system_prompt_snapshot.is_none());
}

#[tokio::test]
async fn conversation_returns_messages_in_envelope_order() {
    let client = client_with_body(
        r#"{
            "success": true,
            "data": {
                "conversation": {
                    "id": "c1",
                    "user_id": "u1",
                    "created_at": "2025-01-01T00:00:00Z",
                    "updated_at": "2025-01-02T00:00:00Z"
                },
                "messages": [
                    {
                        "id": "m1",
                        "conversation_id": "c1",
                        "sender_role": "USER",
                        "content": "Hi",
                        "message_order": 1,
                        "created_at": "2025-01-01T00:00:00Z"
                    },
                    {
                        "id": "m2",
                        "conversation_id": "c1",
                        "sender_role": "ASSISTANT",
                        "content": "Hello",
                        "message_order": 2,
                        "created_at": "2025-01-01T00:00:01Z"
                    }
                ]
            }
        }"#,
    );

    let detail = client.conversation("c1").await.unwrap();
    assert_eq!(detail.conversation.id, "c1");
    assert_eq!(detail.messages.len(), 2);
    assert_eq!(detail.messages[0].content, "Hi");
    assert_eq!(detail.messages[1].content, "Hello");
}

#[tokio::test]
async fn unsuccessful_envelope_surfaces_the_server_message() {
    let client = client_with_body(r#"{"success": false, "message": "not authorized"}"#);

    let err = client.conversations().await.unwrap_err();
    assert!(matches!(err, ClientError::ServerError(_)));
    assert!(err.to_string().contains("not authorized"));
}

#[tokio::test]
async fn successful_envelope_without_data_is_an_error() {
    let client = client_with_body(r#"{"success": true}"#);

    let err = client.conversations().await.unwrap_err();
    assert!(matches!(err, ClientError::ServerError(_)));
}
