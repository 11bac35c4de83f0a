//! API Integration Tests
//!
//! Every test spawns its own server on the in-memory store, so no external
//! services are required.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use integration_tests::{assert_json, assert_status, fixtures::*, TestServer};
use reqwest::StatusCode;

async fn server() -> TestServer {
    TestServer::start().await.expect("Failed to start server")
}

async fn join(server: &TestServer, name: &str) {
    let response = server.post("/participants", &JoinBody::new(name)).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

async fn send(server: &TestServer, from: &str, body: &MessageBody) -> MessageJson {
    let response = server.post_as("/messages", from, body).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn read(server: &TestServer, viewer: &str) -> Vec<MessageJson> {
    let response = server.get_as("/messages", viewer).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn error_code(response: reqwest::Response, expected: StatusCode) -> String {
    assert_eq!(response.status(), expected);
    let body: ErrorJson = response.json().await.unwrap();
    body.error.code
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = server().await;
    let response = server.get("/health").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_health_ready() {
    let server = server().await;
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Participant Tests
// ============================================================================

#[tokio::test]
async fn test_join_returns_participant() {
    let server = server().await;
    let name = unique_name("ana");

    let response = server.post("/participants", &JoinBody::new(&name)).await.unwrap();
    let participant: ParticipantJson = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(participant.name, name);
    assert!(participant.last_seen <= chrono::Utc::now());
}

#[tokio::test]
async fn test_join_strips_markup() {
    let server = server().await;

    let response = server
        .post("/participants", &JoinBody::new("  <b>ana</b> "))
        .await
        .unwrap();
    let participant: ParticipantJson = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(participant.name, "ana");
}

#[tokio::test]
async fn test_join_duplicate_name() {
    let server = server().await;
    join(&server, "ana").await;

    let response = server.post("/participants", &JoinBody::new("ana")).await.unwrap();
    assert_eq!(error_code(response, StatusCode::CONFLICT).await, "NAME_TAKEN");
}

#[tokio::test]
async fn test_join_rejects_empty_name() {
    let server = server().await;

    let response = server.post("/participants", &JoinBody::new("")).await.unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();

    let response = server
        .post("/participants", &JoinBody::new("<i></i>"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();

    let response = server
        .post("/participants", &serde_json::json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();
}

#[tokio::test]
async fn test_join_announces_to_everyone() {
    let server = server().await;
    join(&server, "ana").await;

    let messages = read(&server, "bob").await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].from, "ana");
    assert_eq!(messages[0].to, "everyone");
    assert_eq!(messages[0].text, "joined");
    assert_eq!(messages[0].kind, "status");
    assert_eq!(messages[0].time.len(), 8);
}

#[tokio::test]
async fn test_list_participants() {
    let server = server().await;
    join(&server, "bob").await;
    join(&server, "ana").await;

    let response = server.get("/participants").await.unwrap();
    let participants: Vec<ParticipantJson> = assert_json(response, StatusCode::OK).await.unwrap();

    let names: Vec<_> = participants.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["ana", "bob"]);
}

// ============================================================================
// Heartbeat Tests
// ============================================================================

#[tokio::test]
async fn test_heartbeat_joined_participant() {
    let server = server().await;
    join(&server, "ana").await;

    let response = server
        .request(reqwest::Method::POST, "/status", Some("ana"))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_heartbeat_unknown_participant() {
    let server = server().await;

    let response = server
        .request(reqwest::Method::POST, "/status", Some("ghost"))
        .send()
        .await
        .unwrap();
    assert_eq!(
        error_code(response, StatusCode::NOT_FOUND).await,
        "UNKNOWN_PARTICIPANT"
    );
}

#[tokio::test]
async fn test_heartbeat_without_user_header() {
    let server = server().await;

    let response = server
        .request(reqwest::Method::POST, "/status", None)
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_send_then_read_round_trip() {
    let server = server().await;
    join(&server, "ana").await;

    let sent = send(&server, "ana", &MessageBody::broadcast("oi")).await;
    assert_eq!(sent.from, "ana");
    assert_eq!(sent.to, "everyone");
    assert_eq!(sent.kind, "message");
    assert!(sent.id.parse::<i64>().is_ok());

    let messages = read(&server, "bob").await;
    assert!(messages
        .iter()
        .any(|m| m.id == sent.id && m.from == "ana" && m.text == "oi"));
}

#[tokio::test]
async fn test_send_requires_active_sender() {
    let server = server().await;

    let response = server
        .post_as("/messages", "ghost", &MessageBody::broadcast("oi"))
        .await
        .unwrap();
    assert_eq!(
        error_code(response, StatusCode::UNPROCESSABLE_ENTITY).await,
        "SENDER_NOT_ACTIVE"
    );
}

#[tokio::test]
async fn test_send_requires_user_header() {
    let server = server().await;

    let response = server
        .post("/messages", &MessageBody::broadcast("oi"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();
}

#[tokio::test]
async fn test_send_rejects_invalid_fields() {
    let server = server().await;
    join(&server, "ana").await;

    let status_kind = MessageBody {
        kind: "status".to_string(),
        ..MessageBody::broadcast("oi")
    };
    let response = server.post_as("/messages", "ana", &status_kind).await.unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();

    let response = server
        .post_as("/messages", "ana", &MessageBody::broadcast("<p></p>"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();

    let response = server
        .post_as("/messages", "ana", &MessageBody::private("everyone", "psst"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();
}

#[tokio::test]
async fn test_private_message_visibility() {
    let server = server().await;
    for name in ["ana", "bob", "cat"] {
        join(&server, name).await;
    }

    let sent = send(&server, "ana", &MessageBody::private("bob", "psst")).await;
    assert_eq!(sent.kind, "private_message");

    assert!(read(&server, "ana").await.iter().any(|m| m.id == sent.id));
    assert!(read(&server, "bob").await.iter().any(|m| m.id == sent.id));
    assert!(!read(&server, "cat").await.iter().any(|m| m.id == sent.id));
}

#[tokio::test]
async fn test_read_most_recent_first_with_limit() {
    let server = server().await;
    join(&server, "ana").await;

    let first = send(&server, "ana", &MessageBody::broadcast("one")).await;
    let second = send(&server, "ana", &MessageBody::broadcast("two")).await;
    let third = send(&server, "ana", &MessageBody::broadcast("three")).await;

    let response = server.get_as("/messages?limit=2", "bob").await.unwrap();
    let messages: Vec<MessageJson> = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<_> = messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec![third.id.as_str(), second.id.as_str()]);

    let all = read(&server, "bob").await;
    assert_eq!(all.len(), 4);
    assert_eq!(all[2].id, first.id);
    assert_eq!(all[3].kind, "status");
}

#[tokio::test]
async fn test_read_rejects_bad_limit() {
    let server = server().await;

    for query in ["?limit=0", "?limit=-1", "?limit=abc"] {
        let response = server
            .get_as(&format!("/messages{query}"), "bob")
            .await
            .unwrap();
        assert_eq!(
            error_code(response, StatusCode::UNPROCESSABLE_ENTITY).await,
            "INVALID_LIMIT"
        );
    }
}

#[tokio::test]
async fn test_read_requires_user_header() {
    let server = server().await;
    let response = server.get("/messages").await.unwrap();
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY).await.unwrap();
}

// ============================================================================
// Edit / Delete Tests
// ============================================================================

#[tokio::test]
async fn test_owner_edits_message() {
    let server = server().await;
    join(&server, "ana").await;
    join(&server, "bob").await;
    let sent = send(&server, "ana", &MessageBody::broadcast("oi")).await;

    let response = server
        .put_as(
            &format!("/messages/{}", sent.id),
            "ana",
            &MessageBody::private("bob", "oi bob"),
        )
        .await
        .unwrap();
    let edited: MessageJson = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(edited.id, sent.id);
    assert_eq!(edited.to, "bob");
    assert_eq!(edited.text, "oi bob");
    assert_eq!(edited.kind, "private_message");
}

#[tokio::test]
async fn test_non_owner_cannot_edit_or_delete() {
    let server = server().await;
    join(&server, "ana").await;
    join(&server, "bob").await;
    let sent = send(&server, "ana", &MessageBody::broadcast("oi")).await;
    let path = format!("/messages/{}", sent.id);

    let response = server
        .put_as(&path, "bob", &MessageBody::broadcast("hijacked"))
        .await
        .unwrap();
    assert_eq!(
        error_code(response, StatusCode::UNAUTHORIZED).await,
        "NOT_MESSAGE_AUTHOR"
    );

    let response = server.delete_as(&path, "bob").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let unchanged = read(&server, "cat").await;
    let message = unchanged.iter().find(|m| m.id == sent.id).unwrap();
    assert_eq!(message.text, "oi");
}

#[tokio::test]
async fn test_status_messages_are_immutable() {
    let server = server().await;
    join(&server, "ana").await;

    let status = read(&server, "ana").await.remove(0);
    assert_eq!(status.kind, "status");
    let path = format!("/messages/{}", status.id);

    let response = server
        .put_as(&path, "ana", &MessageBody::broadcast("rewritten"))
        .await
        .unwrap();
    assert_eq!(
        error_code(response, StatusCode::UNAUTHORIZED).await,
        "STATUS_IMMUTABLE"
    );

    let response = server.delete_as(&path, "ana").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_delete_once() {
    let server = server().await;
    join(&server, "ana").await;
    let sent = send(&server, "ana", &MessageBody::broadcast("oi")).await;
    let path = format!("/messages/{}", sent.id);

    let response = server.delete_as(&path, "ana").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.delete_as(&path, "ana").await.unwrap();
    assert_eq!(
        error_code(response, StatusCode::NOT_FOUND).await,
        "UNKNOWN_MESSAGE"
    );

    assert!(!read(&server, "ana").await.iter().any(|m| m.id == sent.id));
}

#[tokio::test]
async fn test_unknown_message_ids() {
    let server = server().await;
    join(&server, "ana").await;

    let response = server
        .put_as("/messages/999", "ana", &MessageBody::broadcast("oi"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.delete_as("/messages/not-a-number", "ana").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Eviction Tests
// ============================================================================

#[tokio::test]
async fn test_silent_participant_is_evicted() {
    let server = TestServer::start_with_sweeper(1, 1)
        .await
        .expect("Failed to start server");
    join(&server, "ana").await;

    tokio::time::sleep(Duration::from_millis(3500)).await;

    let response = server.get("/participants").await.unwrap();
    let participants: Vec<ParticipantJson> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(participants.is_empty());

    let left: Vec<_> = read(&server, "bob")
        .await
        .into_iter()
        .filter(|m| m.text == "left")
        .collect();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].from, "ana");
    assert_eq!(left[0].kind, "status");

    let response = server
        .request(reqwest::Method::POST, "/status", Some("ana"))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    server.stop().await;
}
