// universe-client/tests/api_boundary.rs
// Envelope decoding and status classification per endpoint

mod common;

use std::sync::Arc;

use common::*;
use serde_json::json;
use shared::models::{ImageUpload, PaymentStatus};
use universe_client::{Api, ClientError};

fn api(backend: &MockBackend) -> Api {
    Api::new(Arc::new(backend.clone()))
}

#[tokio::test]
async fn test_keyed_entities_are_unwrapped() {
    let backend = MockBackend::new();
    backend.once(
        "GET",
        "clubs/3",
        200,
        json!({"success": true, "club": club_json(Some(1500.0))}),
    );
    backend.once(
        "GET",
        "events/club/3",
        200,
        json!({"success": true, "events": [{
            "id": 5,
            "title": "Night walk",
            "description": "Bring a tripod",
            "eventDate": "2026-11-01T18:00:00",
            "location": "Main gate",
            "clubId": 3
        }]}),
    );
    let api = api(&backend);

    let club = api.club(CLUB_ID).await.unwrap();
    assert!(club.requires_payment());
    assert_eq!(club.name, "Photography Society");

    let events = api.club_events(CLUB_ID).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].owner_club_id(), Some(3));
}

#[tokio::test]
async fn test_missing_list_key_is_empty() {
    let backend = MockBackend::new();
    backend.once("GET", "memberships/user/7", 200, json!({"success": true}));

    let memberships = api(&backend).memberships_by_user(USER_ID).await.unwrap();
    assert!(memberships.is_empty());
}

#[tokio::test]
async fn test_search_query_is_encoded() {
    let backend = MockBackend::new();
    backend.once(
        "GET",
        "clubs/search?name=Chess+%26+Go",
        200,
        json!({"success": true, "clubs": []}),
    );

    api(&backend).search_clubs(" Chess & Go ").await.unwrap();
    assert_eq!(backend.count("GET", "clubs/search?name=Chess+%26+Go"), 1);
}

#[tokio::test]
async fn test_status_codes_map_to_error_kinds() {
    let backend = MockBackend::new();
    backend.once("GET", "clubs/1", 401, json!({"success": false, "message": "Invalid token"}));
    backend.once("GET", "clubs/2", 403, json!({"success": false, "message": "Access denied"}));
    backend.once("GET", "clubs/4", 400, json!({"success": false, "message": "Club name is required"}));
    backend.once("GET", "clubs/5", 500, json!({"error": "boom"}));
    let api = api(&backend);

    assert!(matches!(api.club(1).await, Err(ClientError::Unauthorized(_))));
    assert!(matches!(api.club(2).await, Err(ClientError::Forbidden(_))));

    // unscripted routes answer 404
    let err = api.club(3).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));

    match api.club(4).await.unwrap_err() {
        ClientError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Club name is required");
        }
        other => panic!("unexpected {other:?}"),
    }
    match api.club(5).await.unwrap_err() {
        ClientError::Rejected { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_success_false_on_2xx_is_rejection() {
    let backend = MockBackend::new();
    backend.once(
        "POST",
        "memberships/join",
        200,
        json!({"success": false, "message": "Club not found"}),
    );

    let err = api(&backend).join_club(USER_ID, 99).await.unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(err.to_string(), "Club not found");
}

#[tokio::test]
async fn test_missing_entity_key_is_invalid_response() {
    let backend = MockBackend::new();
    backend.once("GET", "clubs/3", 200, json!({"success": true}));

    let err = api(&backend).club(CLUB_ID).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_leave_club_uses_query_and_returns_message() {
    let backend = MockBackend::new();
    backend.once(
        "DELETE",
        "memberships/leave?userId=7&clubId=3",
        200,
        json!({"success": true, "message": "Successfully left the club"}),
    );

    let message = api(&backend).leave_club(USER_ID, CLUB_ID).await.unwrap();
    assert_eq!(message, "Successfully left the club");
}

#[tokio::test]
async fn test_upload_and_verify_are_flat() {
    let backend = MockBackend::new();
    backend.once(
        "POST",
        "upload/image/base64",
        200,
        json!({"fileName": "a1.png", "filePath": "/uploads/a1.png"}),
    );
    backend.once(
        "GET",
        "payments/42/verify",
        200,
        json!({"isSuccessful": true, "status": "SUCCEEDED"}),
    );
    let api = api(&backend);

    let stored = api
        .upload_image(&ImageUpload::from_bytes(b"\x89PNG", Some("logo.png")))
        .await
        .unwrap();
    assert_eq!(stored.file_path, "/uploads/a1.png");
    let body = backend.last_body("POST", "upload/image/base64").unwrap();
    assert_eq!(body["fileName"], "logo.png");

    let verification = api.verify_payment(PAYMENT_ID).await.unwrap();
    assert!(verification.is_successful);
    assert_eq!(verification.status, PaymentStatus::Succeeded);
}

#[tokio::test]
async fn test_empty_upload_never_leaves_the_client() {
    let backend = MockBackend::new();
    let upload = ImageUpload {
        base64: "data:image/png;base64,".into(),
        file_name: None,
    };

    let err = api(&backend).upload_image(&upload).await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected { status: 400, .. }));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_confirm_prefers_explicit_status() {
    let backend = MockBackend::new();
    backend.once(
        "POST",
        "payments/42/confirm",
        200,
        json!({
            "success": true,
            "payment": payment_json("PENDING"),
            "status": "SUCCEEDED",
            "message": "Payment confirmed as SUCCEEDED"
        }),
    );
    backend.once(
        "POST",
        "payments/42/confirm",
        200,
        json!({"success": true, "payment": payment_json("FAILED")}),
    );
    let api = api(&backend);

    let first = api.confirm_payment(PAYMENT_ID).await.unwrap();
    assert_eq!(first.status, PaymentStatus::Succeeded);
    assert_eq!(first.message.as_deref(), Some("Payment confirmed as SUCCEEDED"));

    let second = api.confirm_payment(PAYMENT_ID).await.unwrap();
    assert_eq!(second.status, PaymentStatus::Failed);
}

#[tokio::test]
async fn test_unknown_payment_status_is_tolerated() {
    let backend = MockBackend::new();
    backend.once(
        "GET",
        "payments/session/cs_test_a1B2",
        200,
        json!({"success": true, "payment": payment_json("PARTIALLY_REFUNDED")}),
    );

    let payment = api(&backend).payment_by_session(SESSION_ID).await.unwrap();
    assert_eq!(payment.status, PaymentStatus::Unknown);
}

#[tokio::test]
async fn test_chat_returns_flat_reply() {
    let backend = MockBackend::new();
    backend.once(
        "POST",
        "chatbot/chat",
        200,
        json!({"response": "Club membership fees vary by club."}),
    );
    let api = api(&backend);

    let reply = api.chat("  How much is the membership fee? ").await.unwrap();

    assert_eq!(reply, "Club membership fees vary by club.");
    let body = backend.last_body("POST", "chatbot/chat").unwrap();
    assert_eq!(body, json!({"message": "How much is the membership fee?"}));

    let err = api.chat("   ").await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected { status: 400, .. }));
    assert_eq!(backend.count("POST", "chatbot/chat"), 1);
}
