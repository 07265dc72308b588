// --- File: crates/habitly_fcm/tests/client_tests.rs ---

use habitly_common::models::PushNote;
use habitly_config::FirebaseConfig;
use habitly_fcm::{FcmClient, FcmError};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> FirebaseConfig {
    FirebaseConfig {
        project_id: Some("test-project".to_string()),
        // No key path, so the client sends no Authorization header and the
        // mock server needs no token exchange.
        key_path: None,
    }
}

fn note() -> PushNote {
    PushNote {
        title: "습관 트래커".to_string(),
        body: "지금 \"물 마시기\" 할 시간이에요!".to_string(),
    }
}

#[tokio::test]
async fn send_to_token_returns_receipt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/projects/test-project/messages:send"))
        .and(body_partial_json(serde_json::json!({
            "message": {
                "token": "device-token-1",
                "notification": {
                    "title": "습관 트래커",
                    "body": "지금 \"물 마시기\" 할 시간이에요!"
                },
                "webpush": { "headers": { "Urgency": "high" } },
                "android": { "priority": "HIGH" }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "projects/test-project/messages/0:1234"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FcmClient::with_base_url(test_config(), server.uri());
    let receipt = client.send_to_token("device-token-1", &note()).await.unwrap();

    assert_eq!(receipt.message_id, "projects/test-project/messages/0:1234");
}

#[tokio::test]
async fn unregistered_token_maps_to_unregistered_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/projects/test-project/messages:send"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": {
                "code": 404,
                "status": "NOT_FOUND",
                "message": "Requested entity was not found.",
                "details": [{
                    "@type": "type.googleapis.com/google.firebase.fcm.v1.FcmError",
                    "errorCode": "UNREGISTERED"
                }]
            }
        })))
        .mount(&server)
        .await;

    let client = FcmClient::with_base_url(test_config(), server.uri());
    let err = client.send_to_token("stale-token", &note()).await.unwrap_err();

    assert!(matches!(err, FcmError::Unregistered));
}

#[tokio::test]
async fn server_error_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/projects/test-project/messages:send"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": {
                "code": 500,
                "status": "INTERNAL",
                "message": "Internal error encountered."
            }
        })))
        .mount(&server)
        .await;

    let client = FcmClient::with_base_url(test_config(), server.uri());
    let err = client.send_to_token("device-token-1", &note()).await.unwrap_err();

    match err {
        FcmError::ApiError(msg) => assert!(msg.contains("Internal error")),
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_project_id_is_a_config_error() {
    let client = FcmClient::with_base_url(
        FirebaseConfig {
            project_id: None,
            key_path: None,
        },
        "http://localhost:0".to_string(),
    );
    let err = client.send_to_token("device-token-1", &note()).await.unwrap_err();

    assert!(matches!(err, FcmError::ConfigError(_)));
}
