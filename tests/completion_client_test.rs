//! HTTP-level tests for the chat-completions adapter.

use appraise::infrastructure::openai::{OpenAiClient, OpenAiClientConfig};
use appraise::{CompletionRequest, CompletionService, ServiceError};

fn client_for(server: &mockito::ServerGuard) -> OpenAiClient {
    OpenAiClient::new(OpenAiClientConfig {
        api_key: "test-api-key".to_string(),
        base_url: server.url(),
        timeout_secs: 5,
    })
    .unwrap()
}

fn request() -> CompletionRequest {
    CompletionRequest {
        system: Some("You are a control effectiveness evaluation agent.".to_string()),
        prompt: "Evaluate this control.".to_string(),
        model: "gpt-4".to_string(),
        temperature: 0.0,
        max_tokens: 256,
    }
}

#[tokio::test]
async fn successful_completion_returns_first_choice_text() {
    let mut server = mockito::Server::new_async().await;
    let body = serde_json::json!({
        "choices": [
            {"message": {"role": "assistant", "content": "```json\n{\"overall_score\": 4}\n```"},
             "finish_reason": "stop"}
        ]
    });
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer test-api-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let text = client_for(&server).complete(request()).await.unwrap();
    assert!(text.contains("overall_score"));
    mock.assert_async().await;
}

#[tokio::test]
async fn unauthorized_maps_to_api_error_with_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body("invalid key")
        .create_async()
        .await;

    let error = client_for(&server).complete(request()).await.unwrap_err();
    match error {
        ServiceError::Api { status, .. } => assert_eq!(status, 401),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_maps_to_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let error = client_for(&server).complete(request()).await.unwrap_err();
    match error {
        ServiceError::Api { status, message } => {
            assert_eq!(status, 503);
            assert!(message.contains("overloaded"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_maps_to_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("this is not json")
        .create_async()
        .await;

    let error = client_for(&server).complete(request()).await.unwrap_err();
    assert!(matches!(error, ServiceError::Decode(_)));
}

#[tokio::test]
async fn empty_choices_maps_to_empty_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!({"choices": []}).to_string())
        .create_async()
        .await;

    let error = client_for(&server).complete(request()).await.unwrap_err();
    assert_eq!(error, ServiceError::EmptyResponse);
}
