//! HTTP contract tests against the in-process stub service.

use errlens_client::{ClassifierClient, ClientConfig};
use errlens_core::{built_in_examples, ExamplesEnvelope, WorkflowController, WorkflowPhase};
use errlens_test_utils::*;
use serde_json::json;
use std::time::Duration;

async fn client_for(routes: StubRoutes) -> (StubService, ClassifierClient) {
    let service = StubService::start(routes).await.expect("stub service should bind");
    let client = ClassifierClient::new(&ClientConfig::new(service.base_url()))
        .expect("client should build");
    (service, client)
}

#[tokio::test]
async fn classify_posts_request_once_as_json() {
    let (service, client) = client_for(StubRoutes::classify(StubReply::json(
        200,
        function_name_response_json(),
    )))
    .await;

    let response = client.classify(&calculator_request()).await.unwrap();

    assert_eq!(response, function_name_response());
    assert_eq!(service.classify_hits(), 1);
    assert_eq!(service.classify_bodies(), vec![calculator_request_json()]);
    assert_eq!(
        service.classify_content_types(),
        vec![Some("application/json".to_string())]
    );
}

#[tokio::test]
async fn server_error_detail_is_surfaced() {
    let (_service, client) = client_for(StubRoutes::classify(StubReply::json(
        500,
        json!({"detail": "model unavailable"}),
    )))
    .await;

    let err = client.classify(&calculator_request()).await.unwrap_err();
    assert_eq!(err, ClassifyError::service(500, "model unavailable"));
}

#[tokio::test]
async fn server_error_without_body_gets_generic_message() {
    let (_service, client) = client_for(StubRoutes::classify(StubReply::empty(500))).await;

    let err = client.classify(&calculator_request()).await.unwrap_err();
    match err {
        ClassifyError::Service { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Classification failed");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn success_with_wrong_shape_is_malformed() {
    let (_service, client) = client_for(StubRoutes::classify(StubReply::json(
        200,
        json!({"prediction": "Correct"}),
    )))
    .await;

    let err = client.classify(&calculator_request()).await.unwrap_err();
    assert!(matches!(err, ClassifyError::MalformedResponse { .. }));
}

#[tokio::test]
async fn success_with_out_of_range_confidence_is_malformed() {
    let mut body = function_name_response_json();
    body["confidence"] = json!(87);
    let (_service, client) = client_for(StubRoutes::classify(StubReply::json(200, body))).await;

    let err = client.classify(&calculator_request()).await.unwrap_err();
    assert!(matches!(err, ClassifyError::MalformedResponse { .. }));
}

#[tokio::test]
async fn slow_service_hits_deadline() {
    let service = StubService::start(StubRoutes::classify(
        StubReply::json(200, function_name_response_json()).delayed(Duration::from_secs(5)),
    ))
    .await
    .unwrap();
    let config = ClientConfig::new(service.base_url()).with_timeout(Duration::from_millis(100));
    let client = ClassifierClient::new(&config).unwrap();

    let err = client.classify(&calculator_request()).await.unwrap_err();
    match err {
        ClassifyError::Transport { reason } => assert!(reason.contains("timed out")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    let service = StubService::start(StubRoutes::default()).await.unwrap();
    let base_url = service.base_url();
    drop(service);
    tokio::time::sleep(Duration::from_millis(20)).await;

    let client = ClassifierClient::new(&ClientConfig::new(base_url)).unwrap();
    let err = client.classify(&calculator_request()).await.unwrap_err();
    assert!(matches!(err, ClassifyError::Transport { .. }));
}

#[tokio::test]
async fn list_examples_unwraps_envelope() {
    let envelope = ExamplesEnvelope {
        examples: built_in_examples().to_vec(),
    };
    let (_service, client) = client_for(StubRoutes {
        examples: StubReply::json(200, serde_json::to_value(&envelope).unwrap()),
        ..StubRoutes::default()
    })
    .await;

    let examples = client.list_examples().await.unwrap();
    assert_eq!(examples, built_in_examples());
}

#[tokio::test]
async fn list_examples_failure_uses_examples_fallback() {
    let (_service, client) = client_for(StubRoutes {
        examples: StubReply::empty(503),
        ..StubRoutes::default()
    })
    .await;

    let err = client.list_examples().await.unwrap_err();
    assert_eq!(err, ClassifyError::service(503, "Failed to fetch examples"));
}

#[tokio::test]
async fn health_reports_device() {
    let (_service, client) = client_for(StubRoutes {
        health: StubReply::json(
            200,
            json!({"status": "healthy", "model_loaded": true, "device": "cuda"}),
        ),
        ..StubRoutes::default()
    })
    .await;

    assert_eq!(client.check_health().await.unwrap(), healthy_status());
}

#[tokio::test]
async fn workflow_over_http_reports_service_detail() {
    let (service, client) = client_for(StubRoutes::classify(StubReply::json(
        500,
        json!({"detail": "model unavailable"}),
    )))
    .await;
    let mut controller = WorkflowController::new(built_in_examples());

    assert_eq!(controller.classify(&client).await, WorkflowPhase::Failed);
    assert_eq!(controller.last_error(), Some("model unavailable"));
    assert_eq!(service.classify_hits(), 1);
}

#[tokio::test]
async fn workflow_over_http_skips_network_for_bad_json() {
    let (service, client) = client_for(StubRoutes::classify(StubReply::json(
        200,
        function_name_response_json(),
    )))
    .await;
    let mut controller = WorkflowController::new(built_in_examples());
    controller.edit_input("{not json");

    assert_eq!(controller.classify(&client).await, WorkflowPhase::Failed);
    assert_eq!(service.classify_hits(), 0);
}
