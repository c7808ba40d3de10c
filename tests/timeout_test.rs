use httpmock::prelude::*;
use resource_http::{
    AssetsConfig, HttpProtocol, ProtocolConfig, ProtocolError, ReqwestBackend, RequestParams,
    ResourceProtocol, ResourceRequest, ResponseType, ServerConfig, TransformPipeline,
};
use std::time::{Duration, Instant};

fn protocol_for(server: &MockServer) -> HttpProtocol<ReqwestBackend> {
    HttpProtocol::with_config(
        ReqwestBackend::new(),
        ProtocolConfig {
            server: ServerConfig {
                address: server.base_url(),
                response_type: ResponseType::Json,
                content_type: String::new(),
            },
            assets: AssetsConfig::default(),
        },
    )
}

#[tokio::test]
async fn stalled_transport_yields_a_normalized_408() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/slow");
        then.status(200)
            .delay(Duration::from_secs(5))
            .json_body(serde_json::json!({"late": true}));
    });

    let protocol = protocol_for(&server);
    let request = ResourceRequest::new("remote", "/slow").with_params(
        RequestParams::new()
            .header("X-Trace", "t-1")
            .timeout(Duration::from_millis(100)),
    );

    let started = Instant::now();
    let err = protocol
        .request(request, &TransformPipeline::new())
        .await
        .unwrap_err();
    let elapsed = started.elapsed();

    assert!(elapsed < Duration::from_secs(2), "timed out in {elapsed:?}");
    match err {
        ProtocolError::Timeout {
            status,
            message,
            headers,
            address,
        } => {
            assert_eq!(status, 408);
            assert!(!message.is_empty());
            assert_eq!(headers.get("X-Trace").map(String::as_str), Some("t-1"));
            assert_eq!(address, "/slow");
        }
        other => panic!("expected normalized timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn fast_responses_are_unaffected_by_the_deadline() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/fast");
        then.status(200).json_body(serde_json::json!({"ok": true}));
    });

    let protocol = protocol_for(&server);
    let request = ResourceRequest::new("remote", "/fast")
        .with_params(RequestParams::new().timeout(Duration::from_secs(5)));
    let response = protocol
        .request(request, &TransformPipeline::new())
        .await
        .unwrap();
    assert_eq!(response.as_json().unwrap()["ok"], true);
}
