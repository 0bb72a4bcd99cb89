//! Synthesis round trips against a mocked TTS backend.

use std::time::{Duration, Instant};

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde_json::{json, Value};
use seedtts_http::{SynthesisClient, SynthesisConfig, SynthesisErrorDescription};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, timeout: Duration) -> SynthesisClient {
    let mut config = SynthesisConfig::new(
        format!("{}/api/v1/tts", server.uri()),
        "test-token",
        "test-app",
        "volcano_tts",
        "BV001_streaming",
    );
    config.timeout = timeout;
    SynthesisClient::new(config).unwrap()
}

fn tts_response(code: i64, data: &str) -> Value {
    json!({
        "reqid": "6c1d3e1f-6b0e-4e8f-9a52-1f4e0d1c2b3a",
        "code": code,
        "Message": if code == 3000 { "Success" } else { "server error" },
        "operation": "query",
        "sequence": -1,
        "data": data,
    })
}

#[tokio::test]
async fn test_success_returns_decoded_audio() {
    let mock_server = MockServer::start().await;
    let audio = b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec();

    Mock::given(method("POST"))
        .and(path("/api/v1/tts"))
        .and(header("Authorization", "Bearer;test-token"))
        .and(header("Content-Type", "application/json"))
        .and(body_partial_json(json!({
            "app": {"appid": "test-app", "token": "access_token", "cluster": "volcano_tts"},
            "user": {"uid": "uid"},
            "audio": {"voice_type": "BV001_streaming", "encoding": "wav"},
            "request": {"text": "字节跳动语音合成", "text_type": "plain", "operation": "query"},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(tts_response(3000, &BASE64.encode(&audio))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    let result = client.synthesize("字节跳动语音合成").await.unwrap();

    assert_eq!(result, audio);
}

#[tokio::test]
async fn test_each_call_sends_a_new_reqid() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tts_response(3000, "AAAA")))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    client.synthesize("same").await.unwrap();
    client.synthesize("same").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let reqids = requests
        .iter()
        .map(|r| {
            let body: Value = serde_json::from_slice(&r.body).unwrap();
            body["request"]["reqid"].as_str().unwrap().to_string()
        })
        .collect::<Vec<_>>();

    assert_eq!(reqids.len(), 2);
    uuid::Uuid::parse_str(&reqids[0]).unwrap();
    assert_ne!(reqids[0], reqids[1]);
}

#[tokio::test]
async fn test_non_success_code_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tts_response(3001, "AAAA")))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    let err = client.synthesize("hello").await.unwrap_err();

    assert!(matches!(err.as_inner(), SynthesisErrorDescription::ResponseCode));
    assert_eq!(err.to_string(), "response code failure");
}

#[tokio::test]
async fn test_error_code_with_http_error_status_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(tts_response(3011, "")))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    let err = client.synthesize("").await.unwrap_err();

    assert!(matches!(err.as_inner(), SynthesisErrorDescription::ResponseCode));
}

#[tokio::test]
async fn test_slow_backend_times_out_after_deadline() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(tts_response(3000, "AAAA"))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&mock_server)
        .await;

    let timeout = Duration::from_secs(1);
    let client = client_for(&mock_server, timeout);

    let start = Instant::now();
    let err = client.synthesize("hello").await.unwrap_err();
    let elapsed = start.elapsed();

    assert!(matches!(err.as_inner(), SynthesisErrorDescription::Transport(_)));
    assert!(err.is_timeout());
    assert!(elapsed >= timeout, "returned before the timeout: {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(10), "waited for the full delay: {:?}", elapsed);
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let mut config = SynthesisConfig::new("http://127.0.0.1:1/api/v1/tts", "tok", "app", "cluster", "BV001_streaming");
    config.timeout = Duration::from_secs(5);
    let client = SynthesisClient::new(config).unwrap();

    let err = client.synthesize("hello").await.unwrap_err();

    assert!(matches!(err.as_inner(), SynthesisErrorDescription::Transport(_)));
}

#[tokio::test]
async fn test_non_json_body_is_deserialization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    let err = client.synthesize("hello").await.unwrap_err();

    assert!(matches!(err.as_inner(), SynthesisErrorDescription::Deserialization(_)));
}

#[tokio::test]
async fn test_array_bodies_are_deserialization_errors() {
    for body in ["[]", r#"["r",3000,"","",0,"AQID"]"#] {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server, Duration::from_secs(5));
        let err = client.synthesize("hello").await.unwrap_err();

        assert!(
            matches!(err.as_inner(), SynthesisErrorDescription::Deserialization(_)),
            "body {} gave {:?}",
            body,
            err
        );
    }
}

#[tokio::test]
async fn test_invalid_base64_payload_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tts_response(3000, "%%%not-base64%%%")))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, Duration::from_secs(5));
    let err = client.synthesize("hello").await.unwrap_err();

    assert!(matches!(err.as_inner(), SynthesisErrorDescription::Decode(_)));
}

#[test]
fn test_blocking_call_outside_runtime() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mock_server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tts_response(3000, "AQID")))
            .mount(&server)
            .await;
        server
    });

    let client = client_for(&mock_server, Duration::from_secs(5));
    let audio = client.synthesize_blocking("blocking").unwrap();

    assert_eq!(audio, vec![1u8, 2, 3]);
}
