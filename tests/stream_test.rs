//! End-to-end tests for the `/stream` route against a mocked player API.

mod common;

use std::time::Duration;

use common::{API_KEY, PLAYER_PATH, TestHarness, combined_format, playable};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn returns_combined_stream_url() {
    let h = TestHarness::start().await;
    h.mock_player(playable(
        vec![combined_format(18, 480, "https://example/480.mp4")],
        vec![],
    ))
    .await;

    let resp = h.get("/stream?url=dQw4w9WgXcQ").await;
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json, json!({"url": "https://example/480.mp4"}));
}

#[tokio::test]
async fn sends_fixed_client_context() {
    let h = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path(PLAYER_PATH))
        .and(query_param("key", API_KEY))
        .and(header("content-type", "application/json"))
        .and(header("origin", "https://www.youtube.com"))
        .and(header(
            "referer",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        ))
        .and(body_partial_json(json!({
            "context": {"client": {
                "clientName": "WEB",
                "clientVersion": "2.20240503.00.01",
                "hl": "en",
                "gl": "US"
            }},
            "videoId": "dQw4w9WgXcQ"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(playable(
            vec![combined_format(22, 720, "https://example/720.mp4")],
            vec![],
        )))
        .expect(1)
        .mount(&h.upstream)
        .await;

    let resp = h
        .get("/stream?url=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3DdQw4w9WgXcQ%26t%3D1")
        .await;
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["url"], "https://example/720.mp4");
}

#[tokio::test]
async fn short_link_is_accepted() {
    let h = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path(PLAYER_PATH))
        .and(body_partial_json(json!({"videoId": "dQw4w9WgXcQ"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(playable(
            vec![combined_format(18, 360, "https://example/360.mp4")],
            vec![],
        )))
        .mount(&h.upstream)
        .await;

    let resp = h
        .get("/stream?url=https%3A%2F%2Fyoutu.be%2FdQw4w9WgXcQ%3Fsi%3Dabc")
        .await;
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn redirect_issues_found_with_location() {
    let h = TestHarness::start().await;
    h.mock_player(playable(
        vec![combined_format(18, 480, "https://example/480.mp4")],
        vec![],
    ))
    .await;

    let resp = h.get("/stream?url=dQw4w9WgXcQ&redirect=true").await;
    assert_eq!(resp.status(), 302);
    assert_eq!(
        resp.headers().get("location").unwrap(),
        "https://example/480.mp4"
    );
}

#[tokio::test]
async fn redirect_false_returns_json() {
    let h = TestHarness::start().await;
    h.mock_player(playable(
        vec![combined_format(18, 480, "https://example/480.mp4")],
        vec![],
    ))
    .await;

    let resp = h.get("/stream?url=dQw4w9WgXcQ&redirect=0").await;
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn itag_selects_adaptive_format() {
    let h = TestHarness::start().await;
    h.mock_player(playable(
        vec![combined_format(22, 720, "https://example/720.mp4")],
        vec![json!({
            "itag": 140,
            "mimeType": "audio/mp4; codecs=\"mp4a.40.2\"",
            "audioQuality": "AUDIO_QUALITY_MEDIUM",
            "url": "https://example/audio.m4a"
        })],
    ))
    .await;

    let resp = h.get("/stream?url=dQw4w9WgXcQ&itag=140").await;
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["url"], "https://example/audio.m4a");
}

#[tokio::test]
async fn unplayable_video_is_forbidden() {
    let h = TestHarness::start().await;
    h.mock_player(json!({
        "playabilityStatus": {"status": "ERROR", "reason": "Private video"}
    }))
    .await;

    let resp = h.get("/stream?url=dQw4w9WgXcQ").await;
    assert_eq!(resp.status(), 403);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Private video"));
}

#[tokio::test]
async fn invalid_input_is_bad_request_without_upstream_call() {
    let h = TestHarness::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.upstream)
        .await;

    let resp = h.get("/stream?url=not%20a%20video").await;
    assert_eq!(resp.status(), 400);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["detail"], "Invalid YouTube URL or video ID");
}

#[tokio::test]
async fn upstream_error_is_retrieval_failure() {
    let h = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path(PLAYER_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&h.upstream)
        .await;

    let resp = h.get("/stream?url=dQw4w9WgXcQ").await;
    assert_eq!(resp.status(), 500);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["detail"], "Failed to retrieve video information");
}

#[tokio::test]
async fn upstream_timeout_is_retrieval_failure() {
    let h = TestHarness::start_with_timeout(Duration::from_millis(200)).await;
    Mock::given(method("POST"))
        .and(path(PLAYER_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(playable(vec![], vec![]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&h.upstream)
        .await;

    let resp = h.get("/stream?url=dQw4w9WgXcQ").await;
    assert_eq!(resp.status(), 500);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["detail"], "Failed to retrieve video information");
}

#[tokio::test]
async fn no_urls_is_not_found() {
    let h = TestHarness::start().await;
    h.mock_player(playable(
        vec![json!({"itag": 18, "mimeType": "video/mp4", "signatureCipher": "s=abc"})],
        vec![],
    ))
    .await;

    let resp = h.get("/stream?url=dQw4w9WgXcQ").await;
    assert_eq!(resp.status(), 404);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["detail"], "No suitable stream URL found");
}

#[tokio::test]
async fn malformed_document_is_internal_error() {
    let h = TestHarness::start().await;
    h.mock_player(json!({
        "playabilityStatus": {"status": "OK"},
        "streamingData": {"formats": "not a list"}
    }))
    .await;

    let resp = h.get("/stream?url=dQw4w9WgXcQ").await;
    assert_eq!(resp.status(), 500);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["detail"], "Internal server error");
}

#[tokio::test]
async fn query_validation_errors_are_unprocessable() {
    let h = TestHarness::start().await;

    assert_eq!(h.get("/stream").await.status(), 422);
    assert_eq!(
        h.get("/stream?url=dQw4w9WgXcQ&itag=abc").await.status(),
        422
    );
    assert_eq!(
        h.get("/stream?url=dQw4w9WgXcQ&redirect=maybe").await.status(),
        422
    );
}
