//! Shared test harness for integration tests.
//!
//! [`TestHarness::start`] runs a `wiremock` server standing in for the player
//! API and the Axum app on a random port wired to it.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ytd::{AppContext, InnertubeClient, UpstreamConfig, create_router};

pub const PLAYER_PATH: &str = "/youtubei/v1/player";
pub const API_KEY: &str = "test-key";

pub struct TestHarness {
    pub upstream: MockServer,
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestHarness {
    pub async fn start() -> Self {
        Self::start_with_timeout(Duration::from_secs(5)).await
    }

    pub async fn start_with_timeout(timeout: Duration) -> Self {
        let upstream = MockServer::start().await;
        let config = UpstreamConfig::new(
            &format!("{}{}", upstream.uri(), PLAYER_PATH),
            Some(API_KEY.to_string()),
        )
        .expect("valid upstream config")
        .with_timeout(timeout);
        let source = InnertubeClient::new(&config).expect("failed to build client");
        let addr = serve(AppContext::new(source)).await;

        Self {
            upstream,
            addr,
            client: test_client(),
        }
    }

    /// Answer every player request with the given document
    pub async fn mock_player(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path(PLAYER_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.upstream)
            .await;
    }

    pub async fn get(&self, path_and_query: &str) -> reqwest::Response {
        self.client
            .get(format!("http://{}{}", self.addr, path_and_query))
            .send()
            .await
            .expect("request failed")
    }
}

/// Run the app on a random local port
pub async fn serve(ctx: AppContext) -> SocketAddr {
    let app = create_router(ctx);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind random port");
    let addr = listener.local_addr().expect("failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    addr
}

/// HTTP client that does not follow redirects
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("failed to build test client")
}

pub fn combined_format(itag: i64, height: u32, url: &str) -> Value {
    json!({
        "itag": itag,
        "mimeType": "video/mp4; codecs=\"avc1.42001E, mp4a.40.2\"",
        "height": height,
        "audioQuality": "AUDIO_QUALITY_LOW",
        "url": url
    })
}

pub fn playable(formats: Vec<Value>, adaptive: Vec<Value>) -> Value {
    json!({
        "playabilityStatus": {"status": "OK"},
        "streamingData": {
            "formats": formats,
            "adaptiveFormats": adaptive
        }
    })
}
