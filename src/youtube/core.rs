use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT};
use serde_json::Value;
use std::cmp::Reverse;

use crate::config::UpstreamConfig;
use crate::download::{build_http_client, post_json};
use crate::error::{Result, RetrievalKind, YtdError};

use super::PlayerSource;
use super::types::{ClientInfo, InnertubeContext, InnertubeRequest, StreamFormat};
use super::utils::{
    INNERTUBE_CLIENT_NAME, INNERTUBE_CLIENT_VERSION, WEB_USER_AGENT, YOUTUBE_ORIGIN,
    build_watch_url,
};

/// Player API client using the fixed WEB client context
#[derive(Debug, Clone)]
pub struct InnertubeClient {
    http: reqwest::Client,
    player_url: String,
}

impl InnertubeClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        Ok(Self {
            http: build_http_client(config.timeout)?,
            player_url: config.player_url().to_string(),
        })
    }

    async fn request_player(&self, video_id: &str) -> Result<Value> {
        let request_body = InnertubeRequest {
            context: InnertubeContext {
                client: ClientInfo {
                    client_name: INNERTUBE_CLIENT_NAME,
                    client_version: INNERTUBE_CLIENT_VERSION,
                    hl: "en",
                    gl: "US",
                },
            },
            video_id,
        };

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(WEB_USER_AGENT));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ORIGIN, HeaderValue::from_static(YOUTUBE_ORIGIN));
        headers.insert(REFERER, HeaderValue::from_str(&build_watch_url(video_id))?);

        tracing::debug!(video_id, "Requesting player response");
        post_json(&self.http, &self.player_url, &request_body, headers).await
    }
}

/// Every transport, status, and decode problem is folded into
/// [`YtdError::RetrievalFailed`]; the underlying cause is logged here.
#[async_trait]
impl PlayerSource for InnertubeClient {
    async fn fetch_player(&self, video_id: &str) -> Result<Value> {
        self.request_player(video_id).await.map_err(|err| {
            let kind = RetrievalKind::classify(&err);
            tracing::error!(video_id, %kind, "Error fetching video: {}", err);
            YtdError::RetrievalFailed {
                video_id: video_id.to_string(),
                kind,
                message: err.to_string(),
            }
        })
    }
}

/// Pick one playable URL out of the merged format list.
///
/// An explicit itag wins when a format with that tag has a URL; otherwise the
/// tallest mp4 stream carrying audio, otherwise the first format with any URL.
pub fn select_stream_url<'a>(
    formats: impl IntoIterator<Item = &'a StreamFormat>,
    itag: Option<i64>,
) -> Option<&'a str> {
    let formats: Vec<&StreamFormat> = formats.into_iter().collect();

    if let Some(itag) = itag
        && let Some(url) = formats
            .iter()
            .filter(|f| f.itag == Some(itag))
            .find_map(|&f| f.playable_url())
    {
        return Some(url);
    }

    let mut combined: Vec<&StreamFormat> = formats
        .iter()
        .copied()
        .filter(|f| f.is_mp4() && f.playable_url().is_some() && f.has_audio())
        .collect();
    // stable: equal heights keep their original order
    combined.sort_by_key(|f| Reverse(f.height.unwrap_or(0)));
    if let Some(url) = combined.first().and_then(|&f| f.playable_url()) {
        return Some(url);
    }

    formats.into_iter().find_map(|f| f.playable_url())
}
