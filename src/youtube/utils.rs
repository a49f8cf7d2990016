use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, YtdError};

pub const WEB_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";
pub const YOUTUBE_ORIGIN: &str = "https://www.youtube.com";
pub const INNERTUBE_CLIENT_NAME: &str = "WEB";
pub const INNERTUBE_CLIENT_VERSION: &str = "2.20240503.00.01";

const WATCH_MARKER: &str = "youtube.com/watch";
const SHORT_LINK_MARKER: &str = "youtu.be/";

static VIDEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("video id pattern"));

/// Normalize a watch URL, short link, or bare id into a video id.
///
/// Never fails: input that matches none of the known shapes yields an empty
/// string, as does a watch URL without a `v` parameter.
pub fn extract_video_id(input: &str) -> String {
    if input.contains(WATCH_MARKER) {
        return watch_query_param(input, "v").unwrap_or_default();
    }

    if let Some((_, rest)) = input.split_once(SHORT_LINK_MARKER) {
        let segment = rest.split(SHORT_LINK_MARKER).next().unwrap_or(rest);
        return segment.split('?').next().unwrap_or_default().to_string();
    }

    if is_valid_video_id(input) {
        return input.to_string();
    }

    String::new()
}

/// Like [`extract_video_id`], but an empty result is an error
pub fn parse_id(input: &str) -> Result<String> {
    let id = extract_video_id(input);
    if id.is_empty() {
        return Err(YtdError::InvalidUrl(format!(
            "Cannot extract video ID from: {}",
            input
        )));
    }
    Ok(id)
}

/// Validate if a string is a valid YouTube video ID (11 characters, ASCII alphanumeric + - and _)
pub fn is_valid_video_id(id: &str) -> bool {
    VIDEO_ID_RE.is_match(id)
}

/// Construct YouTube watch URL from video ID
pub fn build_watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

// Blank values are skipped and the last remaining occurrence wins.
fn watch_query_param(input: &str, name: &str) -> Option<String> {
    let without_fragment = input.split('#').next().unwrap_or(input);
    let (_, query) = without_fragment.split_once('?')?;
    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(k, v)| k == name && !v.is_empty())
        .map(|(_, v)| v.into_owned())
        .last()
}
