use serde::{Deserialize, Deserializer, de};

use crate::error::{Result, YtdError};
use crate::youtube::{PlayerResponse, PlayerSource, parse_id, select_stream_url};

/// Inbound lookup parameters
#[derive(Debug, Clone, Deserialize)]
pub struct StreamRequest {
    /// Watch URL, short link, or bare video id
    pub url: String,
    /// Preferred format tag
    #[serde(default)]
    pub itag: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub redirect: bool,
}

/// Resolve a URL or id to one playable stream URL
pub async fn resolve_stream(
    source: &dyn PlayerSource,
    url: &str,
    itag: Option<i64>,
) -> Result<String> {
    let video_id = parse_id(url)?;
    let document = source.fetch_player(&video_id).await?;

    let player = PlayerResponse::from_document(document)?;
    if let Err(err) = player.ensure_playable() {
        tracing::warn!(video_id = %video_id, "{}", err);
        return Err(err);
    }

    let url = select_stream_url(player.formats(), itag).ok_or(YtdError::StreamNotFound)?;
    tracing::debug!(video_id = %video_id, ?itag, "Resolved stream URL");
    Ok(url.to_string())
}

/// Parse a boolean query flag the way form parsers usually accept it
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_flag(&value)
        .ok_or_else(|| de::Error::custom(format!("invalid boolean value: {value:?}")))
}
