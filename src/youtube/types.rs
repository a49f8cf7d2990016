use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, YtdError};

#[derive(Debug, Serialize)]
pub struct InnertubeRequest<'a> {
    pub context: InnertubeContext,
    #[serde(rename = "videoId")]
    pub video_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct InnertubeContext {
    pub client: ClientInfo,
}

#[derive(Debug, Serialize)]
pub struct ClientInfo {
    #[serde(rename = "clientName")]
    pub client_name: &'static str,
    #[serde(rename = "clientVersion")]
    pub client_version: &'static str,
    pub hl: &'static str,
    pub gl: &'static str,
}

/// The parts of the player response the stream lookup reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerResponse {
    #[serde(rename = "playabilityStatus")]
    pub playability_status: Option<PlayabilityStatus>,
    #[serde(rename = "streamingData")]
    pub streaming_data: Option<StreamingData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayabilityStatus {
    pub status: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamingData {
    pub formats: Option<Vec<StreamFormat>>,
    #[serde(rename = "adaptiveFormats")]
    pub adaptive_formats: Option<Vec<StreamFormat>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamFormat {
    pub itag: Option<i64>,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
    pub height: Option<u32>,
    /// Only present on streams that carry audio
    #[serde(rename = "audioQuality")]
    pub audio_quality: Option<String>,
    pub url: Option<String>,
}

impl PlayerResponse {
    pub fn from_document(document: Value) -> Result<Self> {
        serde_json::from_value(document).map_err(|e| YtdError::InvalidResponse(e.to_string()))
    }

    /// Fails when upstream reports anything other than `OK`. A missing status
    /// object means there is nothing to object to.
    pub fn ensure_playable(&self) -> Result<()> {
        let Some(playability) = &self.playability_status else {
            return Ok(());
        };
        match playability.status.as_deref() {
            Some("OK") => Ok(()),
            status => Err(YtdError::Unplayable {
                status: status.unwrap_or_default().to_string(),
                reason: playability
                    .reason
                    .clone()
                    .unwrap_or_else(|| "Video unavailable".to_string()),
            }),
        }
    }

    /// Progressive formats first, then adaptive ones
    pub fn formats(&self) -> Vec<&StreamFormat> {
        let Some(data) = &self.streaming_data else {
            return Vec::new();
        };
        data.formats
            .iter()
            .flatten()
            .chain(data.adaptive_formats.iter().flatten())
            .collect()
    }
}

impl StreamFormat {
    pub fn playable_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    pub fn is_mp4(&self) -> bool {
        self.mime_type
            .as_deref()
            .is_some_and(|m| m.starts_with("video/mp4"))
    }

    pub fn has_audio(&self) -> bool {
        self.audio_quality.as_deref().is_some_and(|q| !q.is_empty())
    }
}
