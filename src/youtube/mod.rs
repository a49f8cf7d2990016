use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub mod core;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use self::core::*;
pub use types::{PlayabilityStatus, PlayerResponse, StreamFormat, StreamingData};
pub use utils::{extract_video_id, is_valid_video_id, parse_id};

/// Source of raw player responses
#[async_trait]
pub trait PlayerSource: Send + Sync {
    /// Fetch the player document for a video id
    async fn fetch_player(&self, video_id: &str) -> Result<Value>;
}
