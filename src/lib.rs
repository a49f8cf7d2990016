pub mod config;
mod download;
pub mod error;
pub mod server;
pub mod stream;
pub mod youtube;

pub use config::{ServerConfig, UpstreamConfig};
pub use error::{Result, RetrievalKind, YtdError};
pub use server::{AppContext, create_router, start_server};
pub use stream::{StreamRequest, resolve_stream};
pub use youtube::{InnertubeClient, PlayerSource, extract_video_id, select_stream_url};
