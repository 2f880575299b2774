use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_RESULTS: u32 = 5;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSearchRequest {
    #[serde(default)]
    pub query: String,
    pub max_results: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoundVideo {
    pub video_id: String,
    pub title: String,
    pub thumbnail: Option<String>,
    pub channel_title: String,
    pub url: String,
    pub shorts_url: String,
}

impl FoundVideo {
    pub fn new(video_id: String, title: String, thumbnail: Option<String>, channel_title: String) -> Self {
        Self {
            url: format!("https://www.youtube.com/watch?v={}", video_id),
            shorts_url: format!("https://www.youtube.com/shorts/{}", video_id),
            video_id,
            title,
            thumbnail,
            channel_title,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSearchResponse {
    pub videos: Vec<FoundVideo>,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Query is required")]
    EmptyQuery,
    #[error("YouTube API key not configured")]
    NotConfigured,
    /// The search API answered with a non-success status.
    #[error("{message}")]
    Upstream { status: u16, message: String },
    #[error("Search request failed: {0}")]
    Transport(String),
}

/// Outbound video search used by the admin panel to find clips to add.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<FoundVideo>, SearchError>;
}
