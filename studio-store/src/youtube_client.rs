use async_trait::async_trait;
use serde::Deserialize;
use studio_core::search::{FoundVideo, SearchError, VideoSearch};
use tracing::{error, info};

/// YouTube Data API v3 search client.
#[derive(Clone)]
pub struct YoutubeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl YoutubeClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

impl SearchItem {
    fn into_found(self) -> Option<FoundVideo> {
        let video_id = self.id.video_id?;
        let Thumbnails { medium, default } = self.snippet.thumbnails;
        let thumbnail = medium.or(default).map(|t| t.url);
        Some(FoundVideo::new(video_id, self.snippet.title, thumbnail, self.snippet.channel_title))
    }
}

#[async_trait]
impl VideoSearch for YoutubeClient {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<FoundVideo>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            error!("YouTube API key not configured");
            SearchError::NotConfigured
        })?;

        info!("Searching YouTube for: {}", query);

        let max_results = max_results.to_string();
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: Option<ApiErrorBody> = response.json().await.ok();
            let message = body
                .and_then(|b| b.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| "YouTube API error".to_string());
            error!("YouTube API error ({}): {}", status, message);
            return Err(SearchError::Upstream { status: status.as_u16(), message });
        }

        let body: SearchListResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let videos: Vec<FoundVideo> = body.items.into_iter().filter_map(SearchItem::into_found).collect();
        info!("Found {} videos", videos.len());
        Ok(videos)
    }
}
