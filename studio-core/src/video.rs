use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VideoType {
    Youtube,
    Tiktok,
    YoutubeShorts,
}

impl VideoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoType::Youtube => "youtube",
            VideoType::Tiktok => "tiktok",
            VideoType::YoutubeShorts => "youtube_shorts",
        }
    }

    pub fn parse(value: &str) -> CoreResult<Self> {
        match value {
            "youtube" => Ok(VideoType::Youtube),
            "tiktok" => Ok(VideoType::Tiktok),
            "youtube_shorts" => Ok(VideoType::YoutubeShorts),
            other => Err(CoreError::ValidationError(format!("Unknown video type: {}", other))),
        }
    }

    /// Shorts section takes TikTok and YouTube Shorts; the main section
    /// takes regular YouTube videos.
    pub fn is_short(&self) -> bool {
        matches!(self, VideoType::Tiktok | VideoType::YoutubeShorts)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub video_url: String,
    pub video_type: VideoType,
    pub category: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVideo {
    pub title: String,
    pub video_url: String,
    pub video_type: VideoType,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_category() -> String {
    "general".to_string()
}

fn default_true() -> bool {
    true
}

impl NewVideo {
    pub fn validate(&self) -> CoreResult<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::ValidationError("Video title is required".to_string()));
        }
        if self.video_url.trim().is_empty() {
            return Err(CoreError::ValidationError("Video URL is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoPatch {
    pub title: Option<String>,
    pub video_url: Option<String>,
    pub video_type: Option<VideoType>,
    pub category: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

impl VideoPatch {
    pub fn validate(&self) -> CoreResult<()> {
        if matches!(&self.title, Some(t) if t.trim().is_empty()) {
            return Err(CoreError::ValidationError("Video title cannot be empty".to_string()));
        }
        if matches!(&self.video_url, Some(u) if u.trim().is_empty()) {
            return Err(CoreError::ValidationError("Video URL cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn apply(self, video: &mut Video) {
        if let Some(title) = self.title {
            video.title = title;
        }
        if let Some(url) = self.video_url {
            video.video_url = url;
        }
        if let Some(kind) = self.video_type {
            video.video_type = kind;
        }
        if let Some(category) = self.category {
            video.category = category;
        }
        if let Some(order) = self.display_order {
            video.display_order = order;
        }
        if let Some(active) = self.is_active {
            video.is_active = active;
        }
        video.updated_at = Utc::now();
    }
}

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:shorts/|[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("static youtube id pattern")
});

/// Extract the 11-character id from any of the usual YouTube URL forms.
pub fn youtube_id(url: &str) -> Option<&str> {
    YOUTUBE_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// URL to put in the player iframe. TikTok links and unrecognised YouTube
/// URLs are passed through untouched.
pub fn embed_url(video_type: VideoType, url: &str) -> String {
    match video_type {
        VideoType::Youtube | VideoType::YoutubeShorts => match youtube_id(url) {
            Some(id) => format!("https://www.youtube.com/embed/{}", id),
            None => url.to_string(),
        },
        VideoType::Tiktok => url.to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicVideo {
    pub id: Uuid,
    pub title: String,
    pub video_url: String,
    pub video_type: VideoType,
    pub category: String,
    pub embed_url: String,
}

impl From<&Video> for PublicVideo {
    fn from(video: &Video) -> Self {
        Self {
            id: video.id,
            title: video.title.clone(),
            video_url: video.video_url.clone(),
            video_type: video.video_type,
            category: video.category.clone(),
            embed_url: embed_url(video.video_type, &video.video_url),
        }
    }
}

/// The two video sections of the landing page.
#[derive(Debug, Clone, Serialize, Default)]
pub struct VideoSections {
    pub videos: Vec<PublicVideo>,
    pub shorts: Vec<PublicVideo>,
}

impl VideoSections {
    /// Split active videos into sections, keeping the incoming order.
    pub fn from_videos(videos: &[Video]) -> Self {
        let mut sections = VideoSections::default();
        for video in videos.iter().filter(|v| v.is_active) {
            if video.video_type.is_short() {
                sections.shorts.push(video.into());
            } else {
                sections.videos.push(video.into());
            }
        }
        sections
    }
}
