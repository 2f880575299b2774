use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use studio_core::repository::{RepoError, RepoResult, VideoRepository};
use studio_core::video::{NewVideo, Video, VideoPatch, VideoType};
use uuid::Uuid;

pub struct StoreVideoRepository {
    pool: PgPool,
}

impl StoreVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const VIDEO_COLUMNS: &str =
    "id, title, video_url, video_type, category, display_order, is_active, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct VideoRow {
    id: Uuid,
    title: String,
    video_url: String,
    video_type: String,
    category: String,
    display_order: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<VideoRow> for Video {
    type Error = RepoError;

    fn try_from(row: VideoRow) -> Result<Self, Self::Error> {
        Ok(Video {
            id: row.id,
            title: row.title,
            video_url: row.video_url,
            video_type: VideoType::parse(&row.video_type)?,
            category: row.category,
            display_order: row.display_order,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl VideoRepository for StoreVideoRepository {
    async fn list_videos(&self) -> RepoResult<Vec<Video>> {
        let rows = sqlx::query_as::<_, VideoRow>(&format!(
            "SELECT {} FROM videos ORDER BY display_order ASC, created_at ASC",
            VIDEO_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Video::try_from).collect()
    }

    async fn create_video(&self, video: &NewVideo) -> RepoResult<Video> {
        let row = sqlx::query_as::<_, VideoRow>(&format!(
            r#"
            INSERT INTO videos (title, video_url, video_type, category, display_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        ))
        .bind(&video.title)
        .bind(&video.video_url)
        .bind(video.video_type.as_str())
        .bind(&video.category)
        .bind(video.display_order)
        .bind(video.is_active)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn update_video(&self, id: Uuid, patch: VideoPatch) -> RepoResult<Option<Video>> {
        let row = sqlx::query_as::<_, VideoRow>(&format!(
            r#"
            UPDATE videos SET
                title = COALESCE($1, title),
                video_url = COALESCE($2, video_url),
                video_type = COALESCE($3, video_type),
                category = COALESCE($4, category),
                display_order = COALESCE($5, display_order),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $7
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        ))
        .bind(patch.title)
        .bind(patch.video_url)
        .bind(patch.video_type.map(|t| t.as_str()))
        .bind(patch.category)
        .bind(patch.display_order)
        .bind(patch.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Video::try_from).transpose()
    }

    async fn delete_video(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
