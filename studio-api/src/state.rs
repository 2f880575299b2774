use std::path::PathBuf;
use std::sync::Arc;

use studio_core::repository::{
    CourseRepository, OrderRepository, PackageRepository, SettingsRepository, VideoRepository,
};
use studio_core::search::VideoSearch;
use studio_store::{MediaStore, RedisClient};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
    pub default_admin_password: String,
}

#[derive(Clone)]
pub struct AppState {
    pub settings_repo: Arc<dyn SettingsRepository>,
    pub video_repo: Arc<dyn VideoRepository>,
    pub package_repo: Arc<dyn PackageRepository>,
    pub course_repo: Arc<dyn CourseRepository>,
    pub order_repo: Arc<dyn OrderRepository>,
    pub video_search: Arc<dyn VideoSearch>,
    pub media: MediaStore,
    /// Rate limiting is skipped when `None`.
    pub redis: Option<Arc<RedisClient>>,
    pub requests_per_minute: i64,
    pub auth: AuthConfig,
    pub search_max_results: u32,
    /// Prebuilt frontend bundle.
    pub static_dir: PathBuf,
}
