pub mod app_config;
pub mod catalog_repo;
pub mod database;
pub mod media;
pub mod order_repo;
pub mod redis_repo;
pub mod settings_repo;
pub mod video_repo;
pub mod youtube_client;

pub use catalog_repo::{StoreCourseRepository, StorePackageRepository};
pub use database::DbClient;
pub use media::{MediaFolder, MediaStore};
pub use order_repo::StoreOrderRepository;
pub use redis_repo::RedisClient;
pub use settings_repo::StoreSettingsRepository;
pub use video_repo::StoreVideoRepository;
pub use youtube_client::YoutubeClient;
