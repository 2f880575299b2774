use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use studio_api::{app, state::{AppState, AuthConfig}};
use studio_store::{
    DbClient, MediaStore, RedisClient, StoreCourseRepository, StoreOrderRepository, StorePackageRepository,
    StoreSettingsRepository, StoreVideoRepository, YoutubeClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "studio_api=debug,studio_store=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = studio_store::app_config::Config::load().context("Failed to load config")?;
    tracing::info!("Starting studio API on port {}", config.server.port);

    // Database
    let db = DbClient::new(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to connect to Postgres")?;
    db.migrate().await.context("Failed to run migrations")?;

    // Redis is optional; without it requests are not rate limited
    let redis = match &config.redis.url {
        Some(url) => Some(Arc::new(RedisClient::new(url).context("Invalid Redis URL")?)),
        None => {
            tracing::warn!("No Redis configured, rate limiting disabled");
            None
        }
    };

    if config.youtube.api_key.is_none() {
        tracing::warn!("No YouTube API key configured, video search will fail");
    }
    let youtube = YoutubeClient::new(&config.youtube.base_url, config.youtube.api_key.clone());

    let app_state = AppState {
        settings_repo: Arc::new(StoreSettingsRepository::new(db.pool.clone())),
        video_repo: Arc::new(StoreVideoRepository::new(db.pool.clone())),
        package_repo: Arc::new(StorePackageRepository::new(db.pool.clone())),
        course_repo: Arc::new(StoreCourseRepository::new(db.pool.clone())),
        order_repo: Arc::new(StoreOrderRepository::new(db.pool.clone())),
        video_search: Arc::new(youtube),
        media: MediaStore::new(&config.server.media_dir, "/media"),
        redis,
        requests_per_minute: config.redis.requests_per_minute,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
            default_admin_password: config.auth.default_admin_password.clone(),
        },
        search_max_results: config.youtube.default_max_results,
        static_dir: PathBuf::from(&config.server.static_dir),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
