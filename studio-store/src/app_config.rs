use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub youtube: YoutubeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Prebuilt frontend bundle served for every non-API path.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Uploaded images; served under `/media`.
    #[serde(default = "default_media_dir")]
    pub media_dir: String,
}

fn default_static_dir() -> String { "dist".into() }
fn default_media_dir() -> String { "media".into() }

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 { 5 }

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    /// Rate limiting is off when unset.
    pub url: Option<String>,
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: i64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self { url: None, requests_per_minute: default_requests_per_minute() }
    }
}

fn default_requests_per_minute() -> i64 { 100 }

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
    /// Accepted until an admin sets a password of their own.
    #[serde(default = "default_admin_password")]
    pub default_admin_password: String,
}

fn default_admin_password() -> String { "admin123".into() }

#[derive(Debug, Deserialize, Clone)]
pub struct YoutubeConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_youtube_base_url")]
    pub base_url: String,
    #[serde(default = "default_youtube_max_results")]
    pub default_max_results: u32,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_youtube_base_url(),
            default_max_results: default_youtube_max_results(),
        }
    }
}

fn default_youtube_base_url() -> String { "https://www.googleapis.com/youtube/v3".into() }
fn default_youtube_max_results() -> u32 { studio_core::search::DEFAULT_MAX_RESULTS }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `STUDIO__DATABASE__URL=postgres://...`
            .add_source(config::Environment::with_prefix("STUDIO").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
