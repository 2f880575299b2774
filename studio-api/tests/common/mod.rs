#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::Value;
use studio_api::state::{AppState, AuthConfig};
use studio_api::app;
use studio_core::catalog::{Course, CoursePatch, NewCourse, NewPackage, PackagePatch, PricingPackage};
use studio_core::order::{NewOrder, Order, OrderStatus};
use studio_core::repository::{
    CourseRepository, OrderRepository, PackageRepository, RepoResult, SettingsRepository, VideoRepository,
};
use studio_core::search::{FoundVideo, SearchError, VideoSearch};
use studio_core::settings::{Setting, SettingKey};
use studio_core::video::{NewVideo, Video, VideoPatch};
use studio_store::{MediaStore, RedisClient};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret";
pub const ADMIN_PASSWORD: &str = "admin123";

// ============================================================================
// In-memory repositories
// ============================================================================

#[derive(Default)]
pub struct MemorySettings {
    rows: Mutex<HashMap<&'static str, Setting>>,
}

impl MemorySettings {
    pub fn put(&self, key: SettingKey, value: Value) {
        self.rows.lock().unwrap().insert(
            key.as_str(),
            Setting { key: key.as_str().to_string(), value, updated_at: Utc::now() },
        );
    }

    pub fn raw(&self, key: SettingKey) -> Option<Value> {
        self.rows.lock().unwrap().get(key.as_str()).map(|s| s.value.clone())
    }
}

#[async_trait]
impl SettingsRepository for MemorySettings {
    async fn get_setting(&self, key: SettingKey) -> RepoResult<Option<Setting>> {
        Ok(self.rows.lock().unwrap().get(key.as_str()).cloned())
    }

    async fn upsert_setting(&self, key: SettingKey, value: &Value) -> RepoResult<Setting> {
        self.put(key, value.clone());
        Ok(self.rows.lock().unwrap()[key.as_str()].clone())
    }
}

#[derive(Default)]
pub struct MemoryVideos {
    rows: Mutex<Vec<Video>>,
}

#[async_trait]
impl VideoRepository for MemoryVideos {
    async fn list_videos(&self) -> RepoResult<Vec<Video>> {
        let mut videos = self.rows.lock().unwrap().clone();
        videos.sort_by_key(|v| v.display_order);
        Ok(videos)
    }

    async fn create_video(&self, video: &NewVideo) -> RepoResult<Video> {
        let now = Utc::now();
        let video = Video {
            id: Uuid::new_v4(),
            title: video.title.clone(),
            video_url: video.video_url.clone(),
            video_type: video.video_type,
            category: video.category.clone(),
            display_order: video.display_order,
            is_active: video.is_active,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(video.clone());
        Ok(video)
    }

    async fn update_video(&self, id: Uuid, patch: VideoPatch) -> RepoResult<Option<Video>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|v| v.id == id).map(|v| {
            patch.apply(v);
            v.clone()
        }))
    }

    async fn delete_video(&self, id: Uuid) -> RepoResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|v| v.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryPackages {
    rows: Mutex<Vec<PricingPackage>>,
}

#[async_trait]
impl PackageRepository for MemoryPackages {
    async fn list_packages(&self) -> RepoResult<Vec<PricingPackage>> {
        let mut packages = self.rows.lock().unwrap().clone();
        packages.sort_by_key(|p| p.display_order);
        Ok(packages)
    }

    async fn get_package(&self, id: Uuid) -> RepoResult<Option<PricingPackage>> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn create_package(&self, package: &NewPackage) -> RepoResult<PricingPackage> {
        let now = Utc::now();
        let package = PricingPackage {
            id: Uuid::new_v4(),
            name: package.name.clone(),
            description: package.description.clone(),
            price: package.price,
            currency: package.currency.clone(),
            features: package.features.clone(),
            is_popular: package.is_popular,
            is_active: package.is_active,
            display_order: package.display_order,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(package.clone());
        Ok(package)
    }

    async fn update_package(&self, id: Uuid, patch: PackagePatch) -> RepoResult<Option<PricingPackage>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|p| p.id == id).map(|p| {
            patch.apply(p);
            p.clone()
        }))
    }

    async fn delete_package(&self, id: Uuid) -> RepoResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryCourses {
    rows: Mutex<Vec<Course>>,
}

#[async_trait]
impl CourseRepository for MemoryCourses {
    async fn list_courses(&self) -> RepoResult<Vec<Course>> {
        let mut courses = self.rows.lock().unwrap().clone();
        courses.sort_by_key(|c| c.display_order);
        Ok(courses)
    }

    async fn create_course(&self, course: &NewCourse) -> RepoResult<Course> {
        let now = Utc::now();
        let course = Course {
            id: Uuid::new_v4(),
            title: course.title.clone(),
            description: course.description.clone(),
            price: course.price,
            currency: course.currency.clone(),
            button_text: course.button_text.clone(),
            is_active: course.is_active,
            display_order: course.display_order,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(course.clone());
        Ok(course)
    }

    async fn update_course(&self, id: Uuid, patch: CoursePatch) -> RepoResult<Option<Course>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|c| c.id == id).map(|c| {
            patch.apply(c);
            c.clone()
        }))
    }

    async fn delete_course(&self, id: Uuid) -> RepoResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryOrders {
    rows: Mutex<Vec<Order>>,
}

impl MemoryOrders {
    pub fn list_all(&self) -> Vec<Order> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderRepository for MemoryOrders {
    async fn create_order(&self, order: &NewOrder) -> RepoResult<Order> {
        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4(),
            package_id: Some(order.package_id),
            package_name: order.package_name.clone(),
            price: order.price,
            discord_name: order.discord_name.clone(),
            email: order.email.clone(),
            status: OrderStatus::Pending,
            paypal_order_id: None,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn list_orders(&self) -> RepoResult<Vec<Order>> {
        Ok(self.rows.lock().unwrap().iter().rev().cloned().collect())
    }

    async fn update_order_status(&self, id: Uuid, status: OrderStatus) -> RepoResult<Option<Order>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|o| o.id == id).map(|o| {
            o.status = status;
            o.updated_at = Utc::now();
            o.clone()
        }))
    }

    async fn delete_order(&self, id: Uuid) -> RepoResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|o| o.id != id);
        Ok(rows.len() < before)
    }
}

/// Records queries and answers with canned results or a canned upstream error.
#[derive(Default)]
pub struct FakeSearch {
    pub calls: Mutex<Vec<(String, u32)>>,
    pub upstream_error: Mutex<Option<(u16, String)>>,
}

#[async_trait]
impl VideoSearch for FakeSearch {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<FoundVideo>, SearchError> {
        self.calls.lock().unwrap().push((query.to_string(), max_results));
        if let Some((status, message)) = self.upstream_error.lock().unwrap().clone() {
            return Err(SearchError::Upstream { status, message });
        }
        Ok((0..max_results.min(2))
            .map(|i| {
                FoundVideo::new(
                    format!("vid{:08}", i),
                    format!("{} #{}", query, i),
                    None,
                    "Channel".to_string(),
                )
            })
            .collect())
    }
}

// ============================================================================
// Test app
// ============================================================================

pub struct TestApp {
    pub router: Router,
    pub settings: Arc<MemorySettings>,
    pub videos: Arc<MemoryVideos>,
    pub packages: Arc<MemoryPackages>,
    pub courses: Arc<MemoryCourses>,
    pub orders: Arc<MemoryOrders>,
    pub search: Arc<FakeSearch>,
    pub media_dir: TempDir,
    pub static_dir: TempDir,
}

pub fn test_app() -> TestApp {
    build_app(None)
}

/// App whose rate limiter points at `redis_url`.
pub fn test_app_with_redis(redis_url: &str) -> TestApp {
    build_app(Some(Arc::new(RedisClient::new(redis_url).unwrap())))
}

fn build_app(redis: Option<Arc<RedisClient>>) -> TestApp {
    let settings = Arc::new(MemorySettings::default());
    let videos = Arc::new(MemoryVideos::default());
    let packages = Arc::new(MemoryPackages::default());
    let courses = Arc::new(MemoryCourses::default());
    let orders = Arc::new(MemoryOrders::default());
    let search = Arc::new(FakeSearch::default());
    let media_dir = TempDir::new().unwrap();
    let static_dir = TempDir::new().unwrap();
    std::fs::write(static_dir.path().join("index.html"), "<!doctype html><div id=\"root\"></div>").unwrap();

    let state = AppState {
        settings_repo: settings.clone(),
        video_repo: videos.clone(),
        package_repo: packages.clone(),
        course_repo: courses.clone(),
        order_repo: orders.clone(),
        video_search: search.clone(),
        media: MediaStore::new(media_dir.path(), "/media"),
        redis,
        requests_per_minute: 100,
        auth: AuthConfig {
            secret: JWT_SECRET.to_string(),
            expiration: 3600,
            default_admin_password: ADMIN_PASSWORD.to_string(),
        },
        search_max_results: 5,
        static_dir: static_dir.path().to_path_buf(),
    };

    TestApp {
        router: app(state),
        settings,
        videos,
        packages,
        courses,
        orders,
        search,
        media_dir,
        static_dir,
    }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(request(Method::GET, uri, None, None)).await
    }

    pub async fn admin(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let token = self.login(ADMIN_PASSWORD).await;
        self.send(request(method, uri, Some(token.as_str()), body)).await
    }

    /// Log in through the API and return the bearer token.
    pub async fn login(&self, password: &str) -> String {
        let (status, body) = self
            .send(request(
                Method::POST,
                "/api/admin/login",
                None,
                Some(serde_json::json!({ "password": password })),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    pub fn media_file_exists(&self, public_url: &str) -> bool {
        let relative = public_url.trim_start_matches("/media/");
        Path::new(self.media_dir.path()).join(relative).is_file()
    }
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
