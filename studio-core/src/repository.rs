use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::catalog::{Course, CoursePatch, NewCourse, NewPackage, PackagePatch, PricingPackage};
use crate::order::{NewOrder, Order, OrderStatus};
use crate::settings::{Setting, SettingKey};
use crate::video::{NewVideo, Video, VideoPatch};

pub type RepoError = Box<dyn std::error::Error + Send + Sync>;
pub type RepoResult<T> = Result<T, RepoError>;

/// Repository trait for the key/value settings store
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get_setting(&self, key: SettingKey) -> RepoResult<Option<Setting>>;

    /// Insert or replace the value stored under `key`.
    async fn upsert_setting(&self, key: SettingKey, value: &Value) -> RepoResult<Setting>;
}

/// Repository trait for showcase videos
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// All videos, ordered by `display_order`.
    async fn list_videos(&self) -> RepoResult<Vec<Video>>;

    async fn create_video(&self, video: &NewVideo) -> RepoResult<Video>;

    /// Returns `None` when no video has this id.
    async fn update_video(&self, id: Uuid, patch: VideoPatch) -> RepoResult<Option<Video>>;

    /// Returns `false` when no video has this id.
    async fn delete_video(&self, id: Uuid) -> RepoResult<bool>;
}

/// Repository trait for pricing packages
#[async_trait]
pub trait PackageRepository: Send + Sync {
    async fn list_packages(&self) -> RepoResult<Vec<PricingPackage>>;

    async fn get_package(&self, id: Uuid) -> RepoResult<Option<PricingPackage>>;

    async fn create_package(&self, package: &NewPackage) -> RepoResult<PricingPackage>;

    async fn update_package(&self, id: Uuid, patch: PackagePatch) -> RepoResult<Option<PricingPackage>>;

    async fn delete_package(&self, id: Uuid) -> RepoResult<bool>;
}

/// Repository trait for courses
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn list_courses(&self) -> RepoResult<Vec<Course>>;

    async fn create_course(&self, course: &NewCourse) -> RepoResult<Course>;

    async fn update_course(&self, id: Uuid, patch: CoursePatch) -> RepoResult<Option<Course>>;

    async fn delete_course(&self, id: Uuid) -> RepoResult<bool>;
}

/// Repository trait for customer orders
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create_order(&self, order: &NewOrder) -> RepoResult<Order>;

    /// All orders, newest first.
    async fn list_orders(&self) -> RepoResult<Vec<Order>>;

    async fn update_order_status(&self, id: Uuid, status: OrderStatus) -> RepoResult<Option<Order>>;

    async fn delete_order(&self, id: Uuid) -> RepoResult<bool>;
}
