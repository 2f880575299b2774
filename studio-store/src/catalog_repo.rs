use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use studio_core::catalog::{
    features_from_json, Course, CoursePatch, NewCourse, NewPackage, PackagePatch, PricingPackage,
};
use studio_core::repository::{CourseRepository, PackageRepository, RepoResult};
use uuid::Uuid;

// ============================================================================
// Pricing packages
// ============================================================================

pub struct StorePackageRepository {
    pool: PgPool,
}

impl StorePackageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PACKAGE_COLUMNS: &str = "id, name, description, price, currency, features, is_popular, is_active, display_order, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct PackageRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    price: f64,
    currency: String,
    features: Value,
    is_popular: bool,
    is_active: bool,
    display_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PackageRow> for PricingPackage {
    fn from(row: PackageRow) -> Self {
        PricingPackage {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            currency: row.currency,
            features: features_from_json(&row.features),
            is_popular: row.is_popular,
            is_active: row.is_active,
            display_order: row.display_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl PackageRepository for StorePackageRepository {
    async fn list_packages(&self) -> RepoResult<Vec<PricingPackage>> {
        let rows = sqlx::query_as::<_, PackageRow>(&format!(
            "SELECT {} FROM pricing_packages ORDER BY display_order ASC, created_at ASC",
            PACKAGE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PricingPackage::from).collect())
    }

    async fn get_package(&self, id: Uuid) -> RepoResult<Option<PricingPackage>> {
        let row = sqlx::query_as::<_, PackageRow>(&format!(
            "SELECT {} FROM pricing_packages WHERE id = $1",
            PACKAGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PricingPackage::from))
    }

    async fn create_package(&self, package: &NewPackage) -> RepoResult<PricingPackage> {
        let row = sqlx::query_as::<_, PackageRow>(&format!(
            r#"
            INSERT INTO pricing_packages (name, description, price, currency, features, is_popular, is_active, display_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            PACKAGE_COLUMNS
        ))
        .bind(&package.name)
        .bind(&package.description)
        .bind(package.price)
        .bind(&package.currency)
        .bind(Json(&package.features))
        .bind(package.is_popular)
        .bind(package.is_active)
        .bind(package.display_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_package(&self, id: Uuid, patch: PackagePatch) -> RepoResult<Option<PricingPackage>> {
        let row = sqlx::query_as::<_, PackageRow>(&format!(
            r#"
            UPDATE pricing_packages SET
                name = COALESCE($1, name),
                description = NULLIF(COALESCE($2, description), ''),
                price = COALESCE($3, price),
                currency = COALESCE($4, currency),
                features = COALESCE($5, features),
                is_popular = COALESCE($6, is_popular),
                is_active = COALESCE($7, is_active),
                display_order = COALESCE($8, display_order),
                updated_at = NOW()
            WHERE id = $9
            RETURNING {}
            "#,
            PACKAGE_COLUMNS
        ))
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.price)
        .bind(patch.currency)
        .bind(patch.features.map(Json))
        .bind(patch.is_popular)
        .bind(patch.is_active)
        .bind(patch.display_order)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PricingPackage::from))
    }

    async fn delete_package(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM pricing_packages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Courses
// ============================================================================

pub struct StoreCourseRepository {
    pool: PgPool,
}

impl StoreCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COURSE_COLUMNS: &str = "id, title, description, price, currency, button_text, is_active, display_order, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct CourseRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    price: f64,
    currency: String,
    button_text: String,
    is_active: bool,
    display_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            currency: row.currency,
            button_text: row.button_text,
            is_active: row.is_active,
            display_order: row.display_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CourseRepository for StoreCourseRepository {
    async fn list_courses(&self) -> RepoResult<Vec<Course>> {
        let rows = sqlx::query_as::<_, CourseRow>(&format!(
            "SELECT {} FROM courses ORDER BY display_order ASC, created_at ASC",
            COURSE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn create_course(&self, course: &NewCourse) -> RepoResult<Course> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            r#"
            INSERT INTO courses (title, description, price, currency, button_text, is_active, display_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            COURSE_COLUMNS
        ))
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.price)
        .bind(&course.currency)
        .bind(&course.button_text)
        .bind(course.is_active)
        .bind(course.display_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update_course(&self, id: Uuid, patch: CoursePatch) -> RepoResult<Option<Course>> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            r#"
            UPDATE courses SET
                title = COALESCE($1, title),
                description = NULLIF(COALESCE($2, description), ''),
                price = COALESCE($3, price),
                currency = COALESCE($4, currency),
                button_text = COALESCE($5, button_text),
                is_active = COALESCE($6, is_active),
                display_order = COALESCE($7, display_order),
                updated_at = NOW()
            WHERE id = $8
            RETURNING {}
            "#,
            COURSE_COLUMNS
        ))
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.price)
        .bind(patch.currency)
        .bind(patch.button_text)
        .bind(patch.is_active)
        .bind(patch.display_order)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Course::from))
    }

    async fn delete_course(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
