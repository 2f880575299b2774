use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use studio_core::repository::{RepoResult, SettingsRepository};
use studio_core::settings::{Setting, SettingKey};

pub struct StoreSettingsRepository {
    pool: PgPool,
}

impl StoreSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SettingRow {
    setting_key: String,
    setting_value: Value,
    updated_at: DateTime<Utc>,
}

impl From<SettingRow> for Setting {
    fn from(row: SettingRow) -> Self {
        Setting {
            key: row.setting_key,
            value: row.setting_value,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl SettingsRepository for StoreSettingsRepository {
    async fn get_setting(&self, key: SettingKey) -> RepoResult<Option<Setting>> {
        let row = sqlx::query_as::<_, SettingRow>(
            "SELECT setting_key, setting_value, updated_at FROM site_settings WHERE setting_key = $1",
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Setting::from))
    }

    async fn upsert_setting(&self, key: SettingKey, value: &Value) -> RepoResult<Setting> {
        let row = sqlx::query_as::<_, SettingRow>(
            r#"
            INSERT INTO site_settings (setting_key, setting_value)
            VALUES ($1, $2)
            ON CONFLICT (setting_key)
            DO UPDATE SET setting_value = EXCLUDED.setting_value, updated_at = NOW()
            RETURNING setting_key, setting_value, updated_at
            "#,
        )
        .bind(key.as_str())
        .bind(value)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Setting '{}' saved", key.as_str());
        Ok(row.into())
    }
}
