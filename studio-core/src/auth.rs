//! Admin password storage and verification.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{CoreError, CoreResult};

pub const MIN_PASSWORD_LEN: usize = 4;

/// The admin password as kept in the settings store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredPassword {
    Hashed { hash: String, salt: String },
    /// Legacy rows kept the password as-is.
    Plain(String),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HashedRecord {
    password_hash: String,
    salt: String,
}

#[derive(Debug, Deserialize)]
struct PlainRecord {
    password: String,
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl StoredPassword {
    /// Interpret the stored setting; `fallback` applies when nothing usable
    /// is stored.
    pub fn from_setting(stored: Option<Value>, fallback: &str) -> Self {
        match stored {
            Some(Value::String(plain)) if !plain.is_empty() => StoredPassword::Plain(plain),
            Some(value @ Value::Object(_)) => {
                if let Ok(record) = serde_json::from_value::<HashedRecord>(value.clone()) {
                    return StoredPassword::Hashed { hash: record.password_hash, salt: record.salt };
                }
                match serde_json::from_value::<PlainRecord>(value) {
                    Ok(record) if !record.password.is_empty() => StoredPassword::Plain(record.password),
                    _ => StoredPassword::Plain(fallback.to_string()),
                }
            }
            _ => StoredPassword::Plain(fallback.to_string()),
        }
    }

    pub fn hash_new(password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        let hash = digest(&salt, password);
        StoredPassword::Hashed { hash, salt }
    }

    pub fn verify(&self, candidate: &str) -> bool {
        match self {
            StoredPassword::Hashed { hash, salt } => digest(salt, candidate) == *hash,
            StoredPassword::Plain(plain) => plain == candidate,
        }
    }

    pub fn to_setting(&self) -> Value {
        match self {
            StoredPassword::Hashed { hash, salt } => serde_json::to_value(HashedRecord {
                password_hash: hash.clone(),
                salt: salt.clone(),
            })
            .unwrap_or(Value::Null),
            StoredPassword::Plain(plain) => serde_json::json!({ "password": plain }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl ChangePasswordRequest {
    /// Check the form and the current password, returning the record to store.
    pub fn apply(&self, stored: &StoredPassword) -> CoreResult<StoredPassword> {
        if self.current_password.is_empty() || self.new_password.is_empty() || self.confirm_password.is_empty() {
            return Err(CoreError::ValidationError("All password fields are required".to_string()));
        }
        if self.new_password != self.confirm_password {
            return Err(CoreError::ValidationError("Passwords do not match".to_string()));
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CoreError::ValidationError(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if !stored.verify(&self.current_password) {
            return Err(CoreError::Unauthorized("Current password is incorrect".to_string()));
        }
        Ok(StoredPassword::hash_new(&self.new_password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn change(current: &str, new: &str, confirm: &str) -> ChangePasswordRequest {
        ChangePasswordRequest {
            current_password: current.to_string(),
            new_password: new.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_fallback_when_missing() {
        let stored = StoredPassword::from_setting(None, "admin123");
        assert!(stored.verify("admin123"));
        assert!(!stored.verify("admin"));
    }

    #[test]
    fn test_legacy_formats() {
        let stored = StoredPassword::from_setting(Some(json!({ "password": "legacy" })), "admin123");
        assert!(stored.verify("legacy"));

        let stored = StoredPassword::from_setting(Some(json!("bare")), "admin123");
        assert!(stored.verify("bare"));

        let stored = StoredPassword::from_setting(Some(json!({ "other": 1 })), "admin123");
        assert!(stored.verify("admin123"));
    }

    #[test]
    fn test_hashed_round_trip() {
        let hashed = StoredPassword::hash_new("s3cret");
        let reread = StoredPassword::from_setting(Some(hashed.to_setting()), "admin123");
        assert_eq!(reread, hashed);
        assert!(reread.verify("s3cret"));
        assert!(!reread.verify("admin123"));
    }

    #[test]
    fn test_salts_differ() {
        assert_ne!(StoredPassword::hash_new("same"), StoredPassword::hash_new("same"));
    }

    #[test]
    fn test_change_password_rules() {
        let stored = StoredPassword::Plain("admin123".to_string());

        assert!(matches!(change("", "abcd", "abcd").apply(&stored), Err(CoreError::ValidationError(_))));
        assert!(matches!(change("admin123", "abcd", "abce").apply(&stored), Err(CoreError::ValidationError(_))));
        assert!(matches!(change("admin123", "abc", "abc").apply(&stored), Err(CoreError::ValidationError(_))));
        assert!(matches!(change("wrong", "abcd", "abcd").apply(&stored), Err(CoreError::Unauthorized(_))));

        let updated = change("admin123", "abcd", "abcd").apply(&stored).unwrap();
        assert!(updated.verify("abcd"));
    }
}
