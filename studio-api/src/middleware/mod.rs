pub mod auth;
pub mod rate_limit;

pub use auth::{admin_auth_middleware, AdminClaims, ADMIN_ROLE};
pub use rate_limit::rate_limit_middleware;
