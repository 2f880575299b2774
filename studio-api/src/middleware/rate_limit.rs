use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;

use crate::state::AppState;

const WINDOW_SECONDS: i64 = 60;

/// Counter key for `ip` in the window containing `now_secs`. Each window gets
/// its own key, so a client that keeps hitting the limit is let back in once
/// the next window starts.
pub(crate) fn window_key(ip: IpAddr, now_secs: i64, window_seconds: i64) -> String {
    format!("ratelimit:{}:{}", ip, now_secs.div_euclid(window_seconds))
}

/// Fixed-window per-IP limit. Requests without a peer address (in-process
/// callers) and deployments without Redis pass straight through.
pub async fn rate_limit_middleware(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (Some(redis), Some(ConnectInfo(addr))) = (
        state.redis.as_ref(),
        req.extensions().get::<ConnectInfo<SocketAddr>>().copied(),
    ) else {
        return next.run(req).await;
    };

    let key = window_key(addr.ip(), Utc::now().timestamp(), WINDOW_SECONDS);

    match redis.check_rate_limit(&key, state.requests_per_minute, WINDOW_SECONDS).await {
        Ok(true) => next.run(req).await,
        Ok(false) => {
            tracing::warn!("Rate limit exceeded for {}", addr.ip());
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "error": "Rate limit exceeded" })),
            )
                .into_response()
        }
        Err(e) => {
            // Fail open
            tracing::warn!("Rate limiter unavailable: {}", e);
            next.run(req).await
        }
    }
}
