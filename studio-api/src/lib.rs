use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod courses;
pub mod error;
pub mod extract;
pub mod media;
pub mod middleware;
pub mod orders;
pub mod packages;
pub mod search;
pub mod settings;
pub mod site;
pub mod state;
pub mod videos;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    // Everything but login sits behind the admin token
    let admin = Router::new()
        .merge(auth::admin_routes())
        .merge(settings::admin_routes())
        .merge(videos::admin_routes())
        .merge(packages::admin_routes())
        .merge(courses::admin_routes())
        .merge(orders::admin_routes())
        .merge(media::admin_routes())
        .merge(search::admin_routes())
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::admin_auth_middleware,
        ))
        .merge(auth::routes());

    // Unknown paths belong to the single-page frontend
    let frontend = ServeDir::new(&state.static_dir)
        .fallback(ServeFile::new(state.static_dir.join("index.html")));

    Router::new()
        .merge(site::routes())
        .merge(videos::routes())
        .merge(packages::routes())
        .merge(courses::routes())
        .merge(orders::routes())
        .nest("/api/admin", admin)
        .nest_service("/media", ServeDir::new(state.media.root()))
        .fallback_service(frontend)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit_middleware,
        ))
        .with_state(state)
}
