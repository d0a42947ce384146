mod error;
mod handlers;
mod middleware;

use axum::{
    extract::FromRef,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::db::Database;

pub use error::ErrorBody;

/// Everything a request handler can reach. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(db: Database, config: ServerConfig) -> Self {
        Self { db, config }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for ServerConfig {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

pub fn create_router(db: Database) -> Router {
    create_router_with_config(db, ServerConfig::default())
}

pub fn create_router_with_config(db: Database, config: ServerConfig) -> Router {
    let state = AppState::new(db, config);

    let public = Router::new()
        .route("/users", post(handlers::users::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/health", get(handlers::health));

    let protected = Router::new()
        // Notes
        .route(
            "/notes",
            get(handlers::notes::list_notes).post(handlers::notes::create_note),
        )
        .route(
            "/notes/{id}",
            get(handlers::notes::get_note)
                .put(handlers::notes::update_note)
                .delete(handlers::notes::delete_note),
        )
        // Folders
        .route(
            "/folders",
            get(handlers::folders::list_folders).post(handlers::folders::create_folder),
        )
        .route(
            "/folders/{id}",
            get(handlers::folders::get_folder)
                .put(handlers::folders::update_folder)
                .delete(handlers::folders::delete_folder),
        )
        // Tags
        .route(
            "/tags",
            get(handlers::tags::list_tags).post(handlers::tags::create_tag),
        )
        .route(
            "/tags/{id}",
            get(handlers::tags::get_tag)
                .put(handlers::tags::update_tag)
                .delete(handlers::tags::delete_tag),
        )
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_auth));

    let cors = cors_layer(&state.config);

    Router::new()
        .nest("/api", public.merge(protected))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let Some(origins) = &config.cors_origins else {
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
