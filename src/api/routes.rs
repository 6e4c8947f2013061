use axum::{
    http::{header::HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::{handlers, middleware};
use crate::audio::AudioFileStore;
use crate::config::Settings;

pub struct AppState {
    pub store: AudioFileStore,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            store: AudioFileStore::new(settings.audio_files_dir.clone()),
        }
    }
}

pub fn create_router(state: Arc<AppState>, settings: &Settings) -> Router {
    let origins: Vec<HeaderValue> = settings
        .cors_origins()
        .into_iter()
        .filter_map(|origin| match origin.parse() {
            // AllowOrigin::list panics on a wildcard
            Ok(_) if origin == "*" => {
                tracing::warn!("Ignoring wildcard CORS origin, credentials are allowed");
                None
            }
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    let api_routes = Router::new().route("/audio/:speed/:number", get(handlers::get_audio));

    let mut router = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .nest("/api", api_routes);

    let audio_root = state.store.root();
    if audio_root.is_dir() {
        router = router.nest_service("/static/audio", ServeDir::new(audio_root));
        tracing::info!("Mounted static audio files from: {}", audio_root.display());
    } else {
        tracing::warn!("Audio files directory not found: {}", audio_root.display());
    }

    router
        .layer(CatchPanicLayer::custom(middleware::panic_response))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
