use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use super::admin::{admin_router, count_file_hit};
use super::{chirps, sessions, users, webhooks};
use crate::auth::TokenService;
use crate::config::Secrets;
use crate::store::{ChirpStore, UserStore};

pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub chirps: Arc<dyn ChirpStore>,
    pub tokens: TokenService,
    /// Shared key for the upgrade webhook; `None` refuses every call.
    pub polka_key: Option<String>,
    /// Directory served under `/app`.
    pub file_root: PathBuf,
    pub file_hits: AtomicU64,
}

impl AppState {
    #[must_use]
    pub fn new(
        users: Arc<dyn UserStore>,
        chirps: Arc<dyn ChirpStore>,
        secrets: &Secrets,
        file_root: PathBuf,
    ) -> Self {
        Self {
            users,
            chirps,
            tokens: TokenService::new(secrets.jwt_secret.as_bytes()),
            polka_key: secrets.polka_key.clone(),
            file_root,
            file_hits: AtomicU64::new(0),
        }
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(health))
        // Users and sessions
        .route("/users", post(users::create_user).put(users::update_user))
        .route("/login", post(sessions::login))
        .route("/refresh", post(sessions::refresh))
        .route("/revoke", post(sessions::revoke))
        // Chirps
        .route("/chirps", get(chirps::list_chirps).post(chirps::create_chirp))
        .route(
            "/chirps/{id}",
            get(chirps::get_chirp).delete(chirps::delete_chirp),
        )
        // Webhooks
        .route("/polka/webhooks", post(webhooks::polka_webhook))
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let files = ServiceBuilder::new()
        .layer(middleware::from_fn_with_state(state.clone(), count_file_hit))
        .service(ServeDir::new(&state.file_root));

    Router::new()
        .nest("/api", api_router())
        .merge(admin_router())
        .nest_service("/app", files)
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
