use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderValue, header::CACHE_CONTROL},
    middleware::Next,
    response::{Html, Response},
    routing::{any, get},
};

use crate::server::AppState;

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/metrics", get(metrics))
        .route("/api/reset", any(reset))
}

async fn metrics(State(state): State<Arc<AppState>>) -> Html<String> {
    let hits = state.file_hits.load(Ordering::Relaxed);
    Html(format!(
        "<html>\n<body>\n    <h1>Welcome, Chirpy Admin</h1>\n    <p>Chirpy has been visited {hits} times!</p>\n</body>\n</html>\n"
    ))
}

async fn reset(State(state): State<Arc<AppState>>) -> &'static str {
    state.file_hits.store(0, Ordering::Relaxed);
    "Hits reset to zero."
}

/// Counts a file-server hit and disables caching of the response.
pub async fn count_file_hit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    state.file_hits.fetch_add(1, Ordering::Relaxed);

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
}
