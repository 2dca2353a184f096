use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use chirpy::config::Secrets;
use chirpy::server::{AppState, create_router};
use chirpy::store::{FileChirpStore, FileUserStore};

pub const POLKA_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

/// A router wired to fresh stores in a temp directory, driven in-process.
pub struct TestApp {
    pub temp_dir: TempDir,
    pub state: Arc<AppState>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let public = temp_dir.path().join("public");
        std::fs::create_dir_all(&public).expect("create file root");
        std::fs::write(public.join("index.html"), "<h1>Welcome to Chirpy</h1>")
            .expect("write index");

        let users = FileUserStore::open(temp_dir.path().join("users.json")).expect("open users");
        let chirps =
            FileChirpStore::open(temp_dir.path().join("chirps.json")).expect("open chirps");
        let secrets = Secrets::from_values(
            Some("integration-test-secret".to_string()),
            Some(POLKA_KEY.to_string()),
        )
        .expect("secrets");

        let state = Arc::new(AppState::new(
            Arc::new(users),
            Arc::new(chirps),
            &secrets,
            public,
        ));
        let router = create_router(state.clone());

        Self {
            temp_dir,
            state,
            router,
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        auth: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn register(&self, email: &str, password: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/users",
                None,
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register {email}: {body}");
        body
    }

    /// Logs in and returns `(access_token, refresh_token)`.
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/login",
                None,
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login {email}: {body}");
        (
            body["token"].as_str().expect("access token").to_string(),
            body["refresh_token"]
                .as_str()
                .expect("refresh token")
                .to_string(),
        )
    }

    pub async fn post_chirp(&self, access: &str, text: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/chirps",
                Some(&bearer(access)),
                Some(serde_json::json!({ "body": text })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "post chirp: {body}");
        body
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
