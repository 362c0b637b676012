//! Shared fixtures for console integration tests

#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use fm_admin_client::{FileTokenStore, Session};
use fm_admin_core::Config;
use serde_json::Value;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Once;
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT_LOGGER: Once = Once::new();

/// Initialize test logging (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// Console wired to a mock remote API and a temporary token slot
pub struct TestConsole {
    pub api: MockServer,
    pub app: Router,
    pub token_file: PathBuf,
    _dir: TempDir,
}

impl TestConsole {
    /// Start with an optional pre-stored token
    pub async fn start(token: Option<&str>) -> Self {
        init_test_logging();

        let api = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        let token_file = dir.path().join("token");
        if let Some(token) = token {
            std::fs::write(&token_file, token).unwrap();
        }

        let mut config = Config::default();
        config.api.base_url = api.uri();
        config.session.token_file = token_file.clone();

        let session = Session::restore(FileTokenStore::new(&token_file));
        let app = fm_admin_web::build_app(config, session).unwrap();

        Self {
            api,
            app,
            token_file,
            _dir: dir,
        }
    }

    /// Send one request through the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Plain GET
    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    /// Form POST
    pub async fn post_form(&self, uri: &str, form: &str) -> Response<Body> {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Multipart POST with an explicit boundary
    pub async fn post_multipart(&self, uri: &str, boundary: &str, body: Vec<u8>) -> Response<Body> {
        let request = Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Serve the router on an ephemeral local port
    pub async fn listen(&self) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = self.app.clone();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    /// Stored token, if any
    pub fn stored_token(&self) -> Option<String> {
        std::fs::read_to_string(&self.token_file).ok()
    }

    /// Requests the mock API has seen for `method_name path`
    pub async fn api_calls(&self, method_name: &str, request_path: &str) -> usize {
        self.api
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.method.as_str() == method_name && r.url.path() == request_path)
            .count()
    }

    /// Answer `GET route` with `body`
    pub async fn serve_json(&self, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.api)
            .await;
    }
}

/// One part of a hand-built multipart form
pub struct Part<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

/// Encode `parts` as `multipart/form-data` with `boundary`
pub fn multipart_body(boundary: &str, parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        let disposition = match part.file_name {
            Some(file_name) => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.name, file_name
            ),
            None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name),
        };
        body.extend_from_slice(disposition.as_bytes());
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

/// Response body as text
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// `Location` header of a redirect
pub fn location(response: &Response<Body>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}
