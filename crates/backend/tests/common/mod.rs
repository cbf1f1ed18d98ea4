pub mod fixtures;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Extension, Router,
};
use hyper::ext::ReasonPhrase;
use http_body_util::BodyExt;
use source_viewer::{
    app,
    env::{config::FetchConfig, state::AppState},
    pipeline::{fetch::Fetcher, highlight::GrammarRegistry},
};
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceExt;

use fixtures::{HTML_PAGE, JSON_DOCUMENT, LATIN1_CONTENT_TYPE, PLAIN_SCRIPT, XML_FEED};

/// In-process upstream server bound to an ephemeral localhost port.
pub struct Upstream {
    base: String,
    handle: tokio::task::JoinHandle<()>,
}

impl Upstream {
    pub async fn start() -> Self {
        let router = Router::new()
            .route("/app.js", get(|| async { without_content_type(PLAIN_SCRIPT) }))
            .route(
                "/api/data",
                get(|| async { ([(header::CONTENT_TYPE, "application/json")], JSON_DOCUMENT) }),
            )
            .route("/sniffed", get(|| async { without_content_type(JSON_DOCUMENT) }))
            .route("/page", get(|| async { without_content_type(HTML_PAGE) }))
            .route(
                "/feed",
                get(|| async { ([(header::CONTENT_TYPE, "application/rss+xml")], XML_FEED) }),
            )
            .route("/answer.txt", get(|| async { without_content_type("42") }))
            .route(
                "/missing",
                get(|| async { (StatusCode::NOT_FOUND, "secret error page") }),
            )
            .route(
                "/broken",
                get(|| async { StatusCode::SERVICE_UNAVAILABLE.into_response() }),
            )
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "too late"
                }),
            )
            .route(
                "/teapot",
                get(|| async {
                    (
                        StatusCode::IM_A_TEAPOT,
                        Extension(ReasonPhrase::from_static(b"Short And Stout")),
                        "tea",
                    )
                }),
            )
            .route(
                "/custom-status",
                get(|| async {
                    let status = StatusCode::from_u16(599).expect("Invalid status code");
                    let reason = ReasonPhrase::from_static(b"Origin Overloaded");
                    (status, Extension(reason), "unknown status")
                }),
            )
            .route(
                "/latin1",
                get(|| async {
                    (
                        [(header::CONTENT_TYPE, LATIN1_CONTENT_TYPE)],
                        &b"caf\xe9"[..],
                    )
                }),
            )
            .route("/large", get(|| async { "x".repeat(64 * 1024) }))
            .route("/moved", get(|| async { Redirect::temporary("/app.js") }))
            .route(
                "/user-agent",
                get(|headers: axum::http::HeaderMap| async move {
                    headers
                        .get(header::USER_AGENT)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string()
                }),
            );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind upstream listener");
        let addr = listener.local_addr().expect("Failed to read upstream address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Upstream server failed");
        });

        Self {
            base: format!("http://{}", addr),
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

impl Drop for Upstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn without_content_type(body: &'static str) -> Response {
    Response::new(Body::from(body))
}

pub fn test_config() -> FetchConfig {
    FetchConfig {
        timeout: Duration::from_secs(1),
        ..FetchConfig::default()
    }
}

/// Builds the app with a proxy-free client so localhost upstreams are reached directly.
pub fn test_app(config: FetchConfig) -> Router {
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .no_proxy()
        .build()
        .expect("Failed to build test client");
    let fetcher = Fetcher::with_client(client, &config);
    let grammars = GrammarRegistry::new().expect("Failed to load grammars");

    app(AppState::with_parts(fetcher, grammars))
}

pub fn fetch_source_uri(target: &str) -> String {
    let url = reqwest::Url::parse_with_params(
        "http://localhost/api/fetch-source",
        &[("url", target)],
    )
    .expect("Failed to encode target URL");
    format!("{}?{}", url.path(), url.query().unwrap_or_default())
}

pub async fn send(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let json = serde_json::from_slice(&bytes).expect("Response body is not JSON");

    (status, json)
}
