// Shared helpers for spinning up the relay against mock backends.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use render_proxy::initialization::{init_asset_client, init_render_client};
use render_proxy::proxy::AssetProxy;
use render_proxy::render::RenderClient;
use render_proxy::security::{DnsGuard, HostResolver};
use render_proxy::{build_router, AppState};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Resolver with a fixed answer that counts lookups.
pub struct FixedResolver {
    answer: Result<Vec<Ipv4Addr>, String>,
    pub calls: AtomicUsize,
}

impl FixedResolver {
    #[allow(dead_code)] // Used by other test files
    pub fn resolving(addrs: Vec<Ipv4Addr>) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(addrs),
            calls: AtomicUsize::new(0),
        })
    }

    #[allow(dead_code)] // Used by other test files
    pub fn refusing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    #[allow(dead_code)] // Used by other test files
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HostResolver for FixedResolver {
    fn lookup_ipv4<'a>(&'a self, _host: &'a str) -> BoxFuture<'a, Result<Vec<Ipv4Addr>, String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let answer = self.answer.clone();
        Box::pin(async move { answer })
    }
}

/// Mounts a render backend that answers `html` and expects `calls` renders.
#[allow(dead_code)] // Used by other test files
pub async fn render_backend(html: &str, calls: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/content"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html.to_string(), "text/html"))
        .expect(calls)
        .mount(&server)
        .await;
    server
}

/// Starts the relay on an ephemeral port and returns its address.
pub async fn spawn_relay(backend: &MockServer, guard: DnsGuard) -> SocketAddr {
    let render = RenderClient::new(
        init_render_client().expect("render client"),
        &backend.uri(),
        "test-token",
    )
    .expect("render client config");
    let assets = AssetProxy::new(init_asset_client().expect("asset client"), guard.clone());
    let app = build_router(AppState::new(guard, render, assets));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("relay server");
    });
    addr
}

/// Client that surfaces redirects instead of following them.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build test client")
}

/// `Cookie` header value carrying `url` as the last analyzed URL.
#[allow(dead_code)] // Used by other test files
pub fn session_cookie(url: &str) -> String {
    format!("lastQuery={}", urlencoding::encode(url))
}
