//! Integration tests for the site server
//!
//! These tests run the full router on a local socket and drive it over HTTP,
//! with bundles coming from every supported source: embedded, a directory on
//! disk and a remote bundle server.

use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

// Re-export modules from the crate
use metalworks_site::{
    config::Config,
    i18n::{BundleStore, EmbeddedSource, Locale},
    routing::{NavigationOutcome, Navigator, Resolver},
    server::{router, AppState, Shell},
};

const EN_BUNDLE: &str = include_str!("../messages/en.json");
const AR_BUNDLE: &str = include_str!("../messages/ar.json");

// ==================== Test Helpers ====================

/// Build a config as if read from the given environment
fn config_from(pairs: &[(&str, &str)]) -> Config {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| env.get(key).cloned()).expect("config should load")
}

/// Serve the site on an ephemeral port and return its base URL
async fn spawn_server(store: BundleStore) -> String {
    let state = AppState::new(
        Resolver::new(Arc::new(store)),
        Shell::new("Egyptian Metal Works").expect("templates should compile"),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has an address");

    tokio::spawn(async move {
        axum::serve(listener, router(state))
            .await
            .expect("test server failed");
    });

    format!("http://{}", addr)
}

/// Client that reports redirects instead of following them
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build client")
}

async fn get(base: &str, uri: &str) -> reqwest::Response {
    client()
        .get(format!("{}{}", base, uri))
        .send()
        .await
        .expect("request should complete")
}

/// Write a messages directory with the given bundles
fn messages_dir(bundles: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (code, raw) in bundles {
        std::fs::write(dir.path().join(format!("{}.json", code)), raw)
            .expect("Failed to write bundle");
    }
    dir
}

// ==================== Page Resolution Tests ====================

#[tokio::test]
async fn test_english_services_page() {
    let base = spawn_server(BundleStore::new(Arc::new(EmbeddedSource))).await;

    let response = get(&base, "/en/services").await;
    assert_eq!(response.status(), 200);

    // Auto-escaping may encode `/` inside attribute values
    let html = response.text().await.unwrap().replace("&#x2f;", "/");
    assert!(html.contains(r#"<html lang="en" dir="ltr">"#));
    assert!(html.contains(">Services</a>"));
    assert!(html.contains(r#"href="/ar/services""#));
}

#[tokio::test]
async fn test_arabic_home_page_is_rtl() {
    let base = spawn_server(BundleStore::new(Arc::new(EmbeddedSource))).await;

    let response = get(&base, "/ar").await;
    assert_eq!(response.status(), 200);

    let html = response.text().await.unwrap();
    assert!(html.contains(r#"<html lang="ar" dir="rtl">"#));
    assert!(html.contains("font-arabic"));
    assert!(html.contains("<title>المصرية للأعمال المعدنية</title>"));
}

#[tokio::test]
async fn test_unsupported_locales_are_not_found() {
    let base = spawn_server(BundleStore::new(Arc::new(EmbeddedSource))).await;

    for uri in ["/xx", "/", "/En", "/en-US/about", "/ar%20"] {
        let response = get(&base, uri).await;
        assert_eq!(response.status(), 404, "{}", uri);
        let html = response.text().await.unwrap();
        assert!(html.contains("Page not found"), "{}", uri);
    }
}

// ==================== Switch Tests ====================

#[tokio::test]
async fn test_switch_redirects_to_same_route() {
    let base = spawn_server(BundleStore::new(Arc::new(EmbeddedSource))).await;

    let response = get(&base, "/_switch?from=/en/contact&to=ar").await;
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()["location"], "/ar/contact");

    // Following the redirect lands on the Arabic page
    let followed = get(&base, "/ar/contact").await;
    assert_eq!(followed.status(), 200);
}

#[tokio::test]
async fn test_switch_keeps_query_and_anchor() {
    let base = spawn_server(BundleStore::new(Arc::new(EmbeddedSource))).await;

    let response = get(&base, "/_switch?from=%2Far%2Fprojects%3Fpage%3D2%23list&to=en").await;
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()["location"], "/en/projects?page=2#list");
}

#[tokio::test]
async fn test_switch_with_unsupported_target_is_not_found() {
    let base = spawn_server(BundleStore::new(Arc::new(EmbeddedSource))).await;
    assert_eq!(get(&base, "/_switch?from=/en&to=de").await.status(), 404);
}

// ==================== Bundle Source Tests ====================

#[tokio::test]
async fn test_directory_bundles() {
    let dir = messages_dir(&[("en", EN_BUNDLE), ("ar", AR_BUNDLE)]);
    let config = config_from(&[("MESSAGES_DIR", dir.path().to_str().unwrap())]);
    let base = spawn_server(config.build_store()).await;

    assert_eq!(get(&base, "/en").await.status(), 200);
    assert_eq!(get(&base, "/ar/about").await.status(), 200);
}

#[tokio::test]
async fn test_malformed_directory_bundle_is_not_found() {
    let dir = messages_dir(&[("en", EN_BUNDLE), ("ar", "{ not json")]);
    let config = config_from(&[("MESSAGES_DIR", dir.path().to_str().unwrap())]);
    let base = spawn_server(config.build_store()).await;

    assert_eq!(get(&base, "/en").await.status(), 200);
    assert_eq!(get(&base, "/ar").await.status(), 404);
}

#[tokio::test]
async fn test_missing_directory_bundle_is_not_found() {
    let dir = messages_dir(&[("en", EN_BUNDLE)]);
    let config = config_from(&[("MESSAGES_DIR", dir.path().to_str().unwrap())]);
    let base = spawn_server(config.build_store()).await;

    assert_eq!(get(&base, "/ar/services").await.status(), 404);
}

#[tokio::test]
async fn test_remote_bundles_are_fetched_once() {
    let bundle_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/messages/en.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EN_BUNDLE))
        .expect(1)
        .mount(&bundle_server)
        .await;

    let url = format!("{}/messages", bundle_server.uri());
    let config = config_from(&[("MESSAGES_URL", url.as_str())]);
    let base = spawn_server(config.build_store()).await;

    for _ in 0..3 {
        assert_eq!(get(&base, "/en/contact").await.status(), 200);
    }

    let metrics: serde_json::Value = get(&base, "/_metrics").await.json().await.unwrap();
    assert_eq!(metrics["cache_misses"], 1);
    assert_eq!(metrics["cache_hits"], 2);
}

#[tokio::test]
async fn test_remote_missing_bundle_is_not_found() {
    let bundle_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ar.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&bundle_server)
        .await;

    let url = bundle_server.uri();
    let config = config_from(&[("MESSAGES_URL", url.as_str())]);
    let base = spawn_server(config.build_store()).await;

    assert_eq!(get(&base, "/ar").await.status(), 404);
}

#[tokio::test]
async fn test_uncached_store_refetches() {
    let dir = messages_dir(&[("en", EN_BUNDLE)]);
    let config = config_from(&[
        ("MESSAGES_DIR", dir.path().to_str().unwrap()),
        ("BUNDLE_CACHE", "false"),
    ]);
    let base = spawn_server(config.build_store()).await;
    assert_eq!(get(&base, "/en").await.status(), 200);

    // Removing the bundle takes effect on the next request
    std::fs::remove_file(dir.path().join("en.json")).unwrap();
    assert_eq!(get(&base, "/en").await.status(), 404);
}

// ==================== Operational Tests ====================

#[tokio::test]
async fn test_health() {
    let base = spawn_server(BundleStore::new(Arc::new(EmbeddedSource))).await;

    let response = get(&base, "/health").await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

// ==================== Navigation Tests ====================

#[tokio::test]
async fn test_navigator_switch_over_directory_bundles() {
    let dir = messages_dir(&[("en", EN_BUNDLE), ("ar", AR_BUNDLE)]);
    let config = config_from(&[("MESSAGES_DIR", dir.path().to_str().unwrap())]);
    let navigator = Navigator::new(Resolver::new(Arc::new(config.build_store())));

    let first = navigator.navigate("/en/about").await;
    assert!(matches!(first, NavigationOutcome::Resolved(_)));

    let switched = navigator
        .switch_locale("/en/about#team", Locale::Arabic)
        .await
        .unwrap();
    let ctx = switched.context().expect("switch should resolve");
    assert_eq!(ctx.path(), "/ar/about#team");
    assert_eq!(ctx.t("nav.about").unwrap(), "من نحن");
    assert_eq!(navigator.active().unwrap().locale(), Locale::Arabic);
}
