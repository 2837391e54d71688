use qr_guard_policy::ShortLinkResolver;
use qr_guard_providers::{HttpShortLinkResolver, ResolveError, ResolverOptions};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn resolver() -> HttpShortLinkResolver {
    HttpShortLinkResolver::new(ResolverOptions {
        timeout: Some(Duration::from_secs(5)),
        ..ResolverOptions::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_follows_redirect_chain() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/abc"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", format!("{}/hop", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/hop"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("{}/landing", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/landing"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let resolved = resolver().resolve(&format!("{}/abc", server.uri())).await;
    assert_eq!(resolved, Some(format!("{}/landing", server.uri())));
}

#[tokio::test]
async fn test_no_redirect_returns_same_url() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/direct"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let url = format!("{}/direct", server.uri());
    assert_eq!(resolver().resolve(&url).await, Some(url));
}

#[tokio::test]
async fn test_error_status_still_reports_landing_url() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/gone", server.uri());
    assert_eq!(resolver().resolve(&url).await, Some(url));
}

#[tokio::test]
async fn test_connection_failure_yields_none() {
    // Nothing listens on port 1
    let resolved = resolver().resolve("http://127.0.0.1:1/abc").await;
    assert_eq!(resolved, None);
}

#[tokio::test]
async fn test_redirect_loop_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/loop"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/loop", server.uri())),
        )
        .mount(&server)
        .await;

    let resolver = HttpShortLinkResolver::new(ResolverOptions {
        timeout: Some(Duration::from_secs(5)),
        max_redirects: 3,
    })
    .unwrap();

    let url = format!("{}/loop", server.uri());
    let result = resolver.try_resolve(&url).await;
    assert!(matches!(result, Err(ResolveError::Redirect(_))));
    assert_eq!(resolver.resolve(&url).await, None);
}
