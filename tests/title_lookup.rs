//! Title lookup against a live HTTP service.

mod common;

use std::sync::Arc;
use std::time::Duration;

use pdflinks::http_client::HttpClient;
use pdflinks::models::{TitleResult, TitleStatus, LOCAL_FAILURE_STATUS};
use pdflinks::services::{
    resolve_title, HttpTitleLookup, LookupReply, TitleLookup, TitleResolver, TitleTable,
};

use common::{
    closed_endpoint, spawn_mock_lookup, GARBLED_TARGET, NOT_FOUND_TARGET, REMOTE_ERROR_TARGET,
};

fn http_lookup(endpoint: &str) -> HttpTitleLookup {
    let client = HttpClient::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    HttpTitleLookup::new(client, endpoint).unwrap()
}

#[tokio::test]
async fn success_body_is_taken_verbatim() {
    let mock = spawn_mock_lookup().await;
    let lookup = http_lookup(&mock.endpoint());

    let reply = lookup.lookup("https://a.example/?q=1&x=y").await.unwrap();
    assert_eq!(
        reply,
        LookupReply::Body(TitleResult {
            status: 200,
            title: Some("Title of https://a.example/?q=1&x=y".to_string()),
            error: None,
        })
    );
    assert_eq!(mock.requests(), vec!["https://a.example/?q=1&x=y"]);
}

#[tokio::test]
async fn error_status_inside_success_body_is_kept() {
    let mock = spawn_mock_lookup().await;
    let lookup = http_lookup(&mock.endpoint());

    let result = resolve_title(&lookup, REMOTE_ERROR_TARGET).await;
    assert_eq!(result.status, 502);
    assert_eq!(result.error.as_deref(), Some("upstream timed out"));
    assert_eq!(result.status(), TitleStatus::Failure);
}

#[tokio::test]
async fn non_success_status_is_recorded_bare() {
    let mock = spawn_mock_lookup().await;
    let lookup = http_lookup(&mock.endpoint());

    assert_eq!(
        lookup.lookup(NOT_FOUND_TARGET).await.unwrap(),
        LookupReply::Status(404)
    );
    assert_eq!(
        resolve_title(&lookup, NOT_FOUND_TARGET).await,
        TitleResult::from_status(404)
    );
}

#[tokio::test]
async fn undecodable_body_is_a_local_failure() {
    let mock = spawn_mock_lookup().await;
    let lookup = http_lookup(&mock.endpoint());

    let result = resolve_title(&lookup, GARBLED_TARGET).await;
    assert_eq!(result.status, LOCAL_FAILURE_STATUS);
    assert!(result.title.is_none());
    assert!(result.error.is_some());
}

#[tokio::test]
async fn redirects_are_followed() {
    let mock = spawn_mock_lookup().await;
    let lookup = http_lookup(&mock.redirecting_endpoint());

    let result = resolve_title(&lookup, "https://moved.example/").await;
    assert_eq!(result.status, 200);
    assert_eq!(
        result.title.as_deref(),
        Some("Title of https://moved.example/")
    );
}

#[tokio::test]
async fn unreachable_service_is_a_local_failure() {
    let lookup = http_lookup(&closed_endpoint().await);

    let result = resolve_title(&lookup, "https://a.example/").await;
    assert_eq!(result.status, LOCAL_FAILURE_STATUS);
    assert!(result.error.is_some());
}

#[tokio::test]
async fn resolver_issues_one_request_per_url() {
    let mock = spawn_mock_lookup().await;
    let lookup: Arc<dyn TitleLookup> = Arc::new(http_lookup(&mock.endpoint()));
    let resolver = TitleResolver::new(lookup);
    let table = Arc::new(TitleTable::new());

    let urls = vec![
        "https://a.example/".to_string(),
        NOT_FOUND_TARGET.to_string(),
        GARBLED_TARGET.to_string(),
    ];
    resolver.spawn(urls.clone(), table.clone(), None).wait().await;

    let mut requests = mock.requests();
    requests.sort();
    let mut expected = urls.clone();
    expected.sort();
    assert_eq!(requests, expected);

    assert_eq!(table.status("https://a.example/"), TitleStatus::Success);
    assert_eq!(table.status(NOT_FOUND_TARGET), TitleStatus::Failure);
    assert_eq!(table.status(GARBLED_TARGET), TitleStatus::Failure);
}
