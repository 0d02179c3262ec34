use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use httpmock::prelude::*;
use number_aggregator::{router, AppState, FanOutAggregator, HttpNumberSource, ServiceConfig};
use std::time::{Duration, Instant};
use tower::ServiceExt;

fn test_app(timeout_ms: u64) -> Router {
    let config = ServiceConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        source_timeout_ms: timeout_ms,
        max_sources: 32,
    };
    let aggregator = FanOutAggregator::new(HttpNumberSource::new());
    router(AppState::new(aggregator, &config))
}

fn sorted_numbers_uri(urls: &[String]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for url in urls {
        serializer.append_pair("url", url);
    }
    format!("/sorted-numbers?{}", serializer.finish())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_end_to_end_merge_dedupe_sort_with_one_source_timing_out() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/a");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([3, 1, 2]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/b");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([2, 5]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/slow");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([1000]))
            .delay(Duration::from_secs(2));
    });

    let app = test_app(250);
    let uri = sorted_numbers_uri(&[server.url("/a"), server.url("/b"), server.url("/slow")]);

    let started = Instant::now();
    let (status, json) = get_json(app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({"numbers": [1.0, 2.0, 3.0, 5.0]}));
    // The slow source is fixed out at the timeout, it does not stall the round.
    assert!(started.elapsed() < Duration::from_millis(1500));
}

#[tokio::test]
async fn test_all_sources_failing_is_an_empty_success() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/down");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET).path("/gone");
        then.status(404);
    });

    let app = test_app(500);
    let uri = sorted_numbers_uri(&[server.url("/down"), server.url("/gone")]);
    let (status, json) = get_json(app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({"numbers": []}));
}

#[tokio::test]
async fn test_mixed_payload_shapes_merge_together() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/plain");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([10, -3]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/wrapped");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"numbers": [7.5, 10]}));
    });

    let app = test_app(500);
    let uri = sorted_numbers_uri(&[server.url("/plain"), server.url("/wrapped")]);
    let (status, json) = get_json(app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({"numbers": [-3.0, 7.5, 10.0]}));
}

#[tokio::test]
async fn test_same_source_listed_twice_is_fetched_twice_and_deduped() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/n");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([6, 6, 9]));
    });

    let app = test_app(500);
    let uri = sorted_numbers_uri(&[server.url("/n"), server.url("/n")]);
    let (status, json) = get_json(app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({"numbers": [6.0, 9.0]}));
    // One fetch per source reference, even when references repeat.
    api_mock.assert_hits(2);
}

#[tokio::test]
async fn test_rejected_request_never_reaches_the_sources() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/n");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([1]));
    });

    let app = test_app(500);
    let (status, json) = get_json(app, "/sorted-numbers").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().is_some());
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_wall_clock_is_bounded_by_the_timeout_not_the_source_count() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/fast1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([1]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/fast2");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([2]));
    });
    for path in ["/hang1", "/hang2"] {
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([1000]))
                .delay(Duration::from_secs(5));
        });
    }

    let app = test_app(300);
    let uri = sorted_numbers_uri(&[
        server.url("/fast1"),
        server.url("/fast2"),
        server.url("/hang1"),
        server.url("/hang2"),
    ]);

    let started = Instant::now();
    let (status, json) = get_json(app, &uri).await;

    // Fan-out settles in ~one timeout, nowhere near 2 x 5s of hanging sources.
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({"numbers": [1.0, 2.0]}));
}
