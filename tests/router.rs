//! The `GET /` route driven through the axum router.

use archive_headlines::api::routes::create_router;
use archive_headlines::config::{Config, SiteConfig};
use archive_headlines::months::MonthCursor;
use archive_headlines::AppState;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    Config {
        start: MonthCursor::today(),
        site: SiteConfig::with_base_url(&server.uri()).unwrap(),
        ..Config::default()
    }
}

async fn get_root(config: Config) -> (StatusCode, Option<String>, String) {
    let app = create_router(AppState::new(config).unwrap());
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn renders_current_month_headlines() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/archives/\d{4}/\d{1,2}$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
                <a class="_1lkmsmo1" href="/a">Alpha</a>
                <a class="_1lkmsmo1" href="/b">Beta &amp; Gamma</a>
            </body></html>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let (status, content_type, body) = get_root(config_for(&server)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(body.contains("The Verge Headlines"));
    assert!(body.contains(&format!("to {}", MonthCursor::today())));
    assert!(body.contains("<p>Total articles: 2</p>"));
    assert!(body.contains(&format!(r#"<a href="{}/a""#, server.uri())));
    assert!(body.contains(">Beta &amp; Gamma</a>"));
}

#[tokio::test]
async fn upstream_failure_is_a_bad_gateway() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/archives/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (status, _, body) = get_root(config_for(&server)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("503"));
}
