use daily_notifier::config::{CountdownConfig, SourcesConfig};
use daily_notifier::domain::ports::{HistorySource, HolidaySource, NewsSource};
use daily_notifier::{DailyApiClient, HolidayApiClient, NotifierError};
use httpmock::prelude::*;
use std::time::Duration;

fn daily_client(server: &MockServer, timeout: Duration) -> DailyApiClient {
    DailyApiClient::new(
        server.url("/v2/60s"),
        server.url("/v2/today-in-history"),
        timeout,
    )
    .unwrap()
}

fn holiday_client(server: &MockServer) -> HolidayApiClient {
    let sources = SourcesConfig {
        holiday_url: format!("{}/v1/holidays/{{year}}", server.base_url()),
        timeout_seconds: 5,
        ..SourcesConfig::default()
    };
    HolidayApiClient::new(sources, CountdownConfig::default()).unwrap()
}

#[tokio::test]
async fn test_news_success() {
    let server = MockServer::start();
    let news_mock = server.mock(|when, then| {
        when.method(GET).path("/v2/60s");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "code": 200,
                "message": "ok",
                "data": {
                    "date": "2026-01-01",
                    "news": ["first", "second"],
                    "tip": "ignored"
                }
            }));
    });

    let client = daily_client(&server, Duration::from_secs(5));
    let news = client.fetch_news().await.unwrap();

    news_mock.assert();
    assert_eq!(news.date, "2026-01-01");
    assert_eq!(news.items, vec!["first".to_string(), "second".to_string()]);
}

#[tokio::test]
async fn test_news_application_failure_is_absent() {
    let server = MockServer::start();
    let news_mock = server.mock(|when, then| {
        when.method(GET).path("/v2/60s");
        then.status(200).json_body(serde_json::json!({
            "code": 500,
            "message": "upstream unavailable",
            "data": null
        }));
    });

    let client = daily_client(&server, Duration::from_secs(5));

    let err = client.try_fetch_news().await.unwrap_err();
    assert!(matches!(err, NotifierError::ProviderError { .. }));
    assert!(err.to_string().contains("application code 500"));
    assert!(client.fetch_news().await.is_none());
    news_mock.assert_hits(2);
}

#[tokio::test]
async fn test_history_non_200_is_absent() {
    let server = MockServer::start();
    let history_mock = server.mock(|when, then| {
        when.method(GET).path("/v2/today-in-history");
        then.status(502).body("bad gateway");
    });

    let client = daily_client(&server, Duration::from_secs(5));

    assert!(client.fetch_history().await.is_none());
    history_mock.assert();
}

#[tokio::test]
async fn test_history_success_with_numeric_years() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/today-in-history");
        then.status(200).json_body(serde_json::json!({
            "code": 200,
            "data": {
                "date": "01-01",
                "items": [
                    {"year": 1949, "title": "event a", "event_type": "event"},
                    {"year": "1979", "title": "event b"}
                ]
            }
        }));
    });

    let client = daily_client(&server, Duration::from_secs(5));
    let history = client.fetch_history().await.unwrap();

    assert_eq!(history.items.len(), 2);
    assert_eq!(history.items[0].year, "1949");
    assert_eq!(history.items[1].title, "event b");
}

#[tokio::test]
async fn test_malformed_body_is_absent() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/60s");
        then.status(200).body("<html>not json</html>");
    });

    let client = daily_client(&server, Duration::from_secs(5));
    assert!(client.fetch_news().await.is_none());
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/60s");
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(serde_json::json!({"code": 200, "data": {"news": []}}));
    });

    let client = daily_client(&server, Duration::from_secs(1));

    let err = client.try_fetch_news().await.unwrap_err();
    assert!(matches!(err, NotifierError::ApiError(ref e) if e.is_timeout()));
}

#[tokio::test]
async fn test_unreachable_provider_is_absent() {
    let client = DailyApiClient::new(
        "http://127.0.0.1:1/v2/60s".to_string(),
        "http://127.0.0.1:1/v2/today-in-history".to_string(),
        Duration::from_secs(1),
    )
    .unwrap();

    assert!(client.fetch_news().await.is_none());
    assert!(client.fetch_history().await.is_none());
}

#[tokio::test]
async fn test_holiday_success_uses_remote_data() {
    let server = MockServer::start();
    let holiday_mock = server.mock(|when, then| {
        when.method(GET).path("/v1/holidays/2026");
        then.status(200).json_body(serde_json::json!({
            "2026-01-01": {"date": "2026-01-01", "name": "元旦", "isOffDay": true},
            "2026-01-04": {"date": "2026-01-04", "name": "元旦", "isOffDay": false}
        }));
    });

    let client = holiday_client(&server);
    let data = client.fetch(2026).await;

    holiday_mock.assert();
    assert_eq!(data.len(), 2);
    assert!(!data["2026-01-04"].is_off_day);
}

#[tokio::test]
async fn test_holiday_failure_falls_back_only_for_known_year() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/holidays/2026");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(GET).path("/v1/holidays/2027");
        then.status(500);
    });

    let client = holiday_client(&server);

    let current = client.fetch(2026).await;
    assert_eq!(current.len(), 6);
    assert_eq!(current["2026-10-01"].name, "国庆节");

    let next = client.fetch(2027).await;
    assert!(next.is_empty());
}

#[tokio::test]
async fn test_holiday_fallback_is_per_year() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/holidays/2026");
        then.status(500);
    });
    let next_year_mock = server.mock(|when, then| {
        when.method(GET).path("/v1/holidays/2027");
        then.status(200).json_body(serde_json::json!({
            "2027-01-01": {"name": "元旦", "isOffDay": true}
        }));
    });

    let client = holiday_client(&server);

    assert_eq!(client.fetch(2026).await.len(), 6);
    let next = client.fetch(2027).await;
    next_year_mock.assert();
    assert_eq!(next.len(), 1);
    assert!(next.contains_key("2027-01-01"));
}

#[tokio::test]
async fn test_undecodable_holiday_body_falls_back() {
    let server = MockServer::start();
    let holiday_mock = server.mock(|when, then| {
        when.method(GET).path("/v1/holidays/2026");
        then.status(200).body("<html>maintenance</html>");
    });

    let client = holiday_client(&server);

    assert!(client.try_fetch(2026).await.is_err());
    let data = client.fetch(2026).await;
    holiday_mock.assert_hits(2);
    assert_eq!(data.len(), 6);
    assert_eq!(data["2026-01-01"].name, "元旦");
}

#[tokio::test]
async fn test_success_code_without_data_is_absent() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/60s");
        then.status(200)
            .json_body(serde_json::json!({"code": 200, "message": "ok"}));
    });

    let client = daily_client(&server, Duration::from_secs(5));

    let err = client.try_fetch_news().await.unwrap_err();
    assert!(matches!(err, NotifierError::ProviderError { .. }));
    assert!(client.fetch_news().await.is_none());
}
