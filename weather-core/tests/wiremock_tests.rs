//! Weather client behaviour against a mock WeatherAPI server.

use std::time::Duration;

use waybar_weather_core::{
    ErrorKind, FetchError, RetryPolicy, WeatherApiClient, WeatherError, WeatherSource,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn current_json(is_day: u8, temp_c: f64, temp_f: f64, text: &str) -> serde_json::Value {
    serde_json::json!({
        "location": {"name": "Berlin", "country": "Germany"},
        "current": {
            "is_day": is_day,
            "temp_c": temp_c,
            "temp_f": temp_f,
            "condition": {"text": text, "code": 1003}
        }
    })
}

fn test_client(server: &MockServer, max_retries: u32) -> WeatherApiClient {
    let retry = RetryPolicy {
        max_retries,
        initial_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(10),
    };
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .expect("Failed to create client");

    WeatherApiClient::new(format!("{}/v1/current.json", server.uri()), "SECRET".into(), retry, http)
}

#[tokio::test]
async fn sends_key_and_query_and_decodes_current() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("key", "SECRET"))
        .and(query_param("q", "Berlin"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_json(1, 21.6, 70.9, "Partly cloudy")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let observation = test_client(&server, 0).fetch("Berlin").await.expect("fetch must succeed");

    assert!(observation.is_day);
    assert_eq!(observation.temp_c, 21.6);
    assert_eq!(observation.temp_f, 70.9);
    assert_eq!(observation.condition, "Partly cloudy");
}

#[tokio::test]
async fn retries_server_errors_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_json(0, 3.0, 37.4, "Mist")))
        .expect(1)
        .mount(&server)
        .await;

    let observation = test_client(&server, 3).fetch("Oslo").await.expect("fetch must succeed");

    assert!(!observation.is_day);
    assert_eq!(observation.condition, "Mist");
}

#[tokio::test]
async fn gives_up_after_max_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(3)
        .mount(&server)
        .await;

    let err = test_client(&server, 2).fetch("Oslo").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::WeatherFetchFailed);
    let WeatherError::WeatherFetchFailed { query, source, .. } = err else {
        panic!("expected fetch failure");
    };
    assert_eq!(query, "Oslo");
    assert!(matches!(source, FetchError::Status { ref body, .. } if body == "boom"));
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"code": 2006, "message": "API key is invalid."}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server, 3).fetch("Oslo").await.unwrap_err();

    assert!(err.to_string().contains("q=Oslo"));
}

#[tokio::test]
async fn malformed_body_fails_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server, 3).fetch("Oslo").await.unwrap_err();

    assert!(matches!(
        err,
        WeatherError::WeatherFetchFailed { source: FetchError::Decode(_), .. }
    ));
}

#[tokio::test]
async fn hung_server_is_cut_off_by_total_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_json(1, 21.6, 70.9, "Sunny"))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let client = test_client(&server, 3).with_total_timeout(Duration::from_millis(500));
    let started = std::time::Instant::now();

    let err = client.fetch("Oslo").await.unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(2), "took {:?}", started.elapsed());
    assert!(matches!(
        err,
        WeatherError::WeatherFetchFailed { source: FetchError::Timeout(d), .. }
            if d == Duration::from_millis(500)
    ));
}
