#![allow(dead_code)]

use serde_json::json;
use std::time::Duration;
use student_registry::app::{build_router, build_state, student_routes};
use student_registry::booking_client::BookingClient;
use student_registry::config::Config;
use student_registry::joke_client::JokeClient;
use student_registry::services::StudentService;
use student_registry::student_repository::StudentRepository;

pub const JOKE_PATH: &str = "/jokes/random";

/// Config with both outbound APIs pointed at one mock server, like a single WireMock port.
pub fn create_test_config(mock_uri: &str) -> Config {
    Config {
        port: 0,
        database_url: None,
        booking_base_url: mock_uri.to_string(),
        joke_url: format!("{}{}", mock_uri, JOKE_PATH),
        http_timeout_secs: 5,
        rate_limit_per_second: 10,
        rate_limit_burst: 20,
    }
}

pub fn joke_client(url: String) -> JokeClient {
    JokeClient::new(url, Duration::from_secs(5)).unwrap()
}

pub fn booking_client(base_url: String) -> BookingClient {
    BookingClient::new(base_url, Duration::from_secs(5)).unwrap()
}

pub fn student_service(mock_uri: &str, repository: StudentRepository) -> StudentService {
    StudentService::new(
        repository,
        joke_client(format!("{}{}", mock_uri, JOKE_PATH)),
        booking_client(mock_uri.to_string()),
    )
}

pub fn booking_body(booking_id: i32, firstname: &str) -> serde_json::Value {
    json!({
        "bookingid": booking_id,
        "booking": {
            "firstname": firstname,
            "lastname": "",
            "totalprice": 0,
            "depositpaid": false,
            "bookingdates": { "checkin": "2024-01-01", "checkout": "2024-12-31" },
            "additionalneeds": ""
        }
    })
}

/// Serves the full router on a random local port and returns its base URL.
pub async fn spawn_app(mock_uri: &str) -> String {
    let state = build_state(create_test_config(mock_uri)).await.unwrap();
    let app = build_router(state, student_routes());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}
