#![cfg(feature = "async")]

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use miqat::network::aladhan::{AladhanClient, fetch_month_by_zip};
use miqat::network::geo::{Coordinates, ZipResolver};
use miqat::types::{CalendarSystem, MonthQuery, School, Settings};
use miqat::MiqatError;

fn provider_day_json(day: u32) -> serde_json::Value {
    json!({
        "date": {
            "gregorian": {
                "date": format!("{:02}-09-2026", day),
                "month": { "number": 9, "en": "September" },
                "year": "2026"
            },
            "hijri": {
                "date": format!("{:02}-03-1448", day),
                "month": { "number": 3, "en": "Rabīʿ al-awwal" },
                "year": "1448"
            }
        },
        "timings": {
            "Fajr": "05:12 (EDT)",
            "Sunrise": "06:31 (EDT)",
            "Dhuhr": "12:57 (EDT)",
            "Asr": "16:29 (EDT)",
            "Maghrib": "19:21 (EDT)",
            "Isha": "20:41 (EDT)",
            "Midnight": "01:09 (EDT)"
        }
    })
}

fn query() -> MonthQuery {
    MonthQuery::from_settings(
        &Settings {
            month: 9,
            ..Settings::default()
        },
        2026,
    )
}

#[tokio::test]
async fn test_fetch_month_gregorian_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/calendar/2026/9"))
        .and(query_param("method", "2"))
        .and(query_param("school", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": [provider_day_json(1), provider_day_json(2)]
        })))
        .mount(&server)
        .await;

    let client = AladhanClient::with_base(server.uri()).unwrap();
    let coords = Coordinates { lat: 40.75, lon: -73.99 };
    let days = client.fetch_month(coords, &query()).await.unwrap();

    assert_eq!(days.len(), 2);
    assert_eq!(days[0].timings.fajr, "05:12 (EDT)");
    assert_eq!(days[1].date.gregorian.date, "02-09-2026");
}

#[tokio::test]
async fn test_fetch_month_hijri_endpoint_and_school() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/hijriCalendar/1447/3"))
        .and(query_param("school", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": [provider_day_json(1)]
        })))
        .mount(&server)
        .await;

    let settings = Settings {
        calendar: CalendarSystem::Hijri,
        school: School::Hanafi,
        month: 3,
        ..Settings::default()
    };
    let client = AladhanClient::with_base(server.uri()).unwrap();
    let coords = Coordinates { lat: 40.75, lon: -73.99 };
    let days = client
        .fetch_month(coords, &MonthQuery::from_settings(&settings, 2026))
        .await
        .unwrap();

    assert_eq!(days.len(), 1);
}

#[tokio::test]
async fn test_provider_failure_is_single_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = AladhanClient::with_base(server.uri()).unwrap();
    let coords = Coordinates { lat: 40.75, lon: -73.99 };
    let err = client.fetch_month(coords, &query()).await.unwrap_err();
    assert!(matches!(err, MiqatError::Provider { .. }));
}

#[tokio::test]
async fn test_zip_resolution() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/10001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "places": [{ "latitude": "40.7484", "longitude": "-73.9967" }]
        })))
        .mount(&server)
        .await;

    let resolver = ZipResolver::with_base(server.uri()).unwrap();
    let coords = resolver.resolve("10001").await.unwrap();
    assert!((coords.lat - 40.7484).abs() < 1e-9);
    assert!((coords.lon + 73.9967).abs() < 1e-9);
}

#[tokio::test]
async fn test_unknown_zip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let resolver = ZipResolver::with_base(server.uri()).unwrap();
    let err = resolver.resolve("00000").await.unwrap_err();
    assert!(matches!(err, MiqatError::ZipNotFound { .. }));
}

#[tokio::test]
async fn test_fetch_month_by_zip_composes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/10001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "places": [{ "latitude": "40.7484", "longitude": "-73.9967" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/calendar/2026/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": [provider_day_json(1)]
        })))
        .mount(&server)
        .await;

    let resolver = ZipResolver::with_base(server.uri()).unwrap();
    let client = AladhanClient::with_base(server.uri()).unwrap();
    let days = fetch_month_by_zip(&resolver, &client, &query()).await.unwrap();
    assert_eq!(days.len(), 1);
}
