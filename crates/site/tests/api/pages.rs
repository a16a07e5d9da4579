use crate::helpers::{mock_topology, spawn_app, MockAtlasFetcher};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use hyper::{header, Method};
use mockall::predicate::eq;
use serde_json::{from_slice, Value};
use site::{atlas, AtlasLevel};
use tower::ServiceExt;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn states_page_returns_atlas_and_funding_data() {
    let mut fetcher = MockAtlasFetcher::new();
    fetcher
        .expect_fetch_json()
        .with(eq("https://cdn.jsdelivr.net/npm/us-atlas@3/states-10m.json"))
        .times(1)
        .returning(|_| Ok(mock_topology()));
    let test_app = spawn_app(fetcher);

    let response = test_app
        .app
        .clone()
        .oneshot(get("/api/pages/states"))
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page: Value = from_slice(&body).unwrap();

    assert_eq!(page["usAtlas"], mock_topology());
    assert_eq!(page["fundingData"], *test_app.datasets.state_funding);
    assert_eq!(page["miCountyData"], *test_app.datasets.county_funding);
    assert_eq!(page.as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn counties_page_includes_breakdowns() {
    let mut fetcher = MockAtlasFetcher::new();
    fetcher
        .expect_fetch_json()
        .with(eq("https://cdn.jsdelivr.net/npm/us-atlas@3/counties-10m.json"))
        .times(1)
        .returning(|_| Ok(mock_topology()));
    let test_app = spawn_app(fetcher);

    let response = test_app
        .app
        .clone()
        .oneshot(get("/api/pages/counties"))
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page: Value = from_slice(&body).unwrap();
    let datasets = &test_app.datasets;

    assert_eq!(page["usAtlas"], mock_topology());
    assert_eq!(page["fundingData"], *datasets.state_funding);
    assert_eq!(page["miCountyData"], *datasets.county_funding);
    assert_eq!(page["expenditureData"], *datasets.county_expenditures);
    assert_eq!(page["treemapData"], *datasets.treemap);
    assert_eq!(page["sectorData"], *datasets.sector_monthly);
}

#[tokio::test]
async fn unknown_page_is_not_found_without_fetching() {
    let mut fetcher = MockAtlasFetcher::new();
    fetcher.expect_fetch_json().times(0);
    let test_app = spawn_app(fetcher);

    let response = test_app
        .app
        .clone()
        .oneshot(get("/api/pages/districts"))
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn fetch_failure_surfaces_as_bad_gateway() {
    let mut fetcher = MockAtlasFetcher::new();
    fetcher.expect_fetch_json().times(1).returning(|url| {
        Err(atlas::Error::Status {
            url: url.to_owned(),
            status: 503,
        })
    });
    let test_app = spawn_app(fetcher);

    let response = test_app
        .app
        .clone()
        .oneshot(get("/api/pages/states"))
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let message = String::from_utf8(body.to_vec()).unwrap();
    assert!(message.contains("external data unavailable"));
    assert!(message.contains("states-10m.json"));
    assert!(message.contains("503"));
}

#[tokio::test]
async fn page_listing_names_atlas_for_each_page() {
    let mut fetcher = MockAtlasFetcher::new();
    fetcher.expect_fetch_json().times(0);
    let test_app = spawn_app(fetcher);

    let response = test_app
        .app
        .clone()
        .oneshot(get("/api/pages"))
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let pages: Value = from_slice(&body).unwrap();
    let pages = pages.as_array().unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0]["name"], "states");
    assert_eq!(pages[0]["atlas"], "states");
    assert_eq!(pages[0]["atlas_url"], AtlasLevel::States.url());
    assert_eq!(pages[1]["name"], "counties");
    assert_eq!(pages[1]["atlas_url"], AtlasLevel::Counties.url());
    assert_eq!(pages[1]["fields"].as_array().unwrap().len(), 6);
}
