use std::{sync::Arc, time::Duration};

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use bigdecimal::BigDecimal;
use booking_marketplace::{
    build_router,
    features::{
        rentals::models::Rental,
        search::{
            compiler::{ListingField, compile},
            executor::SearchExecutor,
            filter::{FilterField, NumericFilter},
            memory::InMemoryListingStore,
            session::{SearchSession, SearchStatus},
            view::{ResultView, render},
        },
    },
    services::database::Database,
    utilities::{app_state::AppState, config::Config},
};
use chrono::Utc;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

fn rental(location: &str, price: i64, capacity: i32, minutes_old: i64) -> Rental {
    Rental {
        id: Uuid::new_v4(),
        title: format!("Stay in {location}"),
        location: location.to_string(),
        price_per_night: BigDecimal::from(price),
        capacity,
        amenities: vec!["wifi".to_string(), "kitchen".to_string()],
        created_at: Utc::now() - chrono::Duration::minutes(minutes_old),
        ..Default::default()
    }
}

/// 15 lakeside rentals priced 100..=198 and 3 in Bergen outside that range.
fn catalogue() -> Vec<Rental> {
    let mut rentals: Vec<Rental> = (0..15)
        .map(|i| rental("Lake Tahoe", 100 + i * 7, 4, i))
        .collect();
    rentals.extend(
        [50, 250, 350]
            .into_iter()
            .enumerate()
            .map(|(i, price)| rental("Bergen", price, 2, 100 + i as i64)),
    );
    rentals
}

fn executor(rentals: Vec<Rental>) -> SearchExecutor {
    SearchExecutor::new(
        Arc::new(InMemoryListingStore::new(rentals)),
        Duration::from_secs(5),
    )
}

#[tokio::test]
async fn price_range_search_pages_fifteen_matches() {
    let session = SearchSession::new(executor(catalogue()));

    session.on_filter_field_change(FilterField::MinPrice, "100");
    session.on_filter_field_change(FilterField::MaxPrice, "200");
    session.on_search_triggered().await.unwrap();

    let state = session.snapshot();
    let result = state.last_result.clone().unwrap();
    assert_eq!(result.total_count, 15);
    assert_eq!(result.total_pages, 2);
    assert_eq!(result.items.len(), 10);

    let ResultView::Results { pagination, .. } = render(&state) else {
        panic!("expected results");
    };
    let next = pagination.next().unwrap();
    session.on_page_change_requested(next.target_page).await.unwrap();

    let second = session.snapshot().last_result.unwrap();
    assert_eq!(second.page_number, 2);
    assert_eq!(second.items.len(), 5);
}

#[tokio::test]
async fn location_without_matches_renders_the_empty_state() {
    let session = SearchSession::new(executor(catalogue()));

    session.on_filter_field_change(FilterField::Location, "Ushuaia");
    session.on_search_triggered().await.unwrap();

    let state = session.snapshot();
    assert_eq!(state.status, SearchStatus::Loaded);
    assert!(matches!(render(&state), ResultView::Empty { .. }));
}

#[tokio::test]
async fn non_numeric_capacity_adds_no_capacity_predicate() {
    let session = SearchSession::new(executor(catalogue()));

    session.on_filter_field_change(FilterField::MinCapacity, "abc");

    let state = session.snapshot();
    assert_eq!(state.criteria.min_capacity, NumericFilter::Unset);

    let query = compile(&state.criteria, &state.page).unwrap();
    assert!(
        query
            .predicates
            .iter()
            .all(|p| p.field != ListingField::Capacity)
    );

    session.on_search_triggered().await.unwrap();
    assert_eq!(session.snapshot().last_result.unwrap().total_count, 18);
}

fn app(rentals: Vec<Rental>) -> axum::Router {
    let config = Config::default();
    let state = AppState {
        database: Database::lazy(&config).unwrap(),
        search: executor(rentals),
        config,
    };
    build_router(state).unwrap()
}

async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn search_endpoint_returns_criteria_result_and_view() {
    let router = app(catalogue());

    let (status, body) = get_json(
        router,
        "/api/v1/rentals/search?location=lake&minPrice=100&maxPrice=200&page=2",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["criteria"]["locationSubstring"], json!("lake"));
    assert_eq!(body["result"]["totalCount"], json!(15));
    assert_eq!(body["result"]["totalPages"], json!(2));
    assert_eq!(body["result"]["pageNumber"], json!(2));
    assert_eq!(body["view"]["kind"], json!("results"));
    assert_eq!(body["view"]["pagination"]["nextEnabled"], json!(false));
    assert_eq!(body["view"]["cards"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn search_endpoint_rejects_invalid_pages() {
    let router = app(catalogue());

    let (status, body) = get_json(router, "/api/v1/rentals/search?page=0").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("page number"));
}

#[tokio::test]
async fn search_endpoint_rejects_pages_past_the_offset_range() {
    let router = app(catalogue());

    let (status, body) = get_json(
        router,
        &format!("/api/v1/rentals/search?page={}", i64::MAX),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("page number"));
}

#[tokio::test]
async fn admin_endpoints_validate_before_touching_the_database() {
    let router = app(Vec::new());

    let (status, _) = get_json(router.clone(), "/api/v1/rentals?limit=500").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let payload = json!({
        "title": "",
        "location": "Lake Tahoe",
        "price_per_night": "120",
        "capacity": 0,
    });
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/rentals")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
