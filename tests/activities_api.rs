use activities::server::create_server;
use activities_core::storage::{DatabaseStorage, InMemoryStorage, Storage};
use activities_core::{ActivityFilter, DatabaseManager};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

struct Response {
    status: StatusCode,
    location: Option<String>,
    body: Vec<u8>,
}

impl Response {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    Response {
        status,
        location,
        body,
    }
}

fn app_with_memory() -> (Router, Arc<InMemoryStorage>) {
    let storage = Arc::new(InMemoryStorage::new());
    let app = create_server(storage.clone() as Arc<dyn Storage>);
    (app, storage)
}

fn payload(title: &str, date: &str) -> Value {
    json!({
        "title": title,
        "description": "Activity 1 month in future",
        "category": "culture",
        "date": date,
        "city": "London",
        "venue": "Natural History Museum"
    })
}

async fn create(app: &Router, body: Value) -> Value {
    let response = send(app, "POST", "/api/activities", Some(body)).await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json()
}

fn titles(list: &Value) -> Vec<String> {
    let mut titles: Vec<String> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap().to_string())
        .collect();
    titles.sort();
    titles
}

#[tokio::test]
async fn test_create_then_get_returns_payload_with_id() {
    let (app, _) = app_with_memory();
    let body = payload("Future Activity 1", "2024-06-01T09:00:00");

    let response = send(&app, "POST", "/api/activities", Some(body.clone())).await;
    assert_eq!(response.status, StatusCode::CREATED);
    let created = response.json();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(response.location.as_deref(), Some(format!("/api/activities/{id}").as_str()));

    let fetched = send(&app, "GET", &format!("/api/activities/{id}"), None).await;
    assert_eq!(fetched.status, StatusCode::OK);

    let mut expected = body;
    expected["id"] = Value::String(id);
    assert_eq!(fetched.json(), expected);
}

#[tokio::test]
async fn test_create_accepts_datetime_local_input() {
    let (app, _) = app_with_memory();
    let created = create(&app, payload("Form post", "2024-06-01T09:00")).await;
    assert_eq!(created["date"], "2024-06-01T09:00:00");
}

#[tokio::test]
async fn test_update_is_full_overwrite() {
    let (app, _) = app_with_memory();
    let created = create(&app, payload("Original", "2024-06-01T09:00:00")).await;
    let id = created["id"].as_str().unwrap();

    // description and venue omitted on purpose
    let update = json!({
        "id": id,
        "title": "Renamed",
        "category": "music",
        "date": "2024-07-04T20:00:00",
        "city": "Paris"
    });
    let response = send(&app, "PUT", &format!("/api/activities/{id}"), Some(update)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_empty());

    let fetched = send(&app, "GET", &format!("/api/activities/{id}"), None).await.json();
    assert_eq!(fetched["title"], "Renamed");
    assert_eq!(fetched["category"], "music");
    assert_eq!(fetched["date"], "2024-07-04T20:00:00");
    assert_eq!(fetched["city"], "Paris");
    assert_eq!(fetched["description"], Value::Null, "omitted description is not kept");
    assert_eq!(fetched["venue"], "", "omitted venue is not kept");
}

#[tokio::test]
async fn test_update_without_body_id_is_rejected() {
    let (app, storage) = app_with_memory();
    let created = create(&app, payload("Original", "2024-06-01T09:00:00")).await;
    let id = created["id"].as_str().unwrap();

    let response = send(
        &app,
        "PUT",
        &format!("/api/activities/{id}"),
        Some(payload("No id in body", "2024-06-01T10:00:00")),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "ID mismatch");

    let stored = storage
        .get(Uuid::parse_str(id).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.title, "Original");
    assert_eq!(stored.date.to_string(), "2024-06-01 09:00:00");
}

#[tokio::test]
async fn test_update_with_mismatched_id_is_rejected() {
    let (app, storage) = app_with_memory();
    let created = create(&app, payload("Untouched", "2024-06-01T09:00:00")).await;
    let id = created["id"].as_str().unwrap();

    let mut body = payload("Hijack", "2024-06-01T09:00:00");
    body["id"] = Value::String(Uuid::new_v4().to_string());
    let response = send(&app, "PUT", &format!("/api/activities/{id}"), Some(body)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "ID mismatch");

    let stored = storage
        .get(Uuid::parse_str(id).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.title, "Untouched");
}

#[tokio::test]
async fn test_put_and_delete_missing_are_not_found() {
    let (app, storage) = app_with_memory();
    create(&app, payload("Bystander", "2024-06-01T09:00:00")).await;
    let missing = Uuid::new_v4();

    let mut ghost = payload("Ghost", "2024-06-01T09:00:00");
    ghost["id"] = Value::String(missing.to_string());
    let response = send(&app, "PUT", &format!("/api/activities/{missing}"), Some(ghost)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.is_empty());

    let response = send(&app, "DELETE", &format!("/api/activities/{missing}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.is_empty());

    assert_eq!(storage.len(), 1);
    let remaining = storage.list(&ActivityFilter::default()).await.unwrap();
    assert_eq!(remaining[0].title, "Bystander");
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let (app, _) = app_with_memory();
    let created = create(&app, payload("Short lived", "2024-06-01T09:00:00")).await;
    let uri = format!("/api/activities/{}", created["id"].as_str().unwrap());

    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = send(&app, "GET", &uri, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_list_by_date_ignores_time_of_day() {
    let (app, _) = app_with_memory();
    create(&app, payload("Morning", "2024-06-01T09:00:00")).await;
    create(&app, payload("Evening", "2024-06-01T18:00:00")).await;
    create(&app, payload("Midnight", "2024-06-01T00:00:00")).await;
    create(&app, payload("Next day", "2024-06-02T08:00:00")).await;
    create(&app, payload("Day before", "2024-05-31T23:59:59")).await;

    let response = send(&app, "GET", "/api/activities?date=2024-06-01", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(titles(&response.json()), vec!["Evening", "Midnight", "Morning"]);

    // the first frontend capitalised the parameter
    let response = send(&app, "GET", "/api/activities?Date=2024-06-01", None).await;
    assert_eq!(titles(&response.json()), vec!["Evening", "Midnight", "Morning"]);
}

#[tokio::test]
async fn test_list_without_filters_returns_everything() {
    let (app, _) = app_with_memory();
    create(&app, payload("A", "2024-06-01T09:00:00")).await;
    create(&app, payload("B", "2023-01-01T09:00:00")).await;

    let response = send(&app, "GET", "/api/activities", None).await;
    assert_eq!(titles(&response.json()), vec!["A", "B"]);

    // blank parameters impose no constraint
    let response = send(&app, "GET", "/api/activities?date=&category=&city=", None).await;
    assert_eq!(titles(&response.json()), vec!["A", "B"]);
}

#[tokio::test]
async fn test_list_by_category_and_city() {
    let (app, _) = app_with_memory();
    let mut drinks = payload("Drinks", "2024-06-01T19:00:00");
    drinks["category"] = json!("drinks");
    create(&app, drinks).await;
    let mut film = payload("Film", "2024-06-01T21:00:00");
    film["category"] = json!("film");
    film["city"] = json!("Paris");
    create(&app, film).await;

    let response = send(&app, "GET", "/api/activities?category=drinks", None).await;
    assert_eq!(titles(&response.json()), vec!["Drinks"]);

    let response = send(&app, "GET", "/api/activities?city=Paris&category=film", None).await;
    assert_eq!(titles(&response.json()), vec!["Film"]);

    let response = send(&app, "GET", "/api/activities?city=Paris&category=drinks", None).await;
    assert!(titles(&response.json()).is_empty());
}

#[tokio::test]
async fn test_malformed_inputs_are_client_errors() {
    let (app, storage) = app_with_memory();

    let response = send(&app, "GET", "/api/activities?date=not-a-date", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["error"].as_str().unwrap().contains("not-a-date"));

    let response = send(&app, "GET", "/api/activities/12345", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = send(&app, "DELETE", "/api/activities/not-a-uuid", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        "POST",
        "/api/activities",
        Some(json!({ "title": "Bad date", "date": "someday" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app_with_memory();
    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "healthy");
}

#[tokio::test]
async fn test_crud_against_database_storage() {
    let manager = Arc::new(DatabaseManager::in_memory().await.unwrap());
    manager.run_migrations().await.unwrap();
    let storage: Arc<dyn Storage> = Arc::new(DatabaseStorage::with_manager(manager));
    let app = create_server(storage);

    let created = create(&app, payload("Stored", "2024-06-01T09:00:00")).await;
    create(&app, payload("Other day", "2024-06-02T09:00:00")).await;
    let uri = format!("/api/activities/{}", created["id"].as_str().unwrap());

    let response = send(&app, "GET", "/api/activities?date=2024-06-01", None).await;
    assert_eq!(titles(&response.json()), vec!["Stored"]);

    let mut update = created.clone();
    update["title"] = json!("Stored and edited");
    let response = send(&app, "PUT", &uri, Some(update)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let fetched = send(&app, "GET", &uri, None).await.json();
    assert_eq!(fetched["title"], "Stored and edited");

    assert_eq!(send(&app, "DELETE", &uri, None).await.status, StatusCode::NO_CONTENT);
    assert_eq!(send(&app, "GET", &uri, None).await.status, StatusCode::NOT_FOUND);
}
