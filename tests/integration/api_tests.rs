//! API integration tests against a running server
//!
//! Start the server with a bootstrap admin configured
//! (`FGT_AUTH__BOOTSTRAP_ADMIN_EMAIL=admin@example.org`,
//! `FGT_AUTH__BOOTSTRAP_ADMIN_PASSWORD=Change-Me-1`), then run
//! `cargo test -- --ignored`.

use chrono::{Local, Months};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:8080/api";

async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@example.org",
            "password": "Change-Me-1"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}

async fn post(client: &Client, token: &str, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn get(client: &Client, token: &str, path: &str) -> (StatusCode, Value) {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn delete(client: &Client, token: &str, path: &str) -> StatusCode {
    client
        .delete(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request")
        .status()
}

async fn create_station(client: &Client, token: &str) -> i64 {
    let (status, body) = post(client, token, "/stations", json!({"name": unique("Station")})).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

async fn create_equipment(client: &Client, token: &str, station_id: i64, category: &str) -> Value {
    let (status, body) = post(
        client,
        token,
        "/equipment",
        json!({
            "name": "Test item",
            "serialNumber": unique("SN"),
            "category": category,
            "stationId": station_id
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_database_health() {
    let client = Client::new();
    let response = client
        .get(format!("{}/health/database", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "ADMIN@example.org",
            "password": "Change-Me-1"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"]["passwordHash"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@example.org",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_get_current_user() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let (status, body) = get(&client, &token, "/auth/me").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "admin@example.org");
}

#[tokio::test]
#[ignore]
async fn test_equipment_created_with_history() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let station_id = create_station(&client, &token).await;

    let equipment = create_equipment(&client, &token, station_id, "scba").await;
    assert_eq!(equipment["status"], "in-service");

    let id = equipment["id"].as_i64().unwrap();
    let (status, history) = get(&client, &token, &format!("/equipment/{}/history", id)).await;
    assert_eq!(status, StatusCode::OK);
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["action"], "created");
    assert_eq!(history[0]["user"], "admin@example.org");

    delete(&client, &token, &format!("/stations/{}", station_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_duplicate_serial_number_conflicts() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let station_id = create_station(&client, &token).await;

    let equipment = create_equipment(&client, &token, station_id, "ladders").await;
    let (status, body) = post(
        &client,
        &token,
        "/equipment",
        json!({
            "name": "Duplicate",
            "serialNumber": equipment["serialNumber"],
            "category": "ladders",
            "stationId": station_id
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");

    delete(&client, &token, &format!("/stations/{}", station_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_status_change_requires_note_and_is_recorded() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let station_id = create_station(&client, &token).await;
    let equipment = create_equipment(&client, &token, station_id, "hose").await;
    let id = equipment["id"].as_i64().unwrap();

    let response = client
        .put(format!("{}/equipment/{}", BASE_URL, id))
        .bearer_auth(&token)
        .json(&json!({"status": "out-for-repair"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .put(format!("{}/equipment/{}", BASE_URL, id))
        .bearer_auth(&token)
        .json(&json!({"status": "out-for-repair", "statusNote": "Coupling damaged"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, history) = get(&client, &token, &format!("/equipment/{}/history", id)).await;
    let last = history.as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["action"], "status-changed");
    assert_eq!(last["previousStatus"], "in-service");
    assert_eq!(last["newStatus"], "out-for-repair");

    delete(&client, &token, &format!("/stations/{}", station_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_full_record_save_records_only_real_changes() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let station_id = create_station(&client, &token).await;
    let equipment = create_equipment(&client, &token, station_id, "scba").await;
    let id = equipment["id"].as_i64().unwrap();

    let email = format!("{}@example.org", unique("ff"));
    let (status, user) = post(
        &client,
        &token,
        "/users",
        json!({
            "email": email,
            "password": "Engine-7-Go",
            "firstName": "Sam",
            "lastName": "Rivera",
            "role": "user"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, login) = post(
        &client,
        "",
        "/auth/login",
        json!({"email": email, "password": "Engine-7-Go"}),
    )
    .await;
    let user_token = login["token"].as_str().unwrap().to_string();

    // The whole record sent back with only the status edited
    let mut record = equipment.clone();
    record["status"] = json!("out-of-service");
    record["statusNote"] = json!("Facepiece cracked");
    let response = client
        .put(format!("{}/equipment/{}", BASE_URL, id))
        .bearer_auth(&user_token)
        .json(&record)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, history) = get(&client, &token, &format!("/equipment/{}/history", id)).await;
    let actions: Vec<&str> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, vec!["created", "status-changed"]);

    let response = client
        .put(format!("{}/equipment/{}", BASE_URL, id))
        .bearer_auth(&user_token)
        .json(&json!({"name": "Renamed pack"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    delete(&client, &token, &format!("/users/{}", user["id"])).await;
    delete(&client, &token, &format!("/stations/{}", station_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_complete_recurring_inspection() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let station_id = create_station(&client, &token).await;
    let equipment = create_equipment(&client, &token, station_id, "hose").await;
    let equipment_id = equipment["id"].as_i64().unwrap();

    let (status, inspection) = post(
        &client,
        &token,
        "/inspections",
        json!({
            "equipmentId": equipment_id,
            "templateId": "hose-annual-service-test",
            "dueDate": "2024-01-15"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(inspection["name"], "Fire Hose Annual Service Test");

    let id = inspection["id"].as_i64().unwrap();
    let (status, completed) = post(
        &client,
        &token,
        &format!("/inspections/{}/complete", id),
        json!({"notes": "All lengths passed"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed["dueDate"], "2025-01-15");
    assert_eq!(completed["status"], "scheduled");
    assert!(completed["lastCompleted"].is_string());

    let (_, history) = get(&client, &token, &format!("/equipment/{}/history", equipment_id)).await;
    let actions: Vec<&str> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, vec!["created", "inspection-scheduled", "inspection-completed"]);

    delete(&client, &token, &format!("/stations/{}", station_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_one_off_inspection_completes_once() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let station_id = create_station(&client, &token).await;
    let equipment = create_equipment(&client, &token, station_id, "rescue-tools").await;

    let (_, inspection) = post(
        &client,
        &token,
        "/inspections",
        json!({
            "equipmentId": equipment["id"],
            "name": "Post-incident check",
            "dueDate": "2024-05-01"
        }),
    )
    .await;
    let id = inspection["id"].as_i64().unwrap();

    let (status, completed) =
        post(&client, &token, &format!("/inspections/{}/complete", id), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed["status"], "completed");
    assert_eq!(completed["dueDate"], "2024-05-01");

    let (status, _) = post(&client, &token, &format!("/inspections/{}/complete", id), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let response = client
        .put(format!("{}/inspections/{}", BASE_URL, id))
        .bearer_auth(&token)
        .json(&json!({"status": "completed"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "validation_failed");

    let response = client
        .post(format!("{}/inspections/{}/complete", BASE_URL, id))
        .bearer_auth(&token)
        .header("content-type", "application/json")
        .body(r#"{"notes": "#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    delete(&client, &token, &format!("/stations/{}", station_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_category_completion_fans_out_to_station() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let station_a = create_station(&client, &token).await;
    let station_b = create_station(&client, &token).await;

    let a1 = create_equipment(&client, &token, station_a, "extinguishers").await;
    let a2 = create_equipment(&client, &token, station_a, "extinguishers").await;
    let b1 = create_equipment(&client, &token, station_b, "extinguishers").await;
    let other = create_equipment(&client, &token, station_a, "ladders").await;

    let (status, rule) = post(
        &client,
        &token,
        "/category-inspections",
        json!({
            "category": "extinguishers",
            "scope": {"kind": "station", "stationId": station_a},
            "templateId": "extinguisher-monthly",
            "dueDate": "2024-03-31"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let rule_id = rule["id"].as_i64().unwrap();

    let (status, completion) = post(
        &client,
        &token,
        &format!("/category-inspections/{}/complete", rule_id),
        json!({"notes": "Gauges in the green"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completion["inspection"]["dueDate"], "2024-04-30");

    let mut affected: Vec<i64> = completion["affectedEquipmentIds"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    affected.sort();
    let mut expected = vec![a1["id"].as_i64().unwrap(), a2["id"].as_i64().unwrap()];
    expected.sort();
    assert_eq!(affected, expected);

    for (item, entries) in [(&a1, 2), (&a2, 2), (&b1, 1), (&other, 1)] {
        let (_, history) = get(&client, &token, &format!("/equipment/{}/history", item["id"])).await;
        assert_eq!(history.as_array().unwrap().len(), entries);
    }

    delete(&client, &token, &format!("/stations/{}", station_a)).await;
    delete(&client, &token, &format!("/stations/{}", station_b)).await;
}

#[tokio::test]
#[ignore]
async fn test_inspection_status_resolution() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let station_id = create_station(&client, &token).await;
    let equipment = create_equipment(&client, &token, station_id, "medical").await;
    let id = equipment["id"].as_i64().unwrap();

    let (_, body) = get(&client, &token, &format!("/equipment/{}/inspection-status", id)).await;
    assert!(body["status"].is_null());

    let today = Local::now().date_naive();
    post(
        &client,
        &token,
        "/inspections",
        json!({"equipmentId": id, "name": "AED check", "dueDate": today + chrono::Duration::days(5)}),
    )
    .await;
    post(
        &client,
        &token,
        "/inspections",
        json!({"equipmentId": id, "name": "Bag restock", "dueDate": today.checked_add_months(Months::new(2)).unwrap()}),
    )
    .await;

    let (status, body) = get(&client, &token, &format!("/equipment/{}/inspection-status", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"]["status"], "warning");
    assert_eq!(body["status"]["days"], 5);
    assert_eq!(body["status"]["inspection"]["name"], "AED check");

    let (_, dashboard) = get(&client, &token, &format!("/inspection-status?stationId={}", station_id)).await;
    assert_eq!(dashboard["summary"]["warning"], 1);
    assert_eq!(dashboard["items"].as_array().unwrap().len(), 1);

    delete(&client, &token, &format!("/stations/{}", station_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_delete_cascades() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let station_id = create_station(&client, &token).await;
    let equipment = create_equipment(&client, &token, station_id, "ppe").await;
    let equipment_id = equipment["id"].as_i64().unwrap();

    let (_, inspection) = post(
        &client,
        &token,
        "/inspections",
        json!({"equipmentId": equipment_id, "templateId": "ppe-advanced-inspection", "dueDate": "2025-01-01"}),
    )
    .await;
    let (_, rule) = post(
        &client,
        &token,
        "/category-inspections",
        json!({"category": "ppe", "name": "Department PPE check", "dueDate": "2025-01-01"}),
    )
    .await;

    assert_eq!(
        delete(&client, &token, &format!("/equipment/{}", equipment_id)).await,
        StatusCode::NO_CONTENT
    );
    let (status, _) = get(&client, &token, &format!("/inspections/{}", inspection["id"])).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(&client, &token, &format!("/category-inspections/{}", rule["id"])).await;
    assert_eq!(status, StatusCode::OK);

    let second = create_equipment(&client, &token, station_id, "ppe").await;
    assert_eq!(
        delete(&client, &token, &format!("/stations/{}", station_id)).await,
        StatusCode::NO_CONTENT
    );
    let (status, _) = get(&client, &token, &format!("/equipment/{}", second["id"])).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    delete(&client, &token, &format!("/category-inspections/{}", rule["id"])).await;
}

#[tokio::test]
#[ignore]
async fn test_vendor_crud() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let (status, vendor) = post(
        &client,
        &token,
        "/vendors",
        json!({"name": unique("Vendor"), "email": "service@example.org", "services": ["SCBA flow testing"]}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(vendor["services"][0], "SCBA flow testing");

    let id = vendor["id"].as_i64().unwrap();
    assert_eq!(delete(&client, &token, &format!("/vendors/{}", id)).await, StatusCode::NO_CONTENT);
    assert_eq!(delete(&client, &token, &format!("/vendors/{}", id)).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_create_user() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let email = format!("{}@example.org", unique("ff"));

    let (status, user) = post(
        &client,
        &token,
        "/users",
        json!({
            "email": email,
            "password": "Engine-7-Go",
            "firstName": "Sam",
            "lastName": "Rivera",
            "role": "user"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["role"], "user");

    let (status, _) = post(
        &client,
        &token,
        "/users",
        json!({
            "email": email.to_uppercase(),
            "password": "Engine-7-Go",
            "firstName": "Sam",
            "lastName": "Rivera"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    delete(&client, &token, &format!("/users/{}", user["id"])).await;
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/equipment", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}
