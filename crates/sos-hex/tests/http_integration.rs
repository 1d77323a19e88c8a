use chrono::{Duration, Utc};
use serde_json::{json, Value};
use sos_hex::application::order_service::OrderService;
use sos_hex::inbound::http::{HttpServer, HttpServerConfig};
use sos_repo::memory::InMemoryStore;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

async fn spawn_server() -> (String, tokio::task::JoinHandle<()>) {
    let port = find_free_port();
    let config = HttpServerConfig {
        host: "127.0.0.1".into(),
        port: port.to_string(),
    };
    let service = OrderService::new(InMemoryStore::new());
    let server = HttpServer::new(service, config).await.unwrap();
    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    // Give the server a moment to start.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    (format!("http://127.0.0.1:{port}"), handle)
}

#[tokio::test]
async fn json_intake_flow_over_http() {
    let (addr, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{addr}/sos/orders"))
        .json(&json!({
            "name": "A",
            "address": "1 St",
            "city": "X",
            "state": "CA",
            "zipcode": "90001",
            "dueDate": "12/31/2099",
            "productType": "Guitar"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["id"], "1");
    assert_eq!(created["_id"], 1);
    assert_eq!(created["dueDate"], "12/31/2099");

    let fetched: Value = client
        .get(format!("{addr}/sos/orders/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["order"]["productType"], "Guitar");
    assert_eq!(fetched["order"]["_id"], 1);

    let listed: Value = client
        .get(format!("{addr}/sos/orders"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed["orders"].as_array().unwrap().len(), 1);

    handle.abort();
}

#[tokio::test]
async fn form_intake_normalizes_the_due_date() {
    let (addr, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{addr}/sos/orders"))
        .form(&[
            ("name", "B"),
            ("address", "2 Ave"),
            ("city", "Y"),
            ("state", "NY"),
            ("zipcode", "10001"),
            ("dueDate", "2099-12-31"),
            ("productType", "Piano"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["dueDate"], "12/31/2099");

    handle.abort();
}

#[tokio::test]
async fn rejection_and_error_paths() {
    let (addr, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    // Rush order: due tomorrow, lead time is five days.
    let tomorrow = (Utc::now().date_naive() + Duration::days(1))
        .format("%m/%d/%Y")
        .to_string();
    let res = client
        .post(format!("{addr}/sos/orders"))
        .json(&json!({
            "name": "A",
            "address": "1 St",
            "city": "X",
            "state": "CA",
            "zipcode": "90001",
            "dueDate": tomorrow,
            "productType": "Guitar"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "due date is too early");

    // Empty candidate record.
    let res = client
        .post(format!("{addr}/sos/orders"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "order is empty");

    // Malformed id is a bad request, not a 404.
    let res = client
        .get(format!("{addr}/sos/orders/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);

    // Absent id is a 404 with the fixed body.
    let res = client
        .get(format!("{addr}/sos/orders/999"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Not found");

    // Unknown routes get the same 404 shape.
    let res = client.get(format!("{addr}/nope")).send().await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Not found");

    handle.abort();
}

#[tokio::test]
async fn peripheral_endpoints() {
    let (addr, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let res = client.get(format!("{addr}/")).send().await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let page = res.text().await.unwrap();
    assert!(page.contains("SOS"));
    assert!(page.contains("Guitar"));

    let res = client.get(format!("{addr}/hostname")).send().await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert!(!res.text().await.unwrap().is_empty());

    let res = client.get(format!("{addr}/health")).send().await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);

    handle.abort();
}
