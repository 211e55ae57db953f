use orders_hex::application::order_service::OrderService;
use orders_hex::config::ProfileInfo;
use orders_hex::domain::order::{Order, OrderInput};
use orders_hex::domain::page::Page;
use orders_hex::inbound::http::{HttpServer, HttpServerConfig};
use orders_repo::build_repo;
use serde_json::{json, Value};

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

async fn start_server(profile: ProfileInfo) -> (String, tokio::task::JoinHandle<()>) {
    let port = find_free_port();
    let config = HttpServerConfig {
        port: port.to_string(),
        profile,
    };

    let repo = build_repo(None).await.expect("build repo");
    let service = OrderService::new(repo);
    let server = HttpServer::new(service, config).await.unwrap();

    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });

    // Give the server a moment to start.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    (format!("http://127.0.0.1:{}", port), handle)
}

fn order_input(name: &str, price: f64) -> OrderInput {
    OrderInput {
        customer_name: Some(name.into()),
        product: Some("Widget".into()),
        quantity: Some(1),
        price: Some(price),
        status: None,
    }
}

#[tokio::test]
async fn create_get_update_delete_over_http() {
    let (addr, handle) = start_server(ProfileInfo::default()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/orders", addr))
        .json(&order_input("HttpUser", 5.0))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let created: Order = res.json().await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.status, "PENDING");

    let fetched: Order = client
        .get(format!("{}/api/orders/{}", addr, created.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);

    let replacement = json!({
        "customerName": "Renamed",
        "product": "Gizmo",
        "quantity": 3,
        "price": 19.5,
        "status": "SHIPPED"
    });
    let res = client
        .put(format!("{}/api/orders/{}", addr, created.id))
        .json(&replacement)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let updated: Order = res.json().await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.customer_name, "Renamed");
    assert_eq!(updated.product, "Gizmo");
    assert_eq!(updated.quantity, 3);
    assert_eq!(updated.price, 19.5);
    assert_eq!(updated.status, "SHIPPED");

    let res = client
        .delete(format!("{}/api/orders/{}", addr, created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert!(res.text().await.unwrap().is_empty());

    let res = client
        .get(format!("{}/api/orders/{}", addr, created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);

    handle.abort();
}

#[tokio::test]
async fn list_pages_and_sorts_over_http() {
    let (addr, handle) = start_server(ProfileInfo::default()).await;
    let client = reqwest::Client::new();

    for (name, price) in [("Cheap", 1.0), ("Dear", 50.0)] {
        let res = client
            .post(format!("{}/api/orders", addr))
            .json(&order_input(name, price))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    }

    let page: Page<Order> = client
        .get(format!("{}/api/orders?page=0&size=1&sort=price,desc", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].customer_name, "Dear");
    assert_eq!(page.total_elements, 2);
    assert_eq!(page.total_pages, 2);

    let page: Page<Order> = client
        .get(format!("{}/api/orders?page=0&size=1&sort=price,asc", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page.content[0].customer_name, "Cheap");

    let res = client
        .get(format!("{}/api/orders?sort=email", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);

    // Out-of-range paging falls back to the first page at the default size.
    let res = client
        .get(format!("{}/api/orders?page=-1&size=-1", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let page: Page<Order> = res.json().await.unwrap();
    assert_eq!(page.page, 0);
    assert_eq!(page.size, 20);
    assert_eq!(page.content.len(), 2);

    handle.abort();
}

#[tokio::test]
async fn update_with_invalid_body_is_rejected() {
    let (addr, handle) = start_server(ProfileInfo::default()).await;
    let client = reqwest::Client::new();

    let created: Order = client
        .post(format!("{}/api/orders", addr))
        .json(&order_input("Original", 4.0))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let bad_body = json!({ "customerName": "Ok Name", "product": " ", "quantity": 2, "price": 0 });
    let res = client
        .put(format!("{}/api/orders/{}", addr, created.id))
        .json(&bad_body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation failed");
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["product", "price"]);

    // The stored order is untouched.
    let fetched: Order = client
        .get(format!("{}/api/orders/{}", addr, created.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);

    handle.abort();
}

#[tokio::test]
async fn bad_request_and_not_found_paths() {
    let (addr, handle) = start_server(ProfileInfo::default()).await;
    let client = reqwest::Client::new();

    let bad_body = json!({ "customerName": "Al", "quantity": 0, "price": -1 });
    let res = client
        .post(format!("{}/api/orders", addr))
        .json(&bad_body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    for field in ["customerName", "product", "quantity", "price"] {
        assert!(fields.contains(&field), "missing {field} in {body}");
    }

    // Nothing was persisted by the rejected create.
    let page: Page<Order> = client
        .get(format!("{}/api/orders", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page.total_elements, 0);

    let res = client
        .post(format!("{}/api/orders", addr))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);

    let res = client
        .get(format!("{}/api/orders/999999", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    assert!(res.text().await.unwrap().is_empty());

    let res = client
        .get(format!("{}/api/orders/not-a-number", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);

    let res = client
        .put(format!("{}/api/orders/999999", addr))
        .json(&order_input("Nobody", 1.0))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);

    let res = client
        .delete(format!("{}/api/orders/999999", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);

    handle.abort();
}

#[tokio::test]
async fn profile_and_api_docs() {
    let profile = ProfileInfo {
        active_profile: "test".into(),
        welcome_message: "Hello from test".into(),
    };
    let (addr, handle) = start_server(profile.clone()).await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{}/api/config/profile", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["activeProfile"], "test");
    assert_eq!(body["welcomeMessage"], "Hello from test");

    let doc: Value = client
        .get(format!("{}/api-docs/openapi.json", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(doc["info"]["title"], "Order System API");
    assert_eq!(doc["info"]["version"], "1.0.0");
    assert!(doc["paths"]["/api/orders"]["post"].is_object());
    assert!(doc["paths"]["/api/orders/{id}"]["put"].is_object());

    let res = client.get(format!("{}/health", addr)).send().await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);

    handle.abort();
}
