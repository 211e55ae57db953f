///  To run :
///  cargo r --example client_example
use orders_client::OrdersClient;
use orders_hex::application::order_service::OrderService;
use orders_hex::config::ProfileInfo;
use orders_hex::inbound::http::{HttpServer, HttpServerConfig};
use orders_repo::build_repo;
use orders_types::domain::order::OrderInput;
use orders_types::domain::page::{PageRequest, Sort, SortDirection, SortField};
use reqwest::StatusCode;
use tempfile::tempdir;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

fn order(name: &str, product: &str, price: f64) -> OrderInput {
    OrderInput {
        customer_name: Some(name.into()),
        product: Some(product.into()),
        quantity: Some(1),
        price: Some(price),
        status: None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let port = find_free_port();
    let addr = format!("http://127.0.0.1:{port}/");

    // Use a temp file-backed SQLite DB so multiple connections see the same data.
    let tmp = tempdir()?;
    let db_path = tmp.path().join("orders.db");
    let db_url = format!("sqlite://{}", db_path.display());

    let repo = build_repo(Some(&db_url)).await?;
    let service = OrderService::new(repo);
    let server = HttpServer::new(
        service,
        HttpServerConfig {
            port: port.to_string(),
            profile: ProfileInfo {
                active_profile: "demo".into(),
                welcome_message: "Welcome to the demo".into(),
            },
        },
    )
    .await?;

    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let client = OrdersClient::new(&addr)?;
    let profile = client.profile().await?;
    println!("Profile={} ({})", profile.active_profile, profile.welcome_message);

    let created = client.create_order(&order("Example", "Widget", 5.0)).await?;
    println!("Created order id={}", created.id);
    assert_eq!(created.status, "PENDING");
    client.create_order(&order("Another", "Gadget", 7.0)).await?;

    let fetched = client.get_order(created.id).await?;
    assert_eq!(fetched.product, "Widget");

    let mut replacement = order("Example", "Widget", 5.0);
    replacement.status = Some("SHIPPED".into());
    let updated = client.update_order(created.id, &replacement).await?;
    println!("Updated status={} for id {}", updated.status, updated.id);

    let page = client
        .list_orders(&PageRequest::new(
            0,
            1,
            Sort {
                field: SortField::Price,
                direction: SortDirection::Desc,
            },
        ))
        .await?;
    println!(
        "Most expensive: {} ({} of {} orders)",
        page.content[0].customer_name,
        page.content.len(),
        page.total_elements
    );

    client.delete_order(created.id).await?;
    match client.get_order(created.id).await {
        Err(err)
            if err
                .downcast_ref::<reqwest::Error>()
                .and_then(|e| e.status())
                == Some(StatusCode::NOT_FOUND) =>
        {
            println!("Deleted order id={}", created.id)
        }
        Err(err) => return Err(err),
        Ok(_) => anyhow::bail!("order {} still present after delete", created.id),
    }

    handle.abort();
    Ok(())
}
