#![cfg(feature = "sqlite")]

use orders_repo::{build_repo, Repo};
use orders_types::domain::order::OrderInput;
use orders_types::domain::page::PageRequest;
use orders_types::ports::order_repository::OrderRepository;

#[tokio::test]
async fn builds_sqlite_repo_from_url() {
    // Use a temp DB path for isolation.
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("orders-test.db");
    let url = format!("sqlite://{}", db_path.display());

    let repo: Repo = build_repo(Some(&url)).await.expect("build repo");
    // basic sanity: list should succeed and be empty
    let page = repo.list(&PageRequest::default()).await.expect("list");
    assert!(page.content.is_empty());
    assert_eq!(page.total_pages, 0);

    let new_order = OrderInput {
        customer_name: Some("Disk".into()),
        product: Some("Drive".into()),
        quantity: Some(1),
        price: Some(80.0),
        status: None,
    }
    .validate()
    .unwrap();
    let created = repo.create(new_order).await.expect("create");
    assert!(db_path.exists());
    assert_eq!(repo.get(created.id).await.unwrap(), Some(created));
}
