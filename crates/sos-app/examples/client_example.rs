///  To run :
///  cargo r --example client_example
use sos_client::SosClient;
use sos_hex::application::order_service::OrderService;
use sos_hex::inbound::http::{HttpServer, HttpServerConfig};
use sos_repo::build_repo;
use sos_types::domain::order::OrderDraft;
use tempfile::tempdir;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let port = find_free_port();
    let addr = format!("http://127.0.0.1:{port}/");

    // File-backed SQLite DB so multiple connections see the same data.
    let tmp = tempdir()?;
    let db_path = tmp.path().join("sos.db");
    let db_url = format!("sqlite://{}", db_path.display());

    let repo = build_repo(Some(&db_url)).await?;
    let service = OrderService::new(repo);
    let server = HttpServer::new(
        service,
        HttpServerConfig {
            host: "127.0.0.1".into(),
            port: port.to_string(),
        },
    )
    .await?;

    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    // Use the client against the running server.
    let client = SosClient::new(&addr)?;

    let mut draft = OrderDraft::new();
    draft
        .set("name", "Example")
        .set("address", "1 St")
        .set("city", "X")
        .set("state", "CA")
        .set("zipcode", "90001")
        .set("dueDate", "12/31/2099")
        .set("productType", "Guitar");

    let created = client.create_order(draft).await?;
    println!("Created order id={}", created.id);

    let fetched = client.get_order(&created.id).await?;
    println!("Fetched product={}", fetched.product_type);

    let orders = client.list_orders().await?;
    println!("Listed {} order(s)", orders.len());

    handle.abort();
    Ok(())
}
