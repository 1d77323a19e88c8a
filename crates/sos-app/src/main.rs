use sos_hex::application::order_service::OrderService;
use sos_hex::config::Config;
use sos_hex::inbound::http::{HttpServer, HttpServerConfig};
use sos_repo::{build_repo, Repo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for VCAP_APP_HOST / VCAP_APP_PORT / SQLITE_DB_LOCATION.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = Config::from_env()?;

    // A broken store is fatal: the process must not serve traffic without it.
    let database_url = config.database_url();
    let repo: Repo = build_repo(Some(&database_url)).await?;
    let service = OrderService::new(repo);

    let server_cfg = HttpServerConfig {
        host: config.host.clone(),
        port: config.port.clone(),
    };

    let http = HttpServer::new(service, server_cfg).await?;
    http.run().await
}
