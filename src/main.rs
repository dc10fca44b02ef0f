use std::net::SocketAddr;

use tracing::info;

use fatsecret_scraper::config::Config;
use fatsecret_scraper::scraper::ScrapeService;
use fatsecret_scraper::server::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "fatsecret_scraper=debug,tower_http=info".to_string());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cfg = Config::from_env();
    let port = cfg.port;

    let service = ScrapeService::new(cfg)?;
    let app = build_router(AppState { service });

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
