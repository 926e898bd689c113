use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::{config::Config, state::AppState, store::QuoteStore};

mod config;
mod db;
mod error;
mod models;
mod routes;
mod state;
mod store;
mod telemetry;
mod templates;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    telemetry::init_telemetry()?;

    tracing::info!("initializing... please wait warmly.");
    let config = Config::load();

    let pool = db::init_database(&config.database_url).await?;
    let store = QuoteStore::new(pool);
    let state = AppState::new(store);

    let app = routes::create_router(state);

    let addr = SocketAddr::from((config.host, config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("finished initializing! listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
    tracing::info!("shutting down gracefully...");
}
