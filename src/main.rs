mod cache;
mod config;
mod organize;
mod resolve;
mod routes;
mod summary;
mod view;

use anyhow::Context;
use axum::Router;
use axum::routing::get;
use log::info;
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::Config::from_env()?;
    let state = routes::AppState::new(&config);

    let app = Router::new()
        .route("/", get(routes::bracket_page))
        .route("/bracket.json", get(routes::bracket_json))
        .route("/healthz", get(routes::healthz))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind {addr}"))?;

    info!(
        "serving {} playoffs bracket on http://{addr} (cache dir: {})",
        config.latest_season,
        config.cache_dir.display()
    );
    axum::serve(listener, app).await.context("server exited")?;

    Ok(())
}
