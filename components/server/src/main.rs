use std::net::SocketAddr;

use anyhow::Context;
use console::Style;
use store::Store;

use crate::{
    config::Config,
    web::{routes, AppState},
};

mod config;
mod web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::new().filter_level(log::LevelFilter::Info).parse_default_env().init();

    if let Err(e) = run().await {
        eprintln!("{}: {:?}", Style::new().red().bold().apply_to("ERR"), e);
        std::process::exit(1);
    };
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().context("Unable to load configuration")?;

    let store = Store::open(&config.data_file, config.store_mode);
    let app = routes(AppState::new(store, &config.password));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Unable to bind {addr}"))?;
    log::info!("Server running on port {}", config.port);

    axum::serve(listener, app).await?;
    Ok(())
}
