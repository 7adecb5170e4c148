mod bootstrap;
mod app;
mod config;
mod docs;
mod routes;
mod tunnel;

use clap::Parser;

use crate::config::app::LaunchArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = LaunchArgs::parse();

    bootstrap::init_base().await;

    bootstrap::init_server(args).await
}
