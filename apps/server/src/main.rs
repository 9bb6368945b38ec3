use anyhow::Context;
use whub::kernel::config::load_config;
use whub_logger::Logger;
use whub_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).init()?;

    let cfg = load_config(Some("server")).context("Critical: Configuration is malformed")?;

    Server::builder().config(cfg).build().await?.run().await
}
