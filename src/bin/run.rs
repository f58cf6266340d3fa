// Start the controller
use acme_istio_bridge::Config;
use kube::Client;
use tracing_subscriber::fmt::format::FmtSpan;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,acme_istio_bridge=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let config = Config::from_env()?;
    let client = Client::try_default().await?;
    acme_istio_bridge::run(client, config).await;
    Ok(())
}
