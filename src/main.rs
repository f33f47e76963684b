use anyhow::Context;
use echo_hub::{build_module, server, DrainOutcome, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (silently ignore if not found)
    dotenvy::dotenv().ok();

    // Show echo_hub and jsonrpsee, hide noisy lower-level crates entirely
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(
                "echo_hub=info,echo_server=info,jsonrpsee=info,hyper=off,tokio=off,tower=off,h2=off"
            )
        });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    let module = build_module().context("Failed to register RPC methods")?;

    let outcome = server::serve(config, module)
        .await
        .context("Failed to start echo server")?;

    if outcome == DrainOutcome::TimedOut {
        tracing::warn!("Exiting with calls still in flight");
    }

    Ok(())
}
