//! Echo client - fires a batch of concurrent echo calls and checks the replies
//!
//! ```text
//! echo-client --url http://127.0.0.1:5000 -n 100 --time-ms 250 --size-byte 1024
//! ```

use std::time::{Duration, Instant};

use clap::Parser;
use echo_hub::client::{batch_requests, run_batch};
use jsonrpsee::{http_client::HttpClientBuilder, ws_client::WsClientBuilder};

/// CLI arguments for the echo client
#[derive(Parser, Debug)]
#[command(name = "echo-client")]
#[command(about = "Send concurrent echo requests and verify the replies")]
struct Args {
    /// Server URL; ws:// and wss:// use WebSocket, anything else HTTP
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    url: String,

    /// Number of requests to send
    #[arg(short = 'n', long, default_value = "10")]
    requests: usize,

    /// Delay the server should apply to each call, in milliseconds
    #[arg(long, default_value = "0")]
    time_ms: i64,

    /// Size of the generated payload in bytes
    #[arg(long, default_value = "0")]
    size_byte: usize,

    /// Explicit message to send (overrides --size-byte)
    #[arg(long)]
    message: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "3600")]
    timeout_sec: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("echo_client=info,jsonrpsee=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let message = args
        .message
        .clone()
        .unwrap_or_else(|| "x".repeat(args.size_byte));
    let requests = batch_requests(&message, args.time_ms, args.requests);
    let timeout = Duration::from_secs(args.timeout_sec);

    tracing::info!(
        url = %args.url,
        requests = args.requests,
        delay_ms = args.time_ms,
        message_bytes = message.len(),
        "Sending echo requests"
    );

    let started = Instant::now();
    let summary = if args.url.starts_with("ws://") || args.url.starts_with("wss://") {
        let client = WsClientBuilder::default()
            .request_timeout(timeout)
            .max_concurrent_requests(args.requests.max(1))
            .build(&args.url)
            .await?;
        run_batch(&client, requests).await
    } else {
        let client = HttpClientBuilder::default()
            .request_timeout(timeout)
            .build(&args.url)?;
        run_batch(&client, requests).await
    };

    tracing::info!(
        ok = summary.ok,
        mismatched = summary.mismatched,
        failed = summary.failed,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Batch complete"
    );

    if !summary.is_clean() {
        anyhow::bail!(
            "{} of {} calls failed or mismatched",
            summary.failed + summary.mismatched,
            args.requests
        );
    }

    Ok(())
}
