//! Integration tests for the JSON-RPC endpoints and the server lifecycle
//!
//! Each test starts its own server on an ephemeral loopback port and talks to
//! it over HTTP or WebSocket, the same way remote callers do.

use echo_hub::activations::echo::{EchoRequest, EchoRpcClient};
use echo_hub::activations::health::HealthRpcClient;
use echo_hub::client::{batch_requests, run_batch};
use echo_hub::{build_module, DrainOutcome, EchoServer, RunningServer, ServerConfig};
use jsonrpsee::{
    core::client::{ClientT, Error as ClientError},
    http_client::{HttpClient, HttpClientBuilder},
    rpc_params,
    ws_client::WsClientBuilder,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

async fn start_server(grace_period: Duration) -> RunningServer {
    EchoServer::new(ServerConfig::local().with_grace_period(grace_period))
        .bind()
        .await
        .expect("Failed to bind test server")
        .start(build_module().expect("Failed to build RPC module"))
}

fn http_client(addr: SocketAddr) -> HttpClient {
    HttpClientBuilder::default()
        .build(format!("http://{}", addr))
        .expect("Failed to build HTTP client")
}

/// Run the server in the background; sending on the returned channel plays
/// the part of the termination signal.
fn spawn_lifecycle(
    running: RunningServer,
) -> (oneshot::Sender<()>, tokio::task::JoinHandle<DrainOutcome>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let task = tokio::spawn(running.run_until(async move {
        let _ = shutdown_rx.await;
    }));
    (shutdown_tx, task)
}

// ============================================================================
// Echo
// ============================================================================

#[tokio::test]
async fn test_echo_hello_replies_immediately() {
    let running = start_server(Duration::from_secs(5)).await;
    let client = http_client(running.local_addr());

    let started = Instant::now();
    let reply = client.echo(EchoRequest::new("hello", 0)).await.expect("Echo failed");

    assert_eq!(reply.message, "hello");
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_echo_empty_message_after_delay_over_websocket() {
    let running = start_server(Duration::from_secs(5)).await;
    let client = WsClientBuilder::default()
        .connection_timeout(Duration::from_secs(5))
        .build(format!("ws://{}", running.local_addr()))
        .await
        .expect("Failed to connect over WebSocket");

    let started = Instant::now();
    let reply = client.echo(EchoRequest::new("", 100)).await.expect("Echo failed");

    assert_eq!(reply.message, "");
    assert!(started.elapsed() >= Duration::from_millis(100));
}

#[tokio::test]
async fn test_echo_wire_format() {
    let running = start_server(Duration::from_secs(5)).await;
    let client = http_client(running.local_addr());

    let reply: Value = client
        .request("Echo", rpc_params![json!({"message": "raw", "delayTime": 0})])
        .await
        .expect("Raw Echo call failed");

    assert_eq!(reply, json!({"message": "raw"}));
}

#[tokio::test]
async fn test_short_call_does_not_wait_for_long_call() {
    let running = start_server(Duration::from_secs(5)).await;
    let slow_client = http_client(running.local_addr());
    let fast_client = http_client(running.local_addr());

    let slow = tokio::spawn(async move { slow_client.echo(EchoRequest::new("slow", 5_000)).await });
    tokio::time::sleep(Duration::from_millis(50)).await;

    let started = Instant::now();
    let reply = fast_client.echo(EchoRequest::new("fast", 0)).await.expect("Echo failed");

    assert_eq!(reply.message, "fast");
    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(!slow.is_finished(), "slow call should still be in flight");
    slow.abort();
}

#[tokio::test]
async fn test_negative_delay_is_rejected() {
    let running = start_server(Duration::from_secs(5)).await;
    let client = http_client(running.local_addr());

    match client.echo(EchoRequest::new("nope", -1)).await {
        Err(ClientError::Call(err)) => assert_eq!(err.code(), -32602),
        other => panic!("expected invalid params error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_health_check() {
    let running = start_server(Duration::from_secs(5)).await;
    let client = http_client(running.local_addr());

    let status = client.check().await.expect("health_check failed");
    assert_eq!(status.status, "healthy");
}

// ============================================================================
// Batch client
// ============================================================================

#[tokio::test]
async fn test_batch_tallies_every_reply() {
    let running = start_server(Duration::from_secs(5)).await;
    let client = http_client(running.local_addr());

    let summary = run_batch(&client, batch_requests("batch payload", 20, 8)).await;

    assert_eq!(summary.ok, 8);
    assert_eq!(summary.total(), 8);
    assert!(summary.is_clean());
}

#[tokio::test]
async fn test_batch_counts_rejected_calls_as_failed() {
    let running = start_server(Duration::from_secs(5)).await;
    let client = http_client(running.local_addr());

    let summary = run_batch(&client, batch_requests("bad delay", -10, 5)).await;

    assert_eq!(summary.failed, 5);
    assert_eq!(summary.ok, 0);
    assert!(!summary.is_clean(), "a batch with failures must not be reported clean");
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn test_in_flight_call_completes_during_drain() {
    let running = start_server(Duration::from_secs(5)).await;
    let addr = running.local_addr();
    let client = http_client(addr);

    let in_flight =
        tokio::spawn(async move { client.echo(EchoRequest::new("draining", 500)).await });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let (shutdown_tx, lifecycle) = spawn_lifecycle(running);
    shutdown_tx.send(()).expect("lifecycle task gone");
    tokio::time::sleep(Duration::from_millis(100)).await;

    // The listener is closed while the first call is still sleeping
    let late = http_client(addr).echo(EchoRequest::new("late", 0)).await;
    assert!(late.is_err(), "new calls must be refused once draining");

    let reply = in_flight
        .await
        .expect("client task panicked")
        .expect("in-flight call should complete");
    assert_eq!(reply.message, "draining");

    let outcome = lifecycle.await.expect("lifecycle task panicked");
    assert_eq!(outcome, DrainOutcome::Completed);
}

#[tokio::test]
async fn test_stuck_call_does_not_block_exit() {
    let running = start_server(Duration::from_millis(200)).await;
    let client = http_client(running.local_addr());

    let stuck = tokio::spawn(async move { client.echo(EchoRequest::new("stuck", 10_000)).await });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let started = Instant::now();
    let (shutdown_tx, lifecycle) = spawn_lifecycle(running);
    shutdown_tx.send(()).expect("lifecycle task gone");

    let outcome = lifecycle.await.expect("lifecycle task panicked");
    assert_eq!(outcome, DrainOutcome::TimedOut);
    assert!(started.elapsed() < Duration::from_secs(2));
    stuck.abort();
}
