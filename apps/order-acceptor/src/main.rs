//! Order Acceptor Binary
//!
//! Replays newline-delimited JSON session events from stdin through the
//! acceptor and writes every outbound message to stdout as a JSON line.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin order-acceptor < session.jsonl
//! ```
//!
//! # Environment Variables
//!
//! - `ORDER_ACCEPTOR_CONFIG`: Config file path (default: config.yaml)
//! - `RUST_LOG`: Log filter (default: `observability.log_level`)

use std::sync::Arc;

use anyhow::Context;
use order_acceptor::config::load_config;
use order_acceptor::infrastructure::replay::SessionReplay;
use order_acceptor::observability::{MetricsConfig, init_metrics};
use order_acceptor::telemetry::init_tracing;
use order_acceptor::{Acceptor, IdGenerator, InMemorySessionRegistry, TracingReportSink};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading any configuration
    let _ = dotenvy::dotenv();

    let config = load_config(None).context("loading configuration")?;
    init_tracing(&config.observability.log_level);

    tracing::info!(node_id = %config.acceptor.node_id, "Starting order acceptor");

    if let Some(addr) = config.observability.metrics_socket_addr()? {
        init_metrics(&MetricsConfig::with_addr(addr)).context("starting metrics exporter")?;
    }

    let table = Arc::new(config.risk_control_table()?);
    tracing::info!(
        instruments = table.len(),
        symbols = ?table.symbols(),
        "Risk controls loaded"
    );
    let registry = Arc::new(InMemorySessionRegistry::sequential());
    let acceptor = Acceptor::risk_gated(
        table,
        Arc::new(IdGenerator::new(config.acceptor.node_id.clone())),
        config.acceptor.avg_px,
        config.delivery_policy(),
        Arc::clone(&registry),
        Arc::new(TracingReportSink::new()),
    );
    let replay = SessionReplay::new(registry, acceptor);

    tokio::select! {
        result = run(&replay) => result?,
        () = shutdown_signal() => {}
    }

    tracing::info!("Order acceptor stopped");
    Ok(())
}

/// Read events until EOF.
async fn run(replay: &SessionReplay<TracingReportSink>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut line_no: u64 = 0;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }

        // Delivery may back off between attempts; keep that off the reactor.
        let step = match tokio::task::block_in_place(|| replay.apply_line(&line)) {
            Ok(step) => step,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "Skipping session event");
                continue;
            }
        };

        for outbound in &step.outbound {
            let mut json = serde_json::to_string(outbound)?;
            json.push('\n');
            stdout.write_all(json.as_bytes()).await?;
        }
        stdout.flush().await?;
    }

    tracing::info!(events = line_no, "End of input");
    Ok(())
}

/// Wait for Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C, shutting down");
}

