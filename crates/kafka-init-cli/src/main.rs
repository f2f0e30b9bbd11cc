//! kafka-init: one-shot topic bootstrap job.
//!
//! Waits for the stack's Kafka broker, ensures the declared topics exist,
//! prints the broker's final topic list, and exits. Scheduled by the
//! orchestration layer after the broker container starts.

mod cli;
mod kafka;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kafka_init_core::{provision, RetryPolicy, TopicStatus};

use crate::cli::Args;
use crate::kafka::KafkaBroker;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(default_level.into()))
        .init();

    info!("kafka-init v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Bootstrap servers: {}", args.bootstrap_servers);
    info!("  Partitions: {}", args.partitions);
    info!("  Replication factor: {}", args.replication_factor);
    info!("  Poll interval: {:?}", args.poll_interval);
    match args.max_wait {
        Some(d) => info!("  Max wait: {:?}", d),
        None => info!("  Max wait: none (wait until the broker is up)"),
    }

    let declarations = args.declarations();
    let policy = RetryPolicy::new(args.poll_interval, args.max_wait);
    let broker = KafkaBroker::new(&args.bootstrap_servers)?;

    let report = tokio::select! {
        report = provision(&broker, &declarations, &policy) => report?,
        _ = tokio::signal::ctrl_c() => {
            anyhow::bail!("Interrupted while provisioning topics");
        }
    };

    for outcome in &report.outcomes {
        match &outcome.status {
            TopicStatus::Created => info!("  {} -> created", outcome.name),
            TopicStatus::AlreadyExists => info!("  {} -> already exists", outcome.name),
            TopicStatus::Failed(reason) => warn!("  {} -> FAILED: {}", outcome.name, reason),
        }
    }
    info!("Broker topics: {}", report.broker_topics.join(", "));

    if !report.is_success() {
        let failed: Vec<&str> = report.failed().map(|o| o.name.as_str()).collect();
        anyhow::bail!("Failed to provision topics: {}", failed.join(", "));
    }

    info!("All declared topics are present");
    Ok(())
}
