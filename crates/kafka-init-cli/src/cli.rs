/// CLI argument parsing using clap

use std::time::Duration;

use clap::Parser;
use kafka_init_core::TopicSpec;

/// Topics this deployment provisions. Names are compiled in on purpose:
/// the declaration list is part of the stack, not an operator knob.
pub const DECLARED_TOPICS: &[&str] = &["domain.events", "notification.delivery"];

#[derive(Parser, Debug, Clone)]
#[command(
    name = "kafka-init",
    about = "Wait for the Kafka broker and ensure the stack's topics exist",
    version
)]
pub struct Args {
    /// Kafka bootstrap servers (comma-separated)
    #[arg(
        short = 'b',
        long,
        env = "KAFKA_BOOTSTRAP_SERVERS",
        default_value = "kafka:9092"
    )]
    pub bootstrap_servers: String,

    /// Number of partitions for created topics
    #[arg(
        short = 'p',
        long,
        env = "KAFKA_PARTITIONS",
        default_value = "3",
        value_parser = parse_positive
    )]
    pub partitions: i32,

    /// Replication factor for created topics
    #[arg(
        short = 'r',
        long,
        env = "KAFKA_REPLICATION_FACTOR",
        default_value = "1",
        value_parser = parse_positive
    )]
    pub replication_factor: i32,

    /// Sleep between broker readiness probes (e.g., "2s", "500ms")
    #[arg(long, value_parser = parse_duration, default_value = "2s")]
    pub poll_interval: Duration,

    /// Give up waiting for the broker after this long (e.g., "5m").
    /// Unset means wait forever; the orchestrator owns the job timeout.
    #[arg(long, value_parser = parse_duration)]
    pub max_wait: Option<Duration>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Args {
    /// The declaration list: every compiled-in topic name with the uniform
    /// partition/replication parameters applied.
    pub fn declarations(&self) -> Vec<TopicSpec> {
        DECLARED_TOPICS
            .iter()
            .map(|name| TopicSpec::new(*name, self.partitions, self.replication_factor))
            .collect()
    }
}

/// Positive integer parser for partitions/replication. Rejects zero and
/// garbage before any broker call is made.
fn parse_positive(s: &str) -> Result<i32, String> {
    let value: i32 = s
        .parse()
        .map_err(|e| format!("Invalid integer value: {}", e))?;
    if value < 1 {
        return Err(format!("Value must be positive, got {}", value));
    }
    Ok(value)
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();

    let (value_str, unit) = if let Some(pos) = s.find(|c: char| c.is_alphabetic()) {
        (&s[..pos], &s[pos..])
    } else {
        // No unit specified, assume seconds
        return s
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| format!("Invalid duration value: {}", e));
    };

    let value: u64 = value_str
        .parse()
        .map_err(|e| format!("Invalid duration value: {}", e))?;

    match unit.to_lowercase().as_str() {
        "s" | "sec" | "secs" | "second" | "seconds" => Ok(Duration::from_secs(value)),
        "m" | "min" | "mins" | "minute" | "minutes" => Ok(Duration::from_secs(value * 60)),
        "h" | "hr" | "hrs" | "hour" | "hours" => Ok(Duration::from_secs(value * 3600)),
        "ms" | "millis" | "millisecond" | "milliseconds" => Ok(Duration::from_millis(value)),
        _ => Err(format!("Unknown duration unit: {}", unit)),
    }
}
