//! Broker capability trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::topic::TopicSpec;

/// The minimal broker surface the provisioner needs: a metadata probe, an
/// existence check, and topic creation. The real implementation talks to a
/// Kafka cluster; tests use [`crate::InMemoryBroker`].
#[async_trait]
pub trait TopicBroker: Send + Sync {
    /// List the names of all topics the broker currently knows about.
    ///
    /// Doubles as the readiness probe: any error is interpreted as
    /// "broker not ready" during the readiness wait.
    async fn list_topics(&self) -> Result<Vec<String>>;

    /// Whether a topic with the given name exists.
    async fn topic_exists(&self, name: &str) -> Result<bool> {
        Ok(self.list_topics().await?.iter().any(|t| t == name))
    }

    /// Create a topic with the declared partition/replication parameters.
    ///
    /// Must return [`crate::Error::TopicAlreadyExists`] when the topic is
    /// already present, so callers can tell a create race apart from a real
    /// failure.
    async fn create_topic(&self, spec: &TopicSpec) -> Result<()>;
}
