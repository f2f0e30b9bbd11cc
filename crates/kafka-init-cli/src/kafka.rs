//! rdkafka-backed implementation of the broker capability trait.

use std::time::Duration;

use async_trait::async_trait;
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::config::ClientConfig;
use rdkafka::error::RDKafkaErrorCode;

use kafka_init_core::{Error, Result, TopicBroker, TopicSpec};

/// Admin-client wrapper speaking to a real Kafka cluster.
pub struct KafkaBroker {
    admin: AdminClient<DefaultClientContext>,
    metadata_timeout: Duration,
}

impl KafkaBroker {
    /// Connect to the given bootstrap servers. Creating the client does not
    /// touch the network; the first metadata probe does.
    pub fn new(bootstrap_servers: &str) -> Result<Self> {
        let admin: AdminClient<_> = ClientConfig::new()
            .set("bootstrap.servers", bootstrap_servers)
            .create()
            .map_err(|e| Error::Unreachable(e.to_string()))?;

        Ok(Self {
            admin,
            metadata_timeout: Duration::from_secs(5),
        })
    }
}

#[async_trait]
impl TopicBroker for KafkaBroker {
    async fn list_topics(&self) -> Result<Vec<String>> {
        let metadata = self
            .admin
            .inner()
            .fetch_metadata(None, self.metadata_timeout)
            .map_err(|e| Error::Unreachable(e.to_string()))?;

        Ok(metadata
            .topics()
            .iter()
            .map(|t| t.name().to_string())
            .collect())
    }

    async fn create_topic(&self, spec: &TopicSpec) -> Result<()> {
        let new_topic = NewTopic::new(
            &spec.name,
            spec.partitions,
            TopicReplication::Fixed(spec.replication),
        );

        let results = self
            .admin
            .create_topics(&[new_topic], &AdminOptions::new())
            .await
            .map_err(|e| Error::Broker(e.to_string()))?;

        for result in results {
            match result {
                Ok(_) => {}
                Err((name, RDKafkaErrorCode::TopicAlreadyExists)) => {
                    return Err(Error::TopicAlreadyExists(name));
                }
                Err((name, code)) => {
                    return Err(Error::TopicCreation(format!("{}: {}", name, code)));
                }
            }
        }

        Ok(())
    }
}
