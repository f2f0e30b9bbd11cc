//! In-memory implementation of TopicBroker for testing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::broker::TopicBroker;
use crate::error::{Error, Result};
use crate::topic::TopicSpec;

/// In-memory broker. Topic order is insertion order so listings are
/// deterministic in tests.
#[derive(Clone, Default)]
pub struct InMemoryBroker {
    topics: Arc<RwLock<HashMap<String, TopicSpec>>>,
    names: Arc<RwLock<Vec<String>>>,
}

impl InMemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a topic directly, bypassing the create path. Used by tests to
    /// model pre-existing topics (possibly with drifted parameters).
    pub async fn seed(&self, spec: TopicSpec) {
        let mut topics = self.topics.write().await;
        if !topics.contains_key(&spec.name) {
            self.names.write().await.push(spec.name.clone());
        }
        topics.insert(spec.name.clone(), spec);
    }

    /// The stored declaration for a topic, if present.
    pub async fn get(&self, name: &str) -> Option<TopicSpec> {
        self.topics.read().await.get(name).cloned()
    }
}

#[async_trait]
impl TopicBroker for InMemoryBroker {
    async fn list_topics(&self) -> Result<Vec<String>> {
        Ok(self.names.read().await.clone())
    }

    async fn create_topic(&self, spec: &TopicSpec) -> Result<()> {
        spec.validate()?;
        let mut topics = self.topics.write().await;
        if topics.contains_key(&spec.name) {
            return Err(Error::TopicAlreadyExists(spec.name.clone()));
        }
        topics.insert(spec.name.clone(), spec.clone());
        self.names.write().await.push(spec.name.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_exists() {
        let broker = InMemoryBroker::new();
        assert!(!broker.topic_exists("domain.events").await.unwrap());

        broker
            .create_topic(&TopicSpec::new("domain.events", 3, 1))
            .await
            .unwrap();

        assert!(broker.topic_exists("domain.events").await.unwrap());
        assert_eq!(broker.list_topics().await.unwrap(), vec!["domain.events"]);
    }

    #[tokio::test]
    async fn duplicate_create_reports_already_exists() {
        let broker = InMemoryBroker::new();
        let spec = TopicSpec::new("domain.events", 3, 1);
        broker.create_topic(&spec).await.unwrap();

        let err = broker.create_topic(&spec).await.unwrap_err();
        assert!(err.is_already_exists());
    }

    #[tokio::test]
    async fn seed_preserves_parameters() {
        let broker = InMemoryBroker::new();
        broker.seed(TopicSpec::new("domain.events", 1, 1)).await;

        let stored = broker.get("domain.events").await.unwrap();
        assert_eq!(stored.partitions, 1);
    }
}
