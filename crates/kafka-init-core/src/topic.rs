//! Topic declarations and provisioning outcomes.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A declared topic: the desired state this job converges the broker toward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSpec {
    /// Topic name
    pub name: String,

    /// Number of partitions
    pub partitions: i32,

    /// Replication factor
    pub replication: i32,
}

impl TopicSpec {
    pub fn new(name: impl Into<String>, partitions: i32, replication: i32) -> Self {
        Self {
            name: name.into(),
            partitions,
            replication,
        }
    }

    /// Reject declarations the broker would refuse anyway, before any
    /// network call is made.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidDeclaration("empty topic name".to_string()));
        }
        if self.partitions < 1 {
            return Err(Error::InvalidDeclaration(format!(
                "topic '{}': partitions must be positive, got {}",
                self.name, self.partitions
            )));
        }
        if self.replication < 1 {
            return Err(Error::InvalidDeclaration(format!(
                "topic '{}': replication factor must be positive, got {}",
                self.name, self.replication
            )));
        }
        Ok(())
    }
}

/// Per-topic result of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopicStatus {
    /// The topic was created by this run.
    Created,
    /// The topic was already present (or lost a create race, which is
    /// equivalent from this job's point of view).
    AlreadyExists,
    /// The broker rejected the creation for some other reason.
    Failed(String),
}

/// Outcome for a single declared topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicOutcome {
    pub name: String,
    pub status: TopicStatus,
}

impl TopicOutcome {
    pub fn new(name: impl Into<String>, status: TopicStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}

/// Result of a full provisioning run: one outcome per declaration, plus the
/// broker's topic listing captured by the final summary step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvisionReport {
    pub outcomes: Vec<TopicOutcome>,
    pub broker_topics: Vec<String>,
}

impl ProvisionReport {
    /// True when no declaration failed. Already-existing topics count as
    /// success.
    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }

    /// Outcomes that ended in failure.
    pub fn failed(&self) -> impl Iterator<Item = &TopicOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, TopicStatus::Failed(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_spec_passes_validation() {
        assert!(TopicSpec::new("domain.events", 3, 1).validate().is_ok());
    }

    #[test]
    fn zero_partitions_rejected() {
        let err = TopicSpec::new("domain.events", 0, 1).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidDeclaration(_)));
    }

    #[test]
    fn negative_replication_rejected() {
        let err = TopicSpec::new("domain.events", 3, -1)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDeclaration(_)));
    }

    #[test]
    fn empty_name_rejected() {
        assert!(TopicSpec::new("", 3, 1).validate().is_err());
    }

    #[test]
    fn report_success_ignores_already_exists() {
        let report = ProvisionReport {
            outcomes: vec![
                TopicOutcome::new("a", TopicStatus::Created),
                TopicOutcome::new("b", TopicStatus::AlreadyExists),
            ],
            broker_topics: vec!["a".to_string(), "b".to_string()],
        };
        assert!(report.is_success());
    }

    #[test]
    fn report_failure_detected() {
        let report = ProvisionReport {
            outcomes: vec![
                TopicOutcome::new("a", TopicStatus::Created),
                TopicOutcome::new("b", TopicStatus::Failed("boom".to_string())),
            ],
            broker_topics: vec!["a".to_string()],
        };
        assert!(!report.is_success());
        assert_eq!(report.failed().count(), 1);
    }
}
