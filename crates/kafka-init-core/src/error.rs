//! Error types for the provisioning engine.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for provisioning operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the provisioning engine.
#[derive(Error, Debug)]
pub enum Error {
    /// The broker could not be reached at all.
    #[error("Broker unreachable: {0}")]
    Unreachable(String),

    /// The topic already exists on the broker. Distinguished so a create
    /// race can be treated as success-equivalent by the reconciler.
    #[error("Topic already exists: {0}")]
    TopicAlreadyExists(String),

    /// The broker rejected a topic creation for a reason other than the
    /// topic already existing.
    #[error("Topic creation failed: {0}")]
    TopicCreation(String),

    /// Any other broker-reported error (metadata query failures and the like).
    #[error("Broker error: {0}")]
    Broker(String),

    /// The readiness wait exceeded its configured deadline.
    #[error("Broker not ready after {0:?}")]
    ReadinessTimeout(Duration),

    /// Invalid topic declaration (empty name, non-positive partitions, ...).
    #[error("Invalid declaration: {0}")]
    InvalidDeclaration(String),
}

impl Error {
    /// Whether this error is the already-exists condition for the given topic.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Error::TopicAlreadyExists(_))
    }
}
