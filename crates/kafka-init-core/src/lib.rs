//! Topic provisioning engine for the `kafka-init` bootstrap job.
//!
//! Waits for a broker to become reachable, then makes its topic set a
//! superset of an injected declaration list: existing topics are left
//! untouched, missing ones are created with the declared partition and
//! replication parameters. The broker is reached through the [`TopicBroker`]
//! capability trait so tests can substitute an in-memory implementation.

pub mod broker;
pub mod error;
pub mod memory;
pub mod provision;
pub mod retry;
pub mod topic;

pub use broker::TopicBroker;
pub use error::{Error, Result};
pub use memory::InMemoryBroker;
pub use provision::{provision, reconcile};
pub use retry::{wait_for_broker, RetryPolicy};
pub use topic::{ProvisionReport, TopicOutcome, TopicSpec, TopicStatus};
