//! Reconciliation pass: converge the broker's topic set toward the
//! declaration list.

use tracing::{error, info, warn};

use crate::broker::TopicBroker;
use crate::error::{Error, Result};
use crate::retry::{wait_for_broker, RetryPolicy};
use crate::topic::{ProvisionReport, TopicOutcome, TopicSpec, TopicStatus};

/// Run one reconciliation pass over the declarations, in list order.
///
/// Existing topics are left untouched, whatever their current partition or
/// replication parameters. A create that races another provisioner and loses
/// ("already exists" from the broker) is recorded as already present. Any
/// other creation error is recorded against that topic and processing
/// continues with the rest of the list. An existence-check error aborts the
/// pass: the broker was ready and went away again, which nothing here can
/// recover from.
pub async fn reconcile(
    broker: &dyn TopicBroker,
    declarations: &[TopicSpec],
) -> Result<Vec<TopicOutcome>> {
    for spec in declarations {
        spec.validate()?;
    }

    let mut outcomes = Vec::with_capacity(declarations.len());

    for spec in declarations {
        if broker.topic_exists(&spec.name).await? {
            info!(topic = %spec.name, "Topic already exists");
            outcomes.push(TopicOutcome::new(&spec.name, TopicStatus::AlreadyExists));
            continue;
        }

        match broker.create_topic(spec).await {
            Ok(()) => {
                info!(
                    topic = %spec.name,
                    partitions = spec.partitions,
                    replication = spec.replication,
                    "Topic created"
                );
                outcomes.push(TopicOutcome::new(&spec.name, TopicStatus::Created));
            }
            Err(Error::TopicAlreadyExists(_)) => {
                // Lost a race against a concurrent provisioner.
                info!(topic = %spec.name, "Topic already exists");
                outcomes.push(TopicOutcome::new(&spec.name, TopicStatus::AlreadyExists));
            }
            Err(e) => {
                error!(topic = %spec.name, error = %e, "Topic creation failed");
                outcomes.push(TopicOutcome::new(
                    &spec.name,
                    TopicStatus::Failed(e.to_string()),
                ));
            }
        }
    }

    Ok(outcomes)
}

/// Full provisioning run: readiness wait, reconciliation pass, then a final
/// summary listing of everything the broker now has.
pub async fn provision(
    broker: &dyn TopicBroker,
    declarations: &[TopicSpec],
    policy: &RetryPolicy,
) -> Result<ProvisionReport> {
    wait_for_broker(broker, policy).await?;

    let outcomes = reconcile(broker, declarations).await?;

    // Observational only: a listing failure here does not change outcomes.
    let broker_topics = match broker.list_topics().await {
        Ok(topics) => {
            info!(topics = ?topics, "Current broker topics");
            topics
        }
        Err(e) => {
            warn!(error = %e, "Could not list topics for the final summary");
            Vec::new()
        }
    };

    Ok(ProvisionReport {
        outcomes,
        broker_topics,
    })
}
