//! Reconciliation logic for AWSCluster garbage collection.
//!
//! Each pass is stateless and recomputed from current external state:
//! fetch the AWSCluster, resolve its owning Cluster, and only when the
//! resource carries a deletion timestamp locate and remove the leftover
//! ingress security group in its VPC. Errors propagate to the watcher's
//! error policy, which owns all retry behavior.

use crate::cluster_client::{AwsClusterClient, ClusterClientError};
use crate::error::ControllerError;
use crds::AWSCluster;
use ec2_client::SecurityGroups;
use kube_runtime::controller::Action;
use std::sync::Arc;
use tracing::{debug, info};

/// Reconciles AWSCluster resources.
pub struct Reconciler {
    cluster_client: Arc<dyn AwsClusterClient>,
    security_groups: Arc<dyn SecurityGroups>,
}

impl Reconciler {
    /// Creates a new reconciler instance.
    pub fn new(
        cluster_client: Arc<dyn AwsClusterClient>,
        security_groups: Arc<dyn SecurityGroups>,
    ) -> Self {
        Self {
            cluster_client,
            security_groups,
        }
    }

    /// Runs one reconciliation pass for the given resource key.
    ///
    /// Terminal non-error states (resource gone, no owner yet, not marked
    /// for deletion, nothing left to clean) return `Action::await_change()`.
    pub async fn reconcile(&self, name: &str, namespace: &str) -> Result<Action, ControllerError> {
        info!("Reconciling AWSCluster {}/{}", namespace, name);

        let aws_cluster = match self.cluster_client.get(name, namespace).await {
            Ok(cluster) => cluster,
            Err(ClusterClientError::NotFound(_)) => {
                info!("AWSCluster {}/{} no longer exists", namespace, name);
                return Ok(Action::await_change());
            }
            Err(err) => return Err(err.into()),
        };

        let owner = self.cluster_client.get_owner_cluster(&aws_cluster).await?;
        if owner.is_none() {
            info!(
                "AWSCluster {}/{} does not have an owner cluster yet",
                namespace, name
            );
            return Ok(Action::await_change());
        }

        if !aws_cluster.is_marked_for_deletion() {
            debug!("AWSCluster {}/{} not marked for deletion", namespace, name);
            return Ok(Action::await_change());
        }

        info!(
            "AWSCluster {}/{} is being deleted, cleaning up",
            namespace, name
        );
        self.reconcile_delete(&aws_cluster).await
    }

    /// Cleanup step, only reached when the deletion timestamp is set.
    async fn reconcile_delete(&self, aws_cluster: &AWSCluster) -> Result<Action, ControllerError> {
        let vpc_id = aws_cluster.vpc_id();

        let Some(group) = self
            .security_groups
            .find_managed_security_group(vpc_id)
            .await?
        else {
            debug!("No managed security group left in {}", vpc_id);
            return Ok(Action::await_change());
        };

        self.security_groups.delete_security_group(&group).await?;
        Ok(Action::await_change())
    }
}
