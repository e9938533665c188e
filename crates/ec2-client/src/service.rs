//! Security group cleanup service
//!
//! Locates the ingress controller's leftover security group in a VPC and
//! deletes it with the two-phase protocol EC2 requires: revoke all inbound
//! rules first, then delete the group by ID.

use crate::ec2_trait::Ec2Api;
use crate::error::Ec2Error;
use crate::models::SecurityGroup;
use tracing::{debug, info, warn};

/// Marker substring identifying a Kubernetes-managed security group.
///
/// The ingress controller names its group after the cluster with a "k8s"
/// token; that naming convention is the only handle this service has on
/// the group.
pub const MANAGED_GROUP_MARKER: &str = "k8s";

/// Operations the reconciler needs from the security group edge.
#[async_trait::async_trait]
pub trait SecurityGroups: Send + Sync {
    /// Find the managed security group in a VPC, if one exists.
    async fn find_managed_security_group(
        &self,
        vpc_id: &str,
    ) -> Result<Option<SecurityGroup>, Ec2Error>;

    /// Remove a security group, revoking its inbound rules first.
    async fn delete_security_group(&self, group: &SecurityGroup) -> Result<(), Ec2Error>;
}

/// Cleanup service over any `Ec2Api` implementation.
#[derive(Debug, Clone)]
pub struct SecurityGroupService<A> {
    api: A,
}

impl<A: Ec2Api> SecurityGroupService<A> {
    /// Create a new service over the given EC2 edge.
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl<A: Ec2Api> SecurityGroups for SecurityGroupService<A> {
    /// Describes all groups scoped to `vpc_id` and filters to those whose
    /// name contains [`MANAGED_GROUP_MARKER`]. At most one match is
    /// expected per VPC; extras are reported as an inconsistency rather
    /// than silently picking one.
    async fn find_managed_security_group(
        &self,
        vpc_id: &str,
    ) -> Result<Option<SecurityGroup>, Ec2Error> {
        let groups = self.api.describe_security_groups(vpc_id).await?;

        let mut matches: Vec<SecurityGroup> = groups
            .into_iter()
            .filter(|group| group.group_name.contains(MANAGED_GROUP_MARKER))
            .collect();

        match matches.len() {
            0 => {
                debug!("No managed security group in {}", vpc_id);
                Ok(None)
            }
            1 => Ok(matches.pop()),
            _ => {
                warn!(
                    "Expected at most one managed security group in {}, found {}",
                    vpc_id,
                    matches.len()
                );
                Err(Ec2Error::AmbiguousGroups {
                    vpc_id: vpc_id.to_string(),
                    names: matches.into_iter().map(|group| group.group_name).collect(),
                })
            }
        }
    }

    /// Two-phase delete. A group with inbound rules cannot always be
    /// deleted directly, so any rules are revoked in one bulk call first;
    /// a revoke failure aborts without attempting the delete. The delete
    /// itself tolerates already-deleted and concurrent-cleanup provider
    /// codes, which keeps retried passes idempotent in effect.
    async fn delete_security_group(&self, group: &SecurityGroup) -> Result<(), Ec2Error> {
        if !group.ip_permissions.is_empty() {
            self.api
                .revoke_ingress(&group.group_id, &group.ip_permissions)
                .await?;
            info!(
                "Revoked {} ingress rule(s) from {} ({})",
                group.ip_permissions.len(),
                group.group_name,
                group.group_id
            );
        }

        match self.api.delete_security_group(&group.group_id).await {
            Ok(()) => {
                info!("Deleted security group {} ({})", group.group_name, group.group_id);
                Ok(())
            }
            Err(err) if err.is_ignorable_for_delete() => {
                debug!(
                    "Security group {} already removed or in concurrent cleanup: {}",
                    group.group_id, err
                );
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}
