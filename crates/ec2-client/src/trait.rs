//! Ec2Api trait for mocking
//!
//! Abstracts the raw EC2 provider calls so the security group service and
//! its callers can be tested without AWS credentials. The concrete
//! `SdkEc2Api` implements this trait; tests use `MockEc2Api`.

use crate::error::Ec2Error;
use crate::models::{IpPermission, SecurityGroup};

/// Raw EC2 calls the security group service depends on.
///
/// All async methods must be `Send` to work with Tokio's work-stealing
/// runtime.
#[async_trait::async_trait]
pub trait Ec2Api: Send + Sync {
    /// List all security groups scoped to a VPC.
    async fn describe_security_groups(&self, vpc_id: &str) -> Result<Vec<SecurityGroup>, Ec2Error>;

    /// Revoke inbound rule entries from a group in a single bulk call.
    async fn revoke_ingress(
        &self,
        group_id: &str,
        permissions: &[IpPermission],
    ) -> Result<(), Ec2Error>;

    /// Delete a security group by ID.
    async fn delete_security_group(&self, group_id: &str) -> Result<(), Ec2Error>;
}
