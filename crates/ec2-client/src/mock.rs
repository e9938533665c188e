//! Mock EC2 API for unit testing
//!
//! In-memory implementation of `Ec2Api` that records every provider call
//! in order and supports failure injection, so the two-phase delete
//! protocol can be tested without AWS credentials.

use crate::ec2_trait::Ec2Api;
use crate::error::Ec2Error;
use crate::models::{IpPermission, SecurityGroup};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One recorded provider call, in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ec2Call {
    /// `DescribeSecurityGroups` scoped to a VPC
    DescribeSecurityGroups {
        /// VPC filter of the call
        vpc_id: String,
    },
    /// `RevokeSecurityGroupIngress` for a group
    RevokeIngress {
        /// Target group
        group_id: String,
        /// Number of rule entries in the bulk revoke
        rule_count: usize,
    },
    /// `DeleteSecurityGroup` for a group
    DeleteSecurityGroup {
        /// Target group
        group_id: String,
    },
}

/// Mock EC2 edge for testing.
///
/// Stores security groups per VPC and mirrors the provider's behavior for
/// absent groups: revoking or deleting a group that no longer exists
/// returns an `InvalidGroup.NotFound` API error.
#[derive(Debug, Clone, Default)]
pub struct MockEc2Api {
    groups: Arc<Mutex<HashMap<String, Vec<SecurityGroup>>>>,
    calls: Arc<Mutex<Vec<Ec2Call>>>,
    describe_error: Arc<Mutex<Option<Ec2Error>>>,
    revoke_error: Arc<Mutex<Option<Ec2Error>>>,
    delete_error: Arc<Mutex<Option<Ec2Error>>>,
}

impl MockEc2Api {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a security group to a VPC (for test setup).
    pub fn add_group(&self, vpc_id: &str, group: SecurityGroup) {
        self.groups
            .lock()
            .unwrap()
            .entry(vpc_id.to_string())
            .or_default()
            .push(group);
    }

    /// Make every describe call fail with the given error.
    pub fn fail_describe(&self, err: Ec2Error) {
        *self.describe_error.lock().unwrap() = Some(err);
    }

    /// Make every revoke call fail with the given error.
    pub fn fail_revoke(&self, err: Ec2Error) {
        *self.revoke_error.lock().unwrap() = Some(err);
    }

    /// Make every delete call fail with the given error.
    pub fn fail_delete(&self, err: Ec2Error) {
        *self.delete_error.lock().unwrap() = Some(err);
    }

    /// All provider calls issued so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Ec2Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Ec2Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn group_not_found(group_id: &str) -> Ec2Error {
        Ec2Error::Api {
            code: Some("InvalidGroup.NotFound".to_string()),
            message: format!("The security group '{group_id}' does not exist"),
        }
    }
}

#[async_trait::async_trait]
impl Ec2Api for MockEc2Api {
    async fn describe_security_groups(&self, vpc_id: &str) -> Result<Vec<SecurityGroup>, Ec2Error> {
        self.record(Ec2Call::DescribeSecurityGroups {
            vpc_id: vpc_id.to_string(),
        });
        if let Some(err) = self.describe_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self
            .groups
            .lock()
            .unwrap()
            .get(vpc_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn revoke_ingress(
        &self,
        group_id: &str,
        permissions: &[IpPermission],
    ) -> Result<(), Ec2Error> {
        self.record(Ec2Call::RevokeIngress {
            group_id: group_id.to_string(),
            rule_count: permissions.len(),
        });
        if let Some(err) = self.revoke_error.lock().unwrap().clone() {
            return Err(err);
        }
        let mut groups = self.groups.lock().unwrap();
        for vpc_groups in groups.values_mut() {
            if let Some(group) = vpc_groups
                .iter_mut()
                .find(|group| group.group_id == group_id)
            {
                group.ip_permissions.clear();
                return Ok(());
            }
        }
        Err(Self::group_not_found(group_id))
    }

    async fn delete_security_group(&self, group_id: &str) -> Result<(), Ec2Error> {
        self.record(Ec2Call::DeleteSecurityGroup {
            group_id: group_id.to_string(),
        });
        if let Some(err) = self.delete_error.lock().unwrap().clone() {
            return Err(err);
        }
        let mut groups = self.groups.lock().unwrap();
        for vpc_groups in groups.values_mut() {
            let before = vpc_groups.len();
            vpc_groups.retain(|group| group.group_id != group_id);
            if vpc_groups.len() < before {
                return Ok(());
            }
        }
        Err(Self::group_not_found(group_id))
    }
}
