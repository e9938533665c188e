//! EC2 data models
//!
//! Crate-owned mirrors of the EC2 security group shapes this service reads
//! and mutates. SDK types are converted at the adapter edge so the core and
//! its tests never depend on AWS SDK types.

use serde::{Deserialize, Serialize};

/// A security group as returned by `DescribeSecurityGroups`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SecurityGroup {
    /// Provider-assigned group ID (e.g. "sg-0123456789abcdef0")
    pub group_id: String,

    /// Human-readable group name
    pub group_name: String,

    /// VPC the group is scoped to
    pub vpc_id: Option<String>,

    /// Free-form description
    pub description: Option<String>,

    /// Inbound rule entries currently attached to the group
    pub ip_permissions: Vec<IpPermission>,
}

/// One inbound rule entry of a security group.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct IpPermission {
    /// IP protocol ("tcp", "udp", "icmp", or "-1" for all)
    pub ip_protocol: Option<String>,

    /// Start of the port range
    pub from_port: Option<i32>,

    /// End of the port range
    pub to_port: Option<i32>,

    /// IPv4 CIDR ranges the rule allows
    pub ipv4_ranges: Vec<String>,

    /// IPv6 CIDR ranges the rule allows
    pub ipv6_ranges: Vec<String>,

    /// Other security groups the rule references
    pub group_references: Vec<SecurityGroupReference>,
}

/// A source-security-group reference inside a rule entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SecurityGroupReference {
    /// Referenced group ID
    pub group_id: Option<String>,

    /// Account owning the referenced group
    pub user_id: Option<String>,
}
