//! AWSCluster CRD
//!
//! Infrastructure resource of the Cluster API AWS provider. Owned and
//! mutated by the provider; this controller only reads the VPC identity
//! and reacts to the deletion timestamp.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[kube(
    group = "infrastructure.cluster.x-k8s.io",
    version = "v1beta1",
    kind = "AWSCluster",
    namespaced,
    status = "AWSClusterStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct AWSClusterSpec {
    /// AWS region the cluster lives in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Network configuration, including the cluster VPC
    #[serde(default)]
    pub network: NetworkSpec,
}

/// Network configuration of an AWSCluster.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSpec {
    /// The VPC the cluster's resources are scoped to
    #[serde(default)]
    pub vpc: VpcSpec,
}

/// VPC configuration and identity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct VpcSpec {
    /// Provider-assigned VPC identifier (e.g. "vpc-0123456789abcdef0")
    #[serde(default)]
    pub id: String,

    /// CIDR block of the VPC
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr_block: Option<String>,
}

/// Observed state of an AWSCluster.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct AWSClusterStatus {
    /// Whether the cluster infrastructure is ready
    #[serde(default)]
    pub ready: bool,
}

impl AWSCluster {
    /// Provider-assigned VPC ID of the cluster network.
    #[must_use]
    pub fn vpc_id(&self) -> &str {
        &self.spec.network.vpc.id
    }

    /// Whether the resource carries a deletion timestamp.
    #[must_use]
    pub fn is_marked_for_deletion(&self) -> bool {
        self.metadata.deletion_timestamp.is_some()
    }
}
