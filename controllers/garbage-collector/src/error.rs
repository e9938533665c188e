//! Controller-specific error types.

use crate::cluster_client::ClusterClientError;
use ec2_client::Ec2Error;
use kube::Error as KubeError;
use thiserror::Error;

/// Errors that can occur in the garbage collector controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] KubeError),

    /// Cluster resource lookup error
    #[error("Cluster lookup error: {0}")]
    Cluster(#[from] ClusterClientError),

    /// EC2 API error
    #[error("EC2 error: {0}")]
    Ec2(#[from] Ec2Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Resource watch failed
    #[error("Resource watch failed: {0}")]
    Watch(String),
}
