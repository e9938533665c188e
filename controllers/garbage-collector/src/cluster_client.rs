//! Cluster resource accessor.
//!
//! Read-only adapter over the Kubernetes API for the two Cluster API
//! resources the reconciler needs: the watched `AWSCluster` and the
//! `Cluster` that owns it.

use crds::{AWSCluster, CLUSTER_API_GROUP, Cluster};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::{Api, Client};
use thiserror::Error;

/// Errors from cluster resource lookups.
#[derive(Debug, Error)]
pub enum ClusterClientError {
    /// The AWSCluster no longer exists. A valid terminal state for a
    /// reconciliation pass, distinguished so callers can treat it as
    /// "nothing to do".
    #[error("AWSCluster {0} not found")]
    NotFound(String),

    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] kube::Error),
}

/// Read access to the cluster resources.
#[async_trait::async_trait]
pub trait AwsClusterClient: Send + Sync {
    /// Fetch an AWSCluster by name and namespace.
    async fn get(&self, name: &str, namespace: &str) -> Result<AWSCluster, ClusterClientError>;

    /// Resolve the Cluster owning an AWSCluster. Returns `Ok(None)` when
    /// the owner reference has not been established yet, which is an
    /// expected transitional state.
    async fn get_owner_cluster(
        &self,
        aws_cluster: &AWSCluster,
    ) -> Result<Option<Cluster>, ClusterClientError>;
}

/// Accessor backed by a real Kubernetes client.
#[derive(Debug, Clone)]
pub struct ClusterClient {
    client: Client,
}

impl ClusterClient {
    /// Create a new accessor over the given client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl AwsClusterClient for ClusterClient {
    async fn get(&self, name: &str, namespace: &str) -> Result<AWSCluster, ClusterClientError> {
        let api: Api<AWSCluster> = Api::namespaced(self.client.clone(), namespace);
        match api.get(name).await {
            Ok(cluster) => Ok(cluster),
            Err(kube::Error::Api(response)) if response.code == 404 => {
                Err(ClusterClientError::NotFound(format!("{namespace}/{name}")))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn get_owner_cluster(
        &self,
        aws_cluster: &AWSCluster,
    ) -> Result<Option<Cluster>, ClusterClientError> {
        let Some(reference) = cluster_owner_ref(aws_cluster) else {
            return Ok(None);
        };

        let namespace = aws_cluster.metadata.namespace.as_deref().unwrap_or("default");
        let api: Api<Cluster> = Api::namespaced(self.client.clone(), namespace);
        let cluster = api.get(&reference.name).await?;
        Ok(Some(cluster))
    }
}

/// The owner reference pointing at a Cluster API `Cluster`, if the
/// AWSCluster has been adopted.
fn cluster_owner_ref(aws_cluster: &AWSCluster) -> Option<&OwnerReference> {
    aws_cluster
        .metadata
        .owner_references
        .as_deref()
        .unwrap_or_default()
        .iter()
        .find(|reference| {
            reference.kind == "Cluster" && reference.api_version.starts_with(CLUSTER_API_GROUP)
        })
}
