//! Main controller implementation.
//!
//! Wires the process together: Kubernetes client, AWS SDK client, the
//! cluster accessor and security group service, the reconciler, and the
//! watcher task. All process-wide state is constructed once here and
//! passed in explicitly.

use crate::cluster_client::ClusterClient;
use crate::error::ControllerError;
use crate::reconciler::Reconciler;
use crate::watcher::Watcher;
use crds::AWSCluster;
use ec2_client::{SdkEc2Api, SecurityGroupService};
use kube::{Api, Client};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Main controller for AWSCluster garbage collection.
pub struct Controller {
    watcher: JoinHandle<Result<(), ControllerError>>,
}

impl Controller {
    /// Creates a new controller instance.
    pub async fn new(namespace: Option<String>) -> Result<Self, ControllerError> {
        info!("Initializing CAPA Garbage Collector Controller");

        // Create Kubernetes client
        let kube_client = Client::try_default().await?;

        // Create EC2 client from the SDK's default credential and region
        // provider chain
        let aws_config = aws_config::load_from_env().await;
        let ec2 = aws_sdk_ec2::Client::new(&aws_config);
        let security_groups = SecurityGroupService::new(SdkEc2Api::new(ec2));

        // Create cluster accessor
        let cluster_client = ClusterClient::new(kube_client.clone());

        let aws_cluster_api: Api<AWSCluster> = match namespace.as_deref() {
            Some(ns) => Api::namespaced(kube_client, ns),
            None => Api::all(kube_client),
        };

        // Create reconciler over the two outbound edges
        let reconciler = Arc::new(Reconciler::new(
            Arc::new(cluster_client),
            Arc::new(security_groups),
        ));

        // Start watcher in a background task
        let watcher_instance = Watcher::new(reconciler, aws_cluster_api);
        let watcher = tokio::spawn(async move { watcher_instance.watch_aws_clusters().await });

        Ok(Self { watcher })
    }

    /// Runs the controller until shutdown.
    pub async fn run(self) -> Result<(), ControllerError> {
        info!("CAPA Garbage Collector Controller running");

        self.watcher
            .await
            .map_err(|e| ControllerError::Watch(format!("AWSCluster watcher panicked: {e}")))?
            .map_err(|e| ControllerError::Watch(format!("AWSCluster watcher error: {e}")))?;

        Ok(())
    }
}
