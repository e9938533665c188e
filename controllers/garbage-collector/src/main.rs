//! CAPA Garbage Collector Controller
//!
//! Watches `AWSCluster` resources and, when one is marked for deletion,
//! removes the EC2 security group the NGINX ingress controller created in
//! the cluster VPC. The normal cluster-deletion path does not know about
//! that group, so without this controller it outlives the cluster.

mod cluster_client;
mod controller;
mod error;
mod reconciler;
mod watcher;
#[cfg(test)]
mod test_utils;

use crate::error::ControllerError;
use controller::Controller;
use std::env;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ControllerError> {
    tracing_subscriber::fmt::init();

    info!("Starting CAPA Garbage Collector Controller");

    // Load configuration from environment variables. AWS credentials and
    // region come from the SDK's default provider chain (env, IRSA, instance
    // profile), constructed once at startup.
    let namespace = env::var("WATCH_NAMESPACE").ok();

    info!("Configuration:");
    info!(
        "  Namespace: {}",
        namespace.as_deref().unwrap_or("all namespaces")
    );

    // Initialize and run controller
    let controller = Controller::new(namespace).await?;
    controller.run().await?;

    Ok(())
}
