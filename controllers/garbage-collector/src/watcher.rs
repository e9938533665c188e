//! AWSCluster resource watcher.
//!
//! Drives reconciliation through `kube_runtime::Controller`, which handles
//! reconnection and requeueing. The reconcile function only forwards the
//! resource key; the reconciler re-fetches current state itself, so every
//! pass works from fresh external state.

use crate::error::ControllerError;
use crate::reconciler::Reconciler;
use crds::AWSCluster;
use futures::StreamExt;
use kube::Api;
use kube_runtime::{
    Controller, watcher,
    controller::{Action, Config as ControllerConfig},
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Requeue delay applied by the error policy after a failed pass.
const ERROR_REQUEUE_SECS: u64 = 60;

/// Watches AWSCluster resources for changes.
pub struct Watcher {
    reconciler: Arc<Reconciler>,
    aws_cluster_api: Api<AWSCluster>,
}

impl Watcher {
    /// Creates a new watcher instance.
    pub fn new(reconciler: Arc<Reconciler>, aws_cluster_api: Api<AWSCluster>) -> Self {
        Self {
            reconciler,
            aws_cluster_api,
        }
    }

    /// Starts watching AWSCluster resources. Runs until the stream ends.
    pub async fn watch_aws_clusters(&self) -> Result<(), ControllerError> {
        info!("Starting AWSCluster watcher");

        // Error policy: the reconciler performs no internal retries, so a
        // non-terminal failure is retried here with a flat requeue delay.
        let error_policy = |obj: Arc<AWSCluster>, error: &ControllerError, _ctx: Arc<Reconciler>| {
            error!(
                "Reconciliation error for AWSCluster {:?}: {}",
                obj.metadata.name, error
            );
            Action::requeue(Duration::from_secs(ERROR_REQUEUE_SECS))
        };

        let reconcile = |obj: Arc<AWSCluster>, ctx: Arc<Reconciler>| async move {
            let name = obj.metadata.name.clone().ok_or_else(|| {
                ControllerError::InvalidConfig("AWSCluster missing name".to_string())
            })?;
            let namespace = obj
                .metadata
                .namespace
                .clone()
                .unwrap_or_else(|| "default".to_string());
            ctx.reconcile(&name, &namespace).await
        };

        // Keep concurrent passes for different keys bounded; overlapping
        // passes for the same key stay safe through idempotence.
        let controller_config = ControllerConfig::default().concurrency(3);

        Controller::new(self.aws_cluster_api.clone(), watcher::Config::default())
            .with_config(controller_config)
            .run(reconcile, error_policy, Arc::clone(&self.reconciler))
            .for_each(|result| async move {
                match result {
                    Ok(obj) => debug!("Reconciled AWSCluster {:?}", obj),
                    Err(err) => error!("Controller error: {}", err),
                }
            })
            .await;

        Ok(())
    }
}
