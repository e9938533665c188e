//! Test utilities for unit testing the reconciler.
//!
//! Fake collaborators for the two outbound edges (cluster accessor and
//! security group service) plus helpers for building test resources.

use crate::cluster_client::{AwsClusterClient, ClusterClientError};
use crds::{AWSCluster, AWSClusterSpec, Cluster, ClusterSpec, NetworkSpec, VpcSpec};
use ec2_client::{Ec2Error, SecurityGroup, SecurityGroups};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};
use k8s_openapi::chrono::Utc;
use kube::core::ErrorResponse;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Helper to create a test AWSCluster, optionally marked for deletion.
pub fn create_test_aws_cluster(
    name: &str,
    namespace: &str,
    vpc_id: &str,
    deleted: bool,
) -> AWSCluster {
    AWSCluster {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            deletion_timestamp: deleted.then(|| Time(Utc::now())),
            ..Default::default()
        },
        spec: AWSClusterSpec {
            region: Some("eu-west-1".to_string()),
            network: NetworkSpec {
                vpc: VpcSpec {
                    id: vpc_id.to_string(),
                    cidr_block: None,
                },
            },
        },
        status: None,
    }
}

/// Helper to create a test owning Cluster.
pub fn create_test_cluster(name: &str, namespace: &str) -> Cluster {
    Cluster {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        spec: ClusterSpec::default(),
        status: None,
    }
}

/// Helper to create a test security group with no inbound rules.
pub fn create_test_security_group(group_id: &str, group_name: &str) -> SecurityGroup {
    SecurityGroup {
        group_id: group_id.to_string(),
        group_name: group_name.to_string(),
        vpc_id: Some("vpc-test1234".to_string()),
        description: None,
        ip_permissions: vec![],
    }
}

fn internal_error() -> kube::Error {
    kube::Error::Api(ErrorResponse {
        status: "Failure".to_string(),
        message: "boom".to_string(),
        reason: "InternalError".to_string(),
        code: 500,
    })
}

/// Fake cluster accessor with programmable responses and call counters.
pub struct FakeClusterClient {
    aws_cluster: Option<AWSCluster>,
    owner: Option<Cluster>,
    fail_get: bool,
    fail_owner: bool,
    get_calls: AtomicUsize,
    owner_calls: AtomicUsize,
}

impl FakeClusterClient {
    /// Accessor whose `get` reports the resource as gone.
    pub fn not_found() -> Self {
        Self {
            aws_cluster: None,
            owner: None,
            fail_get: false,
            fail_owner: false,
            get_calls: AtomicUsize::new(0),
            owner_calls: AtomicUsize::new(0),
        }
    }

    /// Accessor returning the given AWSCluster, adopted by an owner.
    pub fn with_cluster(aws_cluster: AWSCluster) -> Self {
        let owner = create_test_cluster(
            aws_cluster.metadata.name.as_deref().unwrap_or("foo"),
            aws_cluster.metadata.namespace.as_deref().unwrap_or("bar"),
        );
        Self {
            aws_cluster: Some(aws_cluster),
            owner: Some(owner),
            fail_get: false,
            fail_owner: false,
            get_calls: AtomicUsize::new(0),
            owner_calls: AtomicUsize::new(0),
        }
    }

    /// Accessor whose `get` fails with a transient API error.
    pub fn failing_get() -> Self {
        Self {
            fail_get: true,
            ..Self::not_found()
        }
    }

    /// Drop the owner relation (resource not yet adopted).
    pub fn without_owner(mut self) -> Self {
        self.owner = None;
        self
    }

    /// Make owner resolution fail with a transient API error.
    pub fn failing_owner(mut self) -> Self {
        self.fail_owner = true;
        self
    }

    /// Number of `get` calls observed.
    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    /// Number of `get_owner_cluster` calls observed.
    pub fn owner_calls(&self) -> usize {
        self.owner_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AwsClusterClient for FakeClusterClient {
    async fn get(&self, name: &str, namespace: &str) -> Result<AWSCluster, ClusterClientError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_get {
            return Err(ClusterClientError::Kube(internal_error()));
        }
        self.aws_cluster
            .clone()
            .ok_or_else(|| ClusterClientError::NotFound(format!("{namespace}/{name}")))
    }

    async fn get_owner_cluster(
        &self,
        _aws_cluster: &AWSCluster,
    ) -> Result<Option<Cluster>, ClusterClientError> {
        self.owner_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_owner {
            return Err(ClusterClientError::Kube(internal_error()));
        }
        Ok(self.owner.clone())
    }
}

/// Fake security group service recording lookups and deletions.
pub struct FakeSecurityGroups {
    group: Mutex<Option<SecurityGroup>>,
    find_error: Mutex<Option<Ec2Error>>,
    delete_error: Mutex<Option<Ec2Error>>,
    find_calls: Mutex<Vec<String>>,
    deleted: Mutex<Vec<SecurityGroup>>,
}

impl FakeSecurityGroups {
    /// Service with no managed group in any VPC.
    pub fn empty() -> Self {
        Self {
            group: Mutex::new(None),
            find_error: Mutex::new(None),
            delete_error: Mutex::new(None),
            find_calls: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        }
    }

    /// Service that finds the given group until it is deleted.
    pub fn with_group(group: SecurityGroup) -> Self {
        let service = Self::empty();
        *service.group.lock().unwrap() = Some(group);
        service
    }

    /// Make lookups fail with the given error.
    pub fn fail_find(&self, err: Ec2Error) {
        *self.find_error.lock().unwrap() = Some(err);
    }

    /// Make deletions fail with the given error.
    pub fn fail_delete(&self, err: Ec2Error) {
        *self.delete_error.lock().unwrap() = Some(err);
    }

    /// VPC IDs passed to `find_managed_security_group`, in order.
    pub fn find_calls(&self) -> Vec<String> {
        self.find_calls.lock().unwrap().clone()
    }

    /// Groups passed to `delete_security_group`, in order.
    pub fn deleted(&self) -> Vec<SecurityGroup> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SecurityGroups for FakeSecurityGroups {
    async fn find_managed_security_group(
        &self,
        vpc_id: &str,
    ) -> Result<Option<SecurityGroup>, Ec2Error> {
        self.find_calls.lock().unwrap().push(vpc_id.to_string());
        if let Some(err) = self.find_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.group.lock().unwrap().clone())
    }

    async fn delete_security_group(&self, group: &SecurityGroup) -> Result<(), Ec2Error> {
        if let Some(err) = self.delete_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.deleted.lock().unwrap().push(group.clone());
        // Mirror the provider: once deleted, later lookups see nothing.
        *self.group.lock().unwrap() = None;
        Ok(())
    }
}
