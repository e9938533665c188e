//! EC2 API client
//!
//! Implements the `Ec2Api` trait over the official AWS SDK. Converts SDK
//! shapes into the crate-owned models at this edge.

use crate::ec2_trait::Ec2Api;
use crate::error::Ec2Error;
use crate::models::{IpPermission, SecurityGroup, SecurityGroupReference};
use aws_sdk_ec2::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_ec2::types::{Filter, IpRange, Ipv6Range, UserIdGroupPair};
use tracing::debug;

/// EC2 adapter backed by `aws-sdk-ec2`.
#[derive(Debug, Clone)]
pub struct SdkEc2Api {
    client: aws_sdk_ec2::Client,
}

impl SdkEc2Api {
    /// Create a new adapter over a configured SDK client.
    #[must_use]
    pub fn new(client: aws_sdk_ec2::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Ec2Api for SdkEc2Api {
    async fn describe_security_groups(&self, vpc_id: &str) -> Result<Vec<SecurityGroup>, Ec2Error> {
        debug!("Describing security groups in {}", vpc_id);

        let mut pages = self
            .client
            .describe_security_groups()
            .filters(Filter::builder().name("vpc-id").values(vpc_id).build())
            .into_paginator()
            .items()
            .send();

        let mut groups = Vec::new();
        while let Some(item) = pages.next().await {
            groups.push(from_sdk_group(item.map_err(map_sdk_error)?));
        }
        Ok(groups)
    }

    async fn revoke_ingress(
        &self,
        group_id: &str,
        permissions: &[IpPermission],
    ) -> Result<(), Ec2Error> {
        if permissions.is_empty() {
            return Err(Ec2Error::InvalidRequest(
                "revoke called with no permissions".to_string(),
            ));
        }
        debug!(
            "Revoking {} ingress rule(s) from {}",
            permissions.len(),
            group_id
        );

        self.client
            .revoke_security_group_ingress()
            .group_id(group_id)
            .set_ip_permissions(Some(permissions.iter().map(to_sdk_permission).collect()))
            .send()
            .await
            .map_err(map_sdk_error)?;
        Ok(())
    }

    async fn delete_security_group(&self, group_id: &str) -> Result<(), Ec2Error> {
        debug!("Deleting security group {}", group_id);

        self.client
            .delete_security_group()
            .group_id(group_id)
            .send()
            .await
            .map_err(map_sdk_error)?;
        Ok(())
    }
}

/// Map an SDK error onto `Ec2Error::Api`, preserving the provider error
/// code so callers can classify ignorable delete failures.
fn map_sdk_error<E, R>(err: SdkError<E, R>) -> Ec2Error
where
    E: ProvideErrorMetadata,
    SdkError<E, R>: std::fmt::Display,
{
    let code = err
        .as_service_error()
        .and_then(ProvideErrorMetadata::code)
        .map(str::to_owned);
    let message = err
        .as_service_error()
        .and_then(ProvideErrorMetadata::message)
        .map_or_else(|| err.to_string(), str::to_owned);
    Ec2Error::Api { code, message }
}

fn from_sdk_group(group: aws_sdk_ec2::types::SecurityGroup) -> SecurityGroup {
    SecurityGroup {
        group_id: group.group_id.unwrap_or_default(),
        group_name: group.group_name.unwrap_or_default(),
        vpc_id: group.vpc_id,
        description: group.description,
        ip_permissions: group
            .ip_permissions
            .unwrap_or_default()
            .into_iter()
            .map(from_sdk_permission)
            .collect(),
    }
}

fn from_sdk_permission(permission: aws_sdk_ec2::types::IpPermission) -> IpPermission {
    IpPermission {
        ip_protocol: permission.ip_protocol,
        from_port: permission.from_port,
        to_port: permission.to_port,
        ipv4_ranges: permission
            .ip_ranges
            .unwrap_or_default()
            .into_iter()
            .filter_map(|range| range.cidr_ip)
            .collect(),
        ipv6_ranges: permission
            .ipv6_ranges
            .unwrap_or_default()
            .into_iter()
            .filter_map(|range| range.cidr_ipv6)
            .collect(),
        group_references: permission
            .user_id_group_pairs
            .unwrap_or_default()
            .into_iter()
            .map(|pair| SecurityGroupReference {
                group_id: pair.group_id,
                user_id: pair.user_id,
            })
            .collect(),
    }
}

fn to_sdk_permission(permission: &IpPermission) -> aws_sdk_ec2::types::IpPermission {
    let mut builder = aws_sdk_ec2::types::IpPermission::builder()
        .set_ip_protocol(permission.ip_protocol.clone())
        .set_from_port(permission.from_port)
        .set_to_port(permission.to_port);
    for cidr in &permission.ipv4_ranges {
        builder = builder.ip_ranges(IpRange::builder().cidr_ip(cidr).build());
    }
    for cidr in &permission.ipv6_ranges {
        builder = builder.ipv6_ranges(Ipv6Range::builder().cidr_ipv6(cidr).build());
    }
    for reference in &permission.group_references {
        builder = builder.user_id_group_pairs(
            UserIdGroupPair::builder()
                .set_group_id(reference.group_id.clone())
                .set_user_id(reference.user_id.clone())
                .build(),
        );
    }
    builder.build()
}
