//! EC2 Security Group Client
//!
//! Adapter over the AWS EC2 API used by the garbage collector to locate and
//! remove the security group an NGINX ingress controller leaves behind in a
//! cluster VPC.
//!
//! # Example
//!
//! ```no_run
//! use ec2_client::{SdkEc2Api, SecurityGroupService, SecurityGroups};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = aws_sdk_ec2::Config::builder().build();
//! let service = SecurityGroupService::new(SdkEc2Api::new(aws_sdk_ec2::Client::from_conf(config)));
//!
//! if let Some(group) = service.find_managed_security_group("vpc-0123456789abcdef0").await? {
//!     service.delete_security_group(&group).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The raw provider calls sit behind the [`Ec2Api`] trait so that the
//! two-phase delete protocol (revoke ingress rules, then delete the group)
//! can be tested without AWS credentials.

pub mod client;
pub mod error;
pub mod models;
pub mod service;
#[path = "trait.rs"]
pub mod ec2_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::SdkEc2Api;
pub use ec2_trait::Ec2Api;
pub use error::Ec2Error;
pub use models::*;
pub use service::{MANAGED_GROUP_MARKER, SecurityGroupService, SecurityGroups};
#[cfg(any(test, feature = "test-util"))]
pub use mock::{Ec2Call, MockEc2Api};
