//! EC2 client errors

use thiserror::Error;

/// Errors that can occur when interacting with the EC2 API
#[derive(Debug, Clone, Error)]
pub enum Ec2Error {
    /// EC2 API returned an error
    #[error("EC2 API error ({}): {message}", code.as_deref().unwrap_or("unknown"))]
    Api {
        /// Provider error code (e.g. "InvalidGroup.NotFound"), when present
        code: Option<String>,
        /// Provider error message
        message: String,
    },

    /// More than one security group in a VPC matched the managed-group
    /// marker; exactly one is expected, so extras are reported instead of
    /// silently picking a group to delete
    #[error("multiple security groups in {vpc_id} match the managed marker: {names:?}")]
    AmbiguousGroups {
        /// VPC the describe call was scoped to
        vpc_id: String,
        /// Names of all matching groups
        names: Vec<String>,
    },

    /// Invalid request (e.g. missing required fields)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Provider error codes that mean the group is already gone or is being
/// torn down by a concurrent cleanup. A retried delete must treat these as
/// success.
const IGNORABLE_DELETE_CODES: [&str; 3] = [
    "InvalidGroup.NotFound",
    "InvalidGroup.InUse",
    "DependencyViolation",
];

impl Ec2Error {
    /// Whether a failed `DeleteSecurityGroup` call can be treated as success.
    #[must_use]
    pub fn is_ignorable_for_delete(&self) -> bool {
        match self {
            Ec2Error::Api { code: Some(code), .. } => {
                IGNORABLE_DELETE_CODES.contains(&code.as_str())
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(code: &str) -> Ec2Error {
        Ec2Error::Api {
            code: Some(code.to_string()),
            message: "test".to_string(),
        }
    }

    #[test]
    fn already_deleted_is_ignorable() {
        assert!(api_error("InvalidGroup.NotFound").is_ignorable_for_delete());
        assert!(api_error("DependencyViolation").is_ignorable_for_delete());
        assert!(api_error("InvalidGroup.InUse").is_ignorable_for_delete());
    }

    #[test]
    fn other_codes_are_not_ignorable() {
        assert!(!api_error("UnauthorizedOperation").is_ignorable_for_delete());
        assert!(
            !Ec2Error::Api {
                code: None,
                message: "connection reset".to_string()
            }
            .is_ignorable_for_delete()
        );
        assert!(
            !Ec2Error::InvalidRequest("missing group id".to_string()).is_ignorable_for_delete()
        );
    }
}
