//! Cluster API resource definitions.
//!
//! Rust mirrors of the Cluster API CRDs the garbage collector watches and
//! reads. The authoritative CRDs are installed by Cluster API itself; these
//! types only model the fields this controller consumes.

pub mod aws_cluster;
pub mod cluster;

pub use aws_cluster::*;
pub use cluster::*;
