//! S3 module
//!
//! This module owns the interaction with the R2 storage service: client
//! construction and the bucket provisioning operations.

pub mod client;
pub mod provision;

pub use client::create_r2_client;
pub use provision::{BucketStatus, apply_cors_policy, ensure_bucket, setup_public_bucket};
