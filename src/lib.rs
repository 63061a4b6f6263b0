//! R2 bucket provisioning library
//!
//! This crate provisions a Cloudflare R2 public bucket through the
//! S3-compatible API so browser clients can upload files with presigned
//! URLs. A run performs two sequential remote calls:
//! - create the bucket (idempotent, ownership conflicts are fine)
//! - overwrite its CORS configuration with a fixed upload policy
//!
//! The CORS step is skipped when the credentials only carry object
//! read/write rights, since bucket-level settings would be rejected.

pub mod config;
pub mod error;
pub mod s3;

use crate::config::{R2Config, VarsReader};
use crate::error::ProvisionError;
use crate::s3::BucketStatus;

/// Runs a full provisioning pass for the configured public bucket.
///
/// Resolves the deployment profile, builds the R2 client and provisions the
/// bucket named by `R2_PUBLIC_BUCKET`.
///
/// # Errors
///
/// Any configuration or storage-API failure is returned unrecovered; the
/// caller decides the process exit code.
pub async fn run() -> Result<BucketStatus, ProvisionError> {
    let vars = VarsReader::from_env();
    tracing::info!(profile = vars.profile(), "loading deployment configuration");

    let config = R2Config::load(&vars)?;
    let client = s3::create_r2_client(&config).await;

    s3::setup_public_bucket(&client, &config).await
}
