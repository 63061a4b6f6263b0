//! Bucket provisioning operations.
//!
//! Two sequential remote calls make up a provisioning run: an idempotent
//! create-bucket, then a full overwrite of the bucket CORS configuration so
//! browser clients can upload through presigned URLs. There is no retry; any
//! unrecovered failure is fatal to the run.

use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::{CorsConfiguration, CorsRule};
use tracing::{info, warn};

use crate::config::R2Config;
use crate::error::ProvisionError;

/// Methods the fixed CORS policy allows.
const CORS_ALLOWED_METHODS: [&str; 3] = ["DELETE", "POST", "PUT"];

/// Outcome of [`ensure_bucket`] for one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketStatus {
    /// The bucket was newly created.
    Created,
    /// The bucket already exists and is owned by the caller.
    AlreadyOwned,
    /// The bucket exists but the credentials only carry object read/write
    /// rights, so bucket-level settings cannot be changed.
    ObjectAccessOnly,
}

impl BucketStatus {
    /// Whether the caller may change bucket-level settings such as CORS.
    pub fn can_manage(self) -> bool {
        !matches!(self, Self::ObjectAccessOnly)
    }
}

/// Creates the bucket if it does not exist yet.
///
/// An ownership conflict from the service means the bucket is already
/// provisioned and is not an error. On any other create failure, a
/// list-objects call probes whether the credentials at least hold object
/// read/write rights; R2 has no dedicated permission-check API, so this read
/// probe is the closest approximation available.
///
/// # Errors
///
/// Returns [`ProvisionError::BucketUnavailable`] with the original
/// create-bucket error when the probe fails as well.
pub async fn ensure_bucket(client: &Client, bucket: &str) -> Result<BucketStatus, ProvisionError> {
    info!(bucket, "creating bucket");

    let err = match client.create_bucket().bucket(bucket).send().await {
        Ok(output) => {
            info!(
                bucket,
                location = output.location().unwrap_or_default(),
                "bucket created"
            );
            return Ok(BucketStatus::Created);
        }
        Err(err) => err,
    };

    if err
        .as_service_error()
        .is_some_and(|e| e.is_bucket_already_owned_by_you())
    {
        info!(bucket, "bucket already exists");
        return Ok(BucketStatus::AlreadyOwned);
    }

    // Probe for object-level access. The probe's own error detail is
    // deliberately dropped; the create-bucket error is what gets reported.
    match client
        .list_objects_v2()
        .bucket(bucket)
        .max_keys(1)
        .send()
        .await
    {
        Ok(_) => {
            warn!(
                bucket,
                "bucket exists, but only object read/write permissions detected"
            );
            Ok(BucketStatus::ObjectAccessOnly)
        }
        Err(_) => Err(ProvisionError::BucketUnavailable {
            bucket: bucket.to_string(),
            detail: DisplayErrorContext(err).to_string(),
        }),
    }
}

/// Replaces the bucket CORS configuration with the fixed upload policy.
///
/// The policy is a single rule allowing DELETE, POST and PUT from any origin
/// with any header. Pre-existing rules are overwritten, not merged.
///
/// # Errors
///
/// Returns [`ProvisionError::PolicyRejected`] when the service refuses the
/// call, with the full provider error detail.
pub async fn apply_cors_policy(client: &Client, bucket: &str) -> Result<(), ProvisionError> {
    info!(bucket, "setting up CORS rules");

    let rule = CorsRule::builder()
        .set_allowed_methods(Some(
            CORS_ALLOWED_METHODS.iter().map(|m| m.to_string()).collect(),
        ))
        .allowed_origins("*")
        .allowed_headers("*")
        .build()?;
    let cors_configuration = CorsConfiguration::builder().cors_rules(rule).build()?;

    client
        .put_bucket_cors()
        .bucket(bucket)
        .cors_configuration(cors_configuration)
        .send()
        .await
        .map_err(|err| ProvisionError::PolicyRejected {
            bucket: bucket.to_string(),
            detail: DisplayErrorContext(err).to_string(),
        })?;

    info!(
        bucket,
        methods = ?CORS_ALLOWED_METHODS,
        origins = "*",
        headers = "*",
        "CORS rules applied"
    );
    Ok(())
}

/// Provisions the configured public bucket end to end.
///
/// Runs [`ensure_bucket`] for the bucket named in the configuration, then
/// applies the CORS policy unless only object-level permissions were
/// detected, in which case the policy call would fail with an authorization
/// error and is skipped.
pub async fn setup_public_bucket(
    client: &Client,
    config: &R2Config,
) -> Result<BucketStatus, ProvisionError> {
    let bucket = config.public_bucket.as_str();

    let status = ensure_bucket(client, bucket).await?;
    if status.can_manage() {
        apply_cors_policy(client, bucket).await?;
    } else {
        warn!(bucket, "skipping CORS setup, bucket settings are not manageable");
    }
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_access_only_is_not_manageable() {
        assert!(BucketStatus::Created.can_manage());
        assert!(BucketStatus::AlreadyOwned.can_manage());
        assert!(!BucketStatus::ObjectAccessOnly.can_manage());
    }
}
