//! Error types for the provisioning run.
//!
//! All fatal conditions carry the full provider error detail so the console
//! output shows the raw payload the storage service returned.

use thiserror::Error;

/// Failure to resolve a required configuration key.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required variable {key} in profile {profile}")]
    MissingKey { key: String, profile: String },

    #[error("variable {key} in profile {profile} is empty")]
    EmptyValue { key: String, profile: String },
}

/// Fatal outcome of a provisioning step.
///
/// There is no retry and no rollback. Each variant maps to exit code 1.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The bucket could neither be created nor listed. `detail` is the
    /// original create-bucket error, rendered with its full provider context.
    #[error("bucket {bucket} is neither creatable nor listable: {detail}")]
    BucketUnavailable { bucket: String, detail: String },

    /// The put-bucket-cors call was rejected.
    #[error("CORS policy rejected for bucket {bucket}: {detail}")]
    PolicyRejected { bucket: String, detail: String },

    /// The fixed CORS rule set failed builder validation.
    #[error("invalid CORS rule")]
    InvalidCorsRule(#[from] aws_sdk_s3::error::BuildError),
}
