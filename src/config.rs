//! Deployment configuration module.
//!
//! This module loads the per-environment variables the provisioner needs.
//! The active profile is selected by `DEPLOYMENT_ENVIRONMENT` (default:
//! `production`). Values come from the process environment, overlaid with an
//! optional `.env.<profile>` file so each deployment environment can carry
//! its own credentials.

use std::collections::HashMap;
use std::env;

use crate::error::ConfigError;

/// Environment variable that selects the active configuration profile.
pub const PROFILE_VAR: &str = "DEPLOYMENT_ENVIRONMENT";

/// Profile used when `DEPLOYMENT_ENVIRONMENT` is not set.
pub const DEFAULT_PROFILE: &str = "production";

/// Immutable snapshot of the variables for one deployment profile.
///
/// The snapshot is taken once at process start and never mutated afterwards.
pub struct VarsReader {
    profile: String,
    vars: HashMap<String, String>,
}

impl VarsReader {
    /// Builds a reader for the profile named by `DEPLOYMENT_ENVIRONMENT`.
    ///
    /// The process environment is read first, then entries from
    /// `.env.<profile>` override it when that file exists. A missing profile
    /// file is not an error.
    pub fn from_env() -> Self {
        let profile = env::var(PROFILE_VAR).unwrap_or_else(|_| DEFAULT_PROFILE.to_string());

        let mut vars: HashMap<String, String> = env::vars().collect();
        if let Ok(entries) = dotenvy::from_filename_iter(format!(".env.{profile}")) {
            for (key, value) in entries.flatten() {
                vars.insert(key, value);
            }
        }

        Self { profile, vars }
    }

    /// Name of the active profile.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Looks up a required key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] when the key is absent and
    /// [`ConfigError::EmptyValue`] when it is present but blank.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = self.vars.get(key).ok_or_else(|| ConfigError::MissingKey {
            key: key.to_string(),
            profile: self.profile.clone(),
        })?;
        if value.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                key: key.to_string(),
                profile: self.profile.clone(),
            });
        }
        Ok(value.clone())
    }

    #[cfg(test)]
    fn from_vars<I>(profile: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, &'static str)>,
    {
        Self {
            profile: profile.to_string(),
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Settings required to reach the R2 account and its public bucket.
#[derive(Debug, Clone)]
pub struct R2Config {
    pub account_id: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub public_bucket: String,
}

impl R2Config {
    /// Resolves all required keys from a [`VarsReader`].
    ///
    /// Fails fast, before any network call, when a key is missing or empty.
    pub fn load(vars: &VarsReader) -> Result<Self, ConfigError> {
        Ok(Self {
            account_id: vars.get("CLOUDFLARE_ACCOUNT_ID")?,
            access_key_id: vars.get("R2_ACCESS_KEY_ID")?,
            secret_access_key: vars.get("R2_SECRET_ACCESS_KEY")?,
            public_bucket: vars.get("R2_PUBLIC_BUCKET")?,
        })
    }

    /// S3-compatible endpoint for this account.
    pub fn endpoint_url(&self) -> String {
        format!("https://{}.r2.cloudflarestorage.com", self.account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_vars() -> VarsReader {
        VarsReader::from_vars(
            "staging",
            [
                ("CLOUDFLARE_ACCOUNT_ID", "acct-123"),
                ("R2_ACCESS_KEY_ID", "key-id"),
                ("R2_SECRET_ACCESS_KEY", "key-secret"),
                ("R2_PUBLIC_BUCKET", "media-public"),
            ],
        )
    }

    #[test]
    fn loads_all_required_keys() {
        let config = R2Config::load(&full_vars()).unwrap();
        assert_eq!(config.account_id, "acct-123");
        assert_eq!(config.public_bucket, "media-public");
    }

    #[test]
    fn endpoint_is_derived_from_account_id() {
        let config = R2Config::load(&full_vars()).unwrap();
        assert_eq!(
            config.endpoint_url(),
            "https://acct-123.r2.cloudflarestorage.com"
        );
    }

    #[test]
    fn missing_key_names_key_and_profile() {
        let vars = VarsReader::from_vars("staging", [("CLOUDFLARE_ACCOUNT_ID", "acct-123")]);
        let err = R2Config::load(&vars).unwrap_err();
        match err {
            ConfigError::MissingKey { ref key, ref profile } => {
                assert_eq!(key, "R2_ACCESS_KEY_ID");
                assert_eq!(profile, "staging");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_bucket_name_is_rejected() {
        let vars = VarsReader::from_vars(
            "staging",
            [
                ("CLOUDFLARE_ACCOUNT_ID", "acct-123"),
                ("R2_ACCESS_KEY_ID", "key-id"),
                ("R2_SECRET_ACCESS_KEY", "key-secret"),
                ("R2_PUBLIC_BUCKET", "  "),
            ],
        );
        let err = R2Config::load(&vars).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyValue { ref key, .. } if key == "R2_PUBLIC_BUCKET"));
    }

    #[test]
    fn default_profile_is_production() {
        assert_eq!(DEFAULT_PROFILE, "production");
    }
}
