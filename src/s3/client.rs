//! S3 client construction.
//!
//! R2 speaks the S3 API, so the client is a standard `aws_sdk_s3::Client`
//! pointed at the account endpoint with the region pinned to `auto`.

use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;

use crate::config::R2Config;

/// Region name R2 expects for every request.
const R2_REGION: &str = "auto";

/// Builds the S3 client bound to the configured account and credentials.
///
/// One client is created per process and used strictly sequentially.
pub async fn create_r2_client(config: &R2Config) -> Client {
    let credentials = Credentials::new(
        config.access_key_id.clone(),
        config.secret_access_key.clone(),
        None,
        None,
        "r2-provision",
    );

    let region_provider = RegionProviderChain::first_try(Some(Region::new(R2_REGION)));

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .credentials_provider(credentials)
        .region(region_provider)
        .endpoint_url(config.endpoint_url())
        .load()
        .await;

    Client::new(&sdk_config)
}
