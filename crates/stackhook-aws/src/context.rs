//! Shared AWS configuration context
//!
//! The SDK configuration is loaded once per process and every service client
//! is created from it. Clients are cheap to clone and shared read-only
//! between invocations.

use crate::sdk::{EcsClient, LogsClient, SqsClient};
use aws_config::{BehaviorVersion, Region, SdkConfig};
use stackhook::Arn;
use std::sync::Arc;

pub const DEFAULT_PARTITION: &str = "aws";

/// Partition, region and account the handlers operate in.
///
/// Needed to rebuild ARNs that the create APIs do not return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub partition: String,
    pub region: String,
    pub account_id: String,
}

impl Location {
    pub fn new(region: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            partition: DEFAULT_PARTITION.to_string(),
            region: region.into(),
            account_id: account_id.into(),
        }
    }

    pub fn with_partition(mut self, partition: impl Into<String>) -> Self {
        self.partition = partition.into();
        self
    }

    /// ARN of a resource of `service` in this location
    pub fn arn(&self, service: &str, resource: impl Into<String>) -> Arn {
        Arn::new(
            &self.partition,
            service,
            &self.region,
            &self.account_id,
            resource,
        )
    }
}

/// Shared AWS configuration context for creating service clients.
#[derive(Clone)]
pub struct AwsContext {
    config: Arc<SdkConfig>,
    location: Location,
}

impl AwsContext {
    /// Load credentials and SDK settings for `location.region` from the
    /// environment, config files, or the execution role.
    pub async fn load(location: Location) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(location.region.clone()))
            .load()
            .await;

        Self::from_sdk_config(config, location)
    }

    pub fn from_sdk_config(config: SdkConfig, location: Location) -> Self {
        Self {
            config: Arc::new(config),
            location,
        }
    }

    pub fn sdk_config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn ecs_client(&self) -> EcsClient {
        EcsClient::new(aws_sdk_ecs::Client::new(self.sdk_config()))
    }

    pub fn logs_client(&self) -> LogsClient {
        LogsClient::new(aws_sdk_cloudwatchlogs::Client::new(self.sdk_config()))
    }

    pub fn sqs_client(&self) -> SqsClient {
        SqsClient::new(aws_sdk_sqs::Client::new(self.sdk_config()))
    }
}

impl std::fmt::Debug for AwsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsContext")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}
