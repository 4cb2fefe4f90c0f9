//! AWS custom resources for Stackhook
//!
//! This crate implements [`stackhook::ResourceHandler`] for resources that
//! CloudFormation cannot express natively.
//!
//! # Resources
//!
//! - **`Custom::ECS-Cluster`**: ECS cluster tagged `Application=Panther`
//! - **`Custom::LambdaMetricFilters`**: memory/warning/error metric filters on a Lambda log group
//!
//! The [`sqs_policy`] module is a supporting library for handlers that need to
//! grant or revoke cross-account access on a queue.
//!
//! # Example
//!
//! ```ignore
//! use stackhook::{Event, Reconciler};
//! use stackhook_aws::{AwsContext, Location, default_registry};
//!
//! let aws = AwsContext::load(Location::new("us-east-1", "123456789012")).await;
//! let reconciler = Reconciler::new(default_registry(&aws));
//!
//! let outcome = reconciler.handle(&event).await;
//! ```

pub mod api;
pub mod context;
pub mod ecs_cluster;
pub mod error;
pub mod metric_filters;
pub mod sdk;
pub mod sqs_policy;

pub use api::{EcsApi, LogsApi, MetricFilterSpec, ResourceTag, SqsApi};
pub use context::{AwsContext, Location};
pub use ecs_cluster::{EcsClusterHandler, EcsClusterProperties};
pub use error::{AwsError, Result};
pub use metric_filters::{LambdaMetricFiltersHandler, LambdaMetricFiltersProperties, LambdaRuntime};
pub use sdk::{EcsClient, LogsClient, SqsClient};
pub use sqs_policy::{PolicyError, PolicyStatement, QueuePolicy, QueuePolicyAccessor};

use stackhook::HandlerRegistry;
use std::sync::Arc;

/// Registry with every handler of this crate
pub fn registry(
    ecs: Arc<dyn EcsApi>,
    logs: Arc<dyn LogsApi>,
    location: Location,
) -> HandlerRegistry {
    HandlerRegistry::new()
        .with(EcsClusterHandler::new(ecs, location))
        .with(LambdaMetricFiltersHandler::new(logs))
}

/// Registry backed by the SDK clients of `aws`
pub fn default_registry(aws: &AwsContext) -> HandlerRegistry {
    registry(
        Arc::new(aws.ecs_client()),
        Arc::new(aws.logs_client()),
        aws.location().clone(),
    )
}
