//! Service API seams
//!
//! Handlers talk to AWS through these traits. `sdk` implements them on the
//! real SDK clients; tests implement them with in-memory fakes.

use crate::error::Result;
use async_trait::async_trait;

/// Key/value tag attached to a created resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTag {
    pub key: String,
    pub value: String,
}

impl ResourceTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A CloudWatch Logs metric filter with a single metric transformation
#[derive(Debug, Clone, PartialEq)]
pub struct MetricFilterSpec {
    pub log_group_name: String,
    pub filter_name: String,
    pub filter_pattern: String,
    pub metric_name: String,
    pub metric_namespace: String,
    pub metric_value: String,
    pub default_value: f64,
}

/// ECS cluster operations
#[async_trait]
pub trait EcsApi: Send + Sync {
    async fn create_cluster(&self, name: &str, tags: &[ResourceTag]) -> Result<()>;

    async fn delete_cluster(&self, name: &str) -> Result<()>;
}

/// CloudWatch Logs metric filter operations
#[async_trait]
pub trait LogsApi: Send + Sync {
    async fn put_metric_filter(&self, filter: &MetricFilterSpec) -> Result<()>;

    /// Reports `AwsError::NotFound` when the filter does not exist
    async fn delete_metric_filter(&self, log_group_name: &str, filter_name: &str) -> Result<()>;
}

/// SQS queue attribute operations
#[async_trait]
pub trait SqsApi: Send + Sync {
    /// `None` when the attribute is not set
    async fn get_queue_attribute(&self, queue_url: &str, attribute: &str) -> Result<Option<String>>;

    async fn set_queue_attribute(&self, queue_url: &str, attribute: &str, value: &str)
    -> Result<()>;
}
