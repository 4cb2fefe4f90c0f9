//! Service API implementations backed by the AWS SDK

use crate::api::{EcsApi, LogsApi, MetricFilterSpec, ResourceTag, SqsApi};
use crate::error::{AwsError, Result, classify_sdk_error};
use async_trait::async_trait;
use aws_sdk_cloudwatchlogs::types::MetricTransformation;
use aws_sdk_ecs::types::Tag;
use aws_sdk_sqs::types::QueueAttributeName;

/// ECS client
#[derive(Debug, Clone)]
pub struct EcsClient {
    client: aws_sdk_ecs::Client,
}

impl EcsClient {
    pub fn new(client: aws_sdk_ecs::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EcsApi for EcsClient {
    async fn create_cluster(&self, name: &str, tags: &[ResourceTag]) -> Result<()> {
        let tags: Vec<Tag> = tags
            .iter()
            .map(|t| Tag::builder().key(&t.key).value(&t.value).build())
            .collect();

        self.client
            .create_cluster()
            .cluster_name(name)
            .set_tags(Some(tags))
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;
        Ok(())
    }

    async fn delete_cluster(&self, name: &str) -> Result<()> {
        self.client
            .delete_cluster()
            .cluster(name)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;
        Ok(())
    }
}

/// CloudWatch Logs client
#[derive(Debug, Clone)]
pub struct LogsClient {
    client: aws_sdk_cloudwatchlogs::Client,
}

impl LogsClient {
    pub fn new(client: aws_sdk_cloudwatchlogs::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LogsApi for LogsClient {
    async fn put_metric_filter(&self, filter: &MetricFilterSpec) -> Result<()> {
        let transformation = MetricTransformation::builder()
            .metric_name(&filter.metric_name)
            .metric_namespace(&filter.metric_namespace)
            .metric_value(&filter.metric_value)
            .default_value(filter.default_value)
            .build()
            .map_err(|e| AwsError::Sdk {
                code: None,
                message: e.to_string(),
            })?;

        self.client
            .put_metric_filter()
            .log_group_name(&filter.log_group_name)
            .filter_name(&filter.filter_name)
            .filter_pattern(&filter.filter_pattern)
            .metric_transformations(transformation)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;
        Ok(())
    }

    async fn delete_metric_filter(&self, log_group_name: &str, filter_name: &str) -> Result<()> {
        self.client
            .delete_metric_filter()
            .log_group_name(log_group_name)
            .filter_name(filter_name)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;
        Ok(())
    }
}

/// SQS client
#[derive(Debug, Clone)]
pub struct SqsClient {
    client: aws_sdk_sqs::Client,
}

impl SqsClient {
    pub fn new(client: aws_sdk_sqs::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SqsApi for SqsClient {
    async fn get_queue_attribute(
        &self,
        queue_url: &str,
        attribute: &str,
    ) -> Result<Option<String>> {
        let name = QueueAttributeName::from(attribute);
        let output = self
            .client
            .get_queue_attributes()
            .queue_url(queue_url)
            .attribute_names(name.clone())
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;

        Ok(output
            .attributes()
            .and_then(|attributes| attributes.get(&name))
            .cloned())
    }

    async fn set_queue_attribute(
        &self,
        queue_url: &str,
        attribute: &str,
        value: &str,
    ) -> Result<()> {
        self.client
            .set_queue_attributes()
            .queue_url(queue_url)
            .attributes(QueueAttributeName::from(attribute), value)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;
        Ok(())
    }
}
