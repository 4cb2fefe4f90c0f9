//! `Custom::LambdaMetricFilters` handler
//!
//! Adds three metric filters to a Lambda function's log group: peak memory
//! usage, logged warnings and logged errors. The warning/error patterns
//! depend on the runtime's log format.

use crate::api::{LogsApi, MetricFilterSpec};
use async_trait::async_trait;
use serde::Deserialize;
use stackhook::{
    Failure, FilterStep, MetricFilterCheckpoint, Reconciled, ResourceError, ResourceHandler,
    ResourceProperties, Response,
};
use std::sync::Arc;

pub const RESOURCE_TYPE: &str = "Custom::LambdaMetricFilters";

/// Namespace of every metric published by the filters
pub const METRIC_NAMESPACE: &str = "Panther";

const MEMORY_FILTER: &str =
    r#"[ report_label="REPORT", ..., label="Used:", max_memory_used_value, unit="MB" ]"#;
const WARN_FILTER_GO: &str = r#"{ $.level = "warn" }"#;
const WARN_FILTER_PYTHON: &str = r#"[ level="[WARN]" ]"#;
const ERROR_FILTER_GO: &str = r#"{ $.level = "error" }"#;
const ERROR_FILTER_PYTHON: &str = r#"[ level="[ERROR]" ]"#;

/// Log line grammar of the function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LambdaRuntime {
    /// Structured JSON logs
    Go,
    /// `[LEVEL]`-prefixed text logs
    Python,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LambdaMetricFiltersProperties {
    pub lambda_runtime: LambdaRuntime,
    pub log_group_name: String,
}

impl ResourceProperties for LambdaMetricFiltersProperties {
    fn validate(&self) -> Result<(), String> {
        if self.log_group_name.is_empty() {
            return Err("LogGroupName must not be empty".to_string());
        }
        if self.log_group_name.contains(':') {
            return Err(format!(
                "LogGroupName {:?} must not contain ':'",
                self.log_group_name
            ));
        }
        Ok(())
    }
}

/// Function name used as the filter/metric name prefix.
///
/// "/aws/lambda/panther-alert-delivery" => "panther-alert-delivery"
pub fn lambda_name_from_log_group(log_group_name: &str) -> &str {
    log_group_name.rsplit('/').next().unwrap_or(log_group_name)
}

/// Filter and metric name for one step
pub fn filter_name(log_group_name: &str, step: FilterStep) -> String {
    format!("{}-{}", lambda_name_from_log_group(log_group_name), step)
}

fn filter_pattern(step: FilterStep, runtime: LambdaRuntime) -> &'static str {
    match (step, runtime) {
        (FilterStep::Memory, _) => MEMORY_FILTER,
        (FilterStep::Warns, LambdaRuntime::Go) => WARN_FILTER_GO,
        (FilterStep::Warns, LambdaRuntime::Python) => WARN_FILTER_PYTHON,
        (FilterStep::Errors, LambdaRuntime::Go) => ERROR_FILTER_GO,
        (FilterStep::Errors, LambdaRuntime::Python) => ERROR_FILTER_PYTHON,
    }
}

fn metric_value(step: FilterStep) -> &'static str {
    match step {
        FilterStep::Memory => "$max_memory_used_value",
        FilterStep::Warns | FilterStep::Errors => "1",
    }
}

/// Full filter definition for one step
pub fn filter_spec(
    log_group_name: &str,
    step: FilterStep,
    runtime: LambdaRuntime,
) -> MetricFilterSpec {
    let name = filter_name(log_group_name, step);
    MetricFilterSpec {
        log_group_name: log_group_name.to_string(),
        filter_name: name.clone(),
        filter_pattern: filter_pattern(step, runtime).to_string(),
        metric_name: name,
        metric_namespace: METRIC_NAMESPACE.to_string(),
        metric_value: metric_value(step).to_string(),
        default_value: 0.0,
    }
}

/// Creates and deletes the metric filter set of one log group.
///
/// Create is not atomic: each finished filter is recorded in the returned
/// [`MetricFilterCheckpoint`] so a rollback Delete removes exactly those.
pub struct LambdaMetricFiltersHandler {
    logs: Arc<dyn LogsApi>,
}

impl LambdaMetricFiltersHandler {
    pub fn new(logs: Arc<dyn LogsApi>) -> Self {
        Self { logs }
    }
}

#[async_trait]
impl ResourceHandler for LambdaMetricFiltersHandler {
    type Properties = LambdaMetricFiltersProperties;

    fn resource_type(&self) -> &str {
        RESOURCE_TYPE
    }

    async fn create(&self, properties: LambdaMetricFiltersProperties) -> Reconciled {
        let mut checkpoint = MetricFilterCheckpoint::new(&properties.log_group_name);

        for step in FilterStep::ALL {
            let spec = filter_spec(&properties.log_group_name, step, properties.lambda_runtime);
            tracing::info!(metric_name = %spec.metric_name, "creating metric filter");

            if let Err(e) = self.logs.put_metric_filter(&spec).await {
                // No rollback here: the Delete that follows a failed Create cleans up
                return Err(Failure::with_checkpoint(
                    checkpoint.encode().unwrap_or_default(),
                    ResourceError::create_failed(RESOURCE_TYPE, spec.filter_name, e),
                ));
            }
            checkpoint.record(step);
        }

        Ok(Response::new(checkpoint.encode().unwrap_or_default()))
    }

    async fn update(
        &self,
        physical_resource_id: &str,
        _: LambdaMetricFiltersProperties,
    ) -> Reconciled {
        tracing::info!("metric filter update is a no-op: {}", physical_resource_id);
        Ok(Response::new(physical_resource_id))
    }

    async fn delete(&self, physical_resource_id: &str) -> Reconciled {
        let Some(checkpoint) = MetricFilterCheckpoint::decode(physical_resource_id) else {
            // Create failed before any filter was created
            tracing::warn!(
                "Not a metric filter checkpoint, skipping delete: {:?}",
                physical_resource_id
            );
            return Ok(Response::new(physical_resource_id));
        };

        let log_group_name = checkpoint.log_group_name();
        for &step in checkpoint.completed() {
            let name = filter_name(log_group_name, step);
            tracing::info!(name = %name, "deleting metric filter");

            match self.logs.delete_metric_filter(log_group_name, &name).await {
                Ok(()) => {}
                Err(e) if e.is_not_found() => {
                    tracing::info!(name = %name, "metric filter has already been deleted");
                }
                Err(e) => {
                    return Err(Failure::with_checkpoint(
                        physical_resource_id,
                        ResourceError::delete_failed(
                            RESOURCE_TYPE,
                            format!("{} {}", log_group_name, name),
                            e,
                        ),
                    ));
                }
            }
        }

        Ok(Response::new(physical_resource_id))
    }
}
