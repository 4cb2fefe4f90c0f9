//! Recovery state carried in `PhysicalResourceId`
//!
//! A multi-step Create records which steps have completed inside the
//! identifier it returns. If the Create fails halfway, CloudFormation rolls
//! back by issuing a Delete against that identifier, and the handler removes
//! exactly what the checkpoint lists.
//!
//! Decoding is lenient: anything that does not have the expected
//! shape decodes to `None`, meaning "nothing was created".

use crate::arn::Arn;

/// Prefix of metric filter checkpoints
pub const METRIC_FILTERS_PREFIX: &str = "custom:metric-filters";

const FIELD_SEPARATOR: char = ':';
const STEP_SEPARATOR: &str = "/";

/// One filter of the metric filter set, in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterStep {
    Memory,
    Warns,
    Errors,
}

impl FilterStep {
    /// All steps in creation order
    pub const ALL: [FilterStep; 3] = [FilterStep::Memory, FilterStep::Warns, FilterStep::Errors];

    pub fn suffix(self) -> &'static str {
        match self {
            FilterStep::Memory => "memory",
            FilterStep::Warns => "warns",
            FilterStep::Errors => "errors",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.suffix() == suffix)
    }
}

impl std::fmt::Display for FilterStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Completed metric filters for one log group.
///
/// Wire format: `custom:metric-filters:<logGroupName>:<step>/<step>/...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricFilterCheckpoint {
    log_group_name: String,
    completed: Vec<FilterStep>,
}

impl MetricFilterCheckpoint {
    pub fn new(log_group_name: impl Into<String>) -> Self {
        Self {
            log_group_name: log_group_name.into(),
            completed: Vec::new(),
        }
    }

    pub fn log_group_name(&self) -> &str {
        &self.log_group_name
    }

    pub fn completed(&self) -> &[FilterStep] {
        &self.completed
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    /// Record a step that has finished. Call only after the external call returned.
    pub fn record(&mut self, step: FilterStep) {
        self.completed.push(step);
    }

    /// `None` until at least one step has completed
    pub fn encode(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let steps: Vec<&str> = self.completed.iter().map(|s| s.suffix()).collect();
        Some(format!(
            "{}{}{}{}{}",
            METRIC_FILTERS_PREFIX,
            FIELD_SEPARATOR,
            self.log_group_name,
            FIELD_SEPARATOR,
            steps.join(STEP_SEPARATOR)
        ))
    }

    pub fn decode(physical_id: &str) -> Option<Self> {
        let rest = physical_id
            .strip_prefix(METRIC_FILTERS_PREFIX)?
            .strip_prefix(FIELD_SEPARATOR)?;

        // Log group names cannot contain ':', so exactly two fields remain
        let fields: Vec<&str> = rest.split(FIELD_SEPARATOR).collect();
        let [log_group_name, steps] = fields.as_slice() else {
            return None;
        };
        if log_group_name.is_empty() {
            return None;
        }

        let completed = steps
            .split(STEP_SEPARATOR)
            .map(FilterStep::from_suffix)
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            log_group_name: log_group_name.to_string(),
            completed,
        })
    }
}

/// Checkpoint of any resource kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checkpoint {
    /// Single-step create: the ARN of the cluster
    Cluster(Arn),
    MetricFilters(MetricFilterCheckpoint),
}

impl Checkpoint {
    /// ECS cluster name, if the ARN addresses a cluster
    pub fn cluster_name(arn: &Arn) -> Option<&str> {
        if arn.service != "ecs" {
            return None;
        }
        arn.resource
            .strip_prefix("cluster/")
            .filter(|name| !name.is_empty())
    }

    /// Decode any known checkpoint format
    pub fn decode(physical_id: &str) -> Option<Self> {
        if physical_id.starts_with(METRIC_FILTERS_PREFIX) {
            return MetricFilterCheckpoint::decode(physical_id).map(Checkpoint::MetricFilters);
        }
        let arn: Arn = physical_id.parse().ok()?;
        Self::cluster_name(&arn)?;
        Some(Checkpoint::Cluster(arn))
    }
}
