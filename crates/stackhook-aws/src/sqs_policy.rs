//! SQS queue access policy
//!
//! Whole-document read and replace of a queue's `Policy` attribute. Callers
//! merge or remove their own statements in between; statements written by
//! other actors pass through untouched.

use crate::api::SqsApi;
use crate::error::AwsError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Queue attribute holding the policy document
pub const POLICY_ATTRIBUTE: &str = "Policy";

/// Version of a freshly created policy document
pub const POLICY_VERSION: &str = "2008-10-17";

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("failed to get queue attributes: {0}")]
    GetAttributes(#[source] AwsError),

    #[error("failed to set queue attributes: {0}")]
    SetAttributes(#[source] AwsError),

    #[error("failed to unmarshal queue policy: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("failed to serialize queue policy: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PolicyError>;

/// Policy document of an SQS queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuePolicy {
    #[serde(rename = "Version")]
    pub version: String,

    #[serde(rename = "Statement", default)]
    pub statements: Vec<PolicyStatement>,
}

impl Default for QueuePolicy {
    fn default() -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            statements: Vec::new(),
        }
    }
}

/// One statement of a queue policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyStatement {
    #[serde(rename = "Sid")]
    pub sid: String,

    #[serde(rename = "Effect")]
    pub effect: String,

    #[serde(rename = "Principal")]
    pub principal: BTreeMap<String, String>,

    #[serde(rename = "Action")]
    pub action: String,

    #[serde(rename = "Resource")]
    pub resource: String,

    /// Arbitrary condition block, `null` when absent
    #[serde(rename = "Condition", default)]
    pub condition: serde_json::Value,
}

/// Reads and writes the policy of SQS queues
#[derive(Clone)]
pub struct QueuePolicyAccessor {
    sqs: Arc<dyn SqsApi>,
}

impl QueuePolicyAccessor {
    pub fn new(sqs: Arc<dyn SqsApi>) -> Self {
        Self { sqs }
    }

    /// Current policy. A queue without a policy yields an empty document.
    pub async fn get_policy(&self, queue_url: &str) -> Result<QueuePolicy> {
        let attribute = self
            .sqs
            .get_queue_attribute(queue_url, POLICY_ATTRIBUTE)
            .await
            .map_err(PolicyError::GetAttributes)?;

        match attribute.as_deref() {
            None | Some("") => Ok(QueuePolicy::default()),
            Some(raw) => serde_json::from_str(raw).map_err(PolicyError::Parse),
        }
    }

    /// Replace the whole policy. An empty statement list clears the attribute.
    pub async fn set_policy(&self, queue_url: &str, policy: &QueuePolicy) -> Result<()> {
        let value = if policy.statements.is_empty() {
            String::new()
        } else {
            serde_json::to_string(policy).map_err(|e| {
                tracing::error!("failed to serialize policy: {}", e);
                PolicyError::Serialize(e)
            })?
        };

        tracing::debug!(queue_url, cleared = value.is_empty(), "setting queue policy");
        self.sqs
            .set_queue_attribute(queue_url, POLICY_ATTRIBUTE, &value)
            .await
            .map_err(PolicyError::SetAttributes)
    }
}

impl std::fmt::Debug for QueuePolicyAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuePolicyAccessor").finish_non_exhaustive()
    }
}
