//! Lifecycle results and the CloudFormation response document

use crate::error::Failure;
use crate::event::{Event, Outputs};
use serde::{Deserialize, Serialize};

/// Identifier reported when a failed request produced no identifier of its own.
///
/// It never decodes as a checkpoint, so the Delete that follows a failed
/// Create is a no-op.
pub const FAILED_PHYSICAL_ID: &str = "error";

/// Successful lifecycle call
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Non-empty, stable identifier of the managed resource
    pub physical_resource_id: String,

    /// Attributes exposed to the stack
    pub outputs: Outputs,
}

impl Response {
    pub fn new(physical_resource_id: impl Into<String>) -> Self {
        Self {
            physical_resource_id: physical_resource_id.into(),
            outputs: Outputs::new(),
        }
    }

    pub fn with_output(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.outputs.insert(key.into(), value);
        self
    }
}

/// Outcome of one reconciled event
pub type Reconciled = std::result::Result<Response, Failure>;

/// Response status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Success,
    Failed,
}

/// Document the control plane expects back for an event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnResponse {
    pub status: Status,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(rename = "PhysicalResourceId")]
    pub physical_resource_id: String,

    pub stack_id: String,

    pub request_id: String,

    pub logical_resource_id: String,

    #[serde(default, skip_serializing_if = "Outputs::is_empty")]
    pub data: Outputs,
}

impl CfnResponse {
    pub fn from_outcome(event: &Event, outcome: &Reconciled) -> Self {
        let (status, reason, physical_resource_id, data) = match outcome {
            Ok(response) => (
                Status::Success,
                None,
                response.physical_resource_id.clone(),
                response.outputs.clone(),
            ),
            Err(failure) => {
                let id = if failure.has_checkpoint() {
                    failure.physical_resource_id.clone()
                } else if !event.physical_resource_id.is_empty() {
                    event.physical_resource_id.clone()
                } else {
                    FAILED_PHYSICAL_ID.to_string()
                };
                (
                    Status::Failed,
                    Some(failure.to_string()),
                    id,
                    Outputs::new(),
                )
            }
        };

        Self {
            status,
            reason,
            physical_resource_id,
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            data,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}
