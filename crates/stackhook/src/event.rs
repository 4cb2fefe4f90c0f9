//! Inbound custom resource events

use crate::error::{ResourceError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Untyped `ResourceProperties` as delivered by CloudFormation
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// Values returned to the stack as the resource's attributes
pub type Outputs = serde_json::Map<String, serde_json::Value>;

/// Lifecycle method requested by the control plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Create => "Create",
            RequestType::Update => "Update",
            RequestType::Delete => "Delete",
        }
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestType {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Create" => Ok(RequestType::Create),
            "Update" => Ok(RequestType::Update),
            "Delete" => Ok(RequestType::Delete),
            other => Err(ResourceError::UnknownRequestType(other.to_string())),
        }
    }
}

/// A single custom resource request.
///
/// Field names follow the CloudFormation wire format. `RequestType` is kept
/// as the raw string so that an unsupported value is reported by the
/// reconciler instead of failing deserialization of the whole event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Event {
    pub request_type: String,

    pub resource_type: String,

    #[serde(default)]
    pub resource_properties: Properties,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_resource_properties: Option<Properties>,

    /// Empty on Create
    #[serde(default, rename = "PhysicalResourceId")]
    pub physical_resource_id: String,

    #[serde(default)]
    pub request_id: String,

    #[serde(default)]
    pub stack_id: String,

    #[serde(default)]
    pub logical_resource_id: String,

    #[serde(default, rename = "ResponseURL")]
    pub response_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_token: Option<String>,
}

impl Event {
    pub fn new(resource_type: impl Into<String>, request_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            request_type: request_type.into(),
            ..Default::default()
        }
    }

    /// Set `ResourceProperties` from a JSON object. Non-object values are ignored.
    pub fn with_properties(mut self, properties: serde_json::Value) -> Self {
        if let serde_json::Value::Object(map) = properties {
            self.resource_properties = map;
        }
        self
    }

    pub fn with_physical_resource_id(mut self, id: impl Into<String>) -> Self {
        self.physical_resource_id = id.into();
        self
    }

    pub fn with_logical_resource_id(mut self, id: impl Into<String>) -> Self {
        self.logical_resource_id = id.into();
        self
    }

    /// Parse the request type
    pub fn request_type(&self) -> Result<RequestType> {
        self.request_type.parse()
    }
}
