//! Resource handler trait definition

use crate::error::{Failure, ResourceError};
use crate::event::{Event, Properties, RequestType};
use crate::response::{FAILED_PHYSICAL_ID, Reconciled, Response};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Typed `ResourceProperties` of one resource type
pub trait ResourceProperties: DeserializeOwned + Send + Sync {
    /// Checks that serde cannot express (non-empty strings, ranges, ...)
    fn validate(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

/// Lifecycle of one custom resource type.
///
/// Handlers never retry. Any external failure is returned right away and the
/// control plane decides whether to try again.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    type Properties: ResourceProperties;

    /// CloudFormation resource type this handler is registered under (e.g., "Custom::ECS-Cluster")
    fn resource_type(&self) -> &str;

    async fn create(&self, properties: Self::Properties) -> Reconciled;

    /// `physical_resource_id` is the identifier returned by Create
    async fn update(&self, physical_resource_id: &str, properties: Self::Properties) -> Reconciled;

    /// Must succeed when the resource is already gone
    async fn delete(&self, physical_resource_id: &str) -> Reconciled;
}

/// Object-safe view of a [`ResourceHandler`] used by the registry
#[async_trait]
pub trait DynResourceHandler: Send + Sync {
    async fn dispatch(&self, request_type: RequestType, event: &Event) -> Reconciled;
}

#[async_trait]
impl<H> DynResourceHandler for H
where
    H: ResourceHandler,
{
    async fn dispatch(&self, request_type: RequestType, event: &Event) -> Reconciled {
        let resource_type = ResourceHandler::resource_type(self);
        match request_type {
            RequestType::Create => {
                let properties = parse_properties(resource_type, &event.resource_properties)?;
                self.create(properties).await
            }
            RequestType::Update => {
                if event.physical_resource_id.is_empty() {
                    return Err(Failure::new(ResourceError::validation(
                        resource_type,
                        "PhysicalResourceId is required for Update",
                    )));
                }
                let properties = parse_properties(resource_type, &event.resource_properties)?;
                self.update(&event.physical_resource_id, properties).await
            }
            RequestType::Delete => {
                if event.physical_resource_id.is_empty() {
                    // Nothing was ever created under this id
                    tracing::warn!(
                        "Delete of {} without PhysicalResourceId, skipping",
                        resource_type
                    );
                    return Ok(Response::new(FAILED_PHYSICAL_ID));
                }
                self.delete(&event.physical_resource_id).await
            }
        }
    }
}

/// Deserialize and validate untyped properties into `P`
pub fn parse_properties<P>(resource_type: &str, properties: &Properties) -> Result<P, ResourceError>
where
    P: ResourceProperties,
{
    let parsed: P = serde_json::from_value(serde_json::Value::Object(properties.clone()))
        .map_err(|e| ResourceError::validation(resource_type, e.to_string()))?;
    parsed
        .validate()
        .map_err(|reason| ResourceError::validation(resource_type, reason))?;
    Ok(parsed)
}
