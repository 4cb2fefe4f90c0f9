//! Event dispatch

use crate::error::ResourceError;
use crate::event::Event;
use crate::registry::HandlerRegistry;
use crate::response::Reconciled;
use std::sync::Arc;

/// Routes one event to the handler registered for its resource type.
///
/// Holds no mutable state; clones share the same registry and can serve
/// unrelated events concurrently.
#[derive(Debug, Clone)]
pub struct Reconciler {
    registry: Arc<HandlerRegistry>,
}

impl Reconciler {
    pub fn new(registry: HandlerRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Handle one event. The handler's result is returned as is.
    pub async fn handle(&self, event: &Event) -> Reconciled {
        tracing::info!(
            resource_type = %event.resource_type,
            request_type = %event.request_type,
            logical_resource_id = %event.logical_resource_id,
            physical_resource_id = %event.physical_resource_id,
            "received request"
        );

        let handler = self
            .registry
            .get(&event.resource_type)
            .ok_or_else(|| ResourceError::UnknownResourceType(event.resource_type.clone()))?;
        let request_type = event.request_type()?;

        let outcome = handler.dispatch(request_type, event).await;
        match &outcome {
            Ok(response) => tracing::info!(
                physical_resource_id = %response.physical_resource_id,
                "{} {} succeeded",
                request_type,
                event.resource_type
            ),
            Err(failure) => tracing::error!(
                physical_resource_id = %failure.physical_resource_id,
                "{} {} failed: {}",
                request_type,
                event.resource_type,
                failure
            ),
        }
        outcome
    }
}
