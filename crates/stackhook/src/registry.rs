//! Resource type → handler lookup

use crate::handler::{DynResourceHandler, ResourceHandler};
use std::collections::HashMap;
use std::sync::Arc;

/// Handlers indexed by CloudFormation resource type
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn DynResourceHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its own resource type, replacing any previous one
    pub fn register<H>(&mut self, handler: H) -> &mut Self
    where
        H: ResourceHandler + 'static,
    {
        let resource_type = handler.resource_type().to_string();
        if self.handlers.contains_key(&resource_type) {
            tracing::warn!("Replacing handler for {}", resource_type);
        }
        self.handlers.insert(resource_type, Arc::new(handler));
        self
    }

    pub fn with<H>(mut self, handler: H) -> Self
    where
        H: ResourceHandler + 'static,
    {
        self.register(handler);
        self
    }

    pub fn get(&self, resource_type: &str) -> Option<&Arc<dyn DynResourceHandler>> {
        self.handlers.get(resource_type)
    }

    /// Registered resource types, sorted
    pub fn resource_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("resource_types", &self.resource_types())
            .finish()
    }
}
