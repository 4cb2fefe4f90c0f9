//! Custom resource error types

use thiserror::Error;

/// Boxed error from an external API client
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the reconciler and the resource handlers
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("unknown custom resource type {0}")]
    UnknownResourceType(String),

    #[error("unknown request type {0}")]
    UnknownRequestType(String),

    #[error("invalid properties for {resource_type}: {reason}")]
    ValidationFailed {
        resource_type: String,
        reason: String,
    },

    #[error("failed to create {resource_type} {name}: {source}")]
    CreateFailed {
        resource_type: String,
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to update {resource_type} {name}: {source}")]
    UpdateFailed {
        resource_type: String,
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to delete {resource_type} {name}: {source}")]
    DeleteFailed {
        resource_type: String,
        name: String,
        #[source]
        source: BoxError,
    },
}

impl ResourceError {
    pub fn validation(resource_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationFailed {
            resource_type: resource_type.into(),
            reason: reason.into(),
        }
    }

    pub fn create_failed(
        resource_type: impl Into<String>,
        name: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::CreateFailed {
            resource_type: resource_type.into(),
            name: name.into(),
            source: source.into(),
        }
    }

    pub fn update_failed(
        resource_type: impl Into<String>,
        name: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::UpdateFailed {
            resource_type: resource_type.into(),
            name: name.into(),
            source: source.into(),
        }
    }

    pub fn delete_failed(
        resource_type: impl Into<String>,
        name: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::DeleteFailed {
            resource_type: resource_type.into(),
            name: name.into(),
            source: source.into(),
        }
    }
}

/// A failed lifecycle call.
///
/// `physical_resource_id` carries whatever checkpoint was recorded before the
/// failure, so the follow-up Delete can clean up partial work. It is empty
/// when nothing irreversible happened.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct Failure {
    pub physical_resource_id: String,
    #[source]
    pub error: ResourceError,
}

impl Failure {
    pub fn new(error: ResourceError) -> Self {
        Self {
            physical_resource_id: String::new(),
            error,
        }
    }

    /// Failure that leaves a partial checkpoint behind
    pub fn with_checkpoint(physical_resource_id: impl Into<String>, error: ResourceError) -> Self {
        Self {
            physical_resource_id: physical_resource_id.into(),
            error,
        }
    }

    pub fn has_checkpoint(&self) -> bool {
        !self.physical_resource_id.is_empty()
    }
}

impl From<ResourceError> for Failure {
    fn from(error: ResourceError) -> Self {
        Self::new(error)
    }
}

pub type Result<T> = std::result::Result<T, ResourceError>;
