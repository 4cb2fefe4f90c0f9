//! `Custom::ECS-Cluster` handler

use crate::api::{EcsApi, ResourceTag};
use crate::context::Location;
use async_trait::async_trait;
use serde::Deserialize;
use stackhook::{
    Arn, Checkpoint, Failure, Reconciled, ResourceError, ResourceHandler, ResourceProperties,
    Response,
};
use std::sync::Arc;

pub const RESOURCE_TYPE: &str = "Custom::ECS-Cluster";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EcsClusterProperties {
    pub cluster_name: String,
}

impl ResourceProperties for EcsClusterProperties {
    fn validate(&self) -> Result<(), String> {
        if self.cluster_name.trim().is_empty() {
            return Err("ClusterName must not be empty".to_string());
        }
        Ok(())
    }
}

/// Tags put on every cluster this handler creates
pub fn default_tags() -> Vec<ResourceTag> {
    vec![ResourceTag::new("Application", "Panther")]
}

/// Creates and deletes ECS clusters.
///
/// The physical resource id is the cluster ARN. Update is a no-op: changing
/// `ClusterName` is a replacement, which CloudFormation drives as a Create
/// of the new cluster followed by a Delete of the old one.
pub struct EcsClusterHandler {
    ecs: Arc<dyn EcsApi>,
    location: Location,
    tags: Vec<ResourceTag>,
}

impl EcsClusterHandler {
    pub fn new(ecs: Arc<dyn EcsApi>, location: Location) -> Self {
        Self {
            ecs,
            location,
            tags: default_tags(),
        }
    }

    /// CreateCluster does not hand back an ARN we can rely on, so build it
    pub fn cluster_arn(&self, name: &str) -> Arn {
        self.location.arn("ecs", format!("cluster/{}", name))
    }
}

#[async_trait]
impl ResourceHandler for EcsClusterHandler {
    type Properties = EcsClusterProperties;

    fn resource_type(&self) -> &str {
        RESOURCE_TYPE
    }

    async fn create(&self, properties: EcsClusterProperties) -> Reconciled {
        let name = properties.cluster_name;
        tracing::info!("Creating ECS cluster: {}", name);

        self.ecs
            .create_cluster(&name, &self.tags)
            .await
            .map_err(|e| ResourceError::create_failed(RESOURCE_TYPE, &name, e))?;

        Ok(Response::new(self.cluster_arn(&name).to_string()))
    }

    async fn update(&self, physical_resource_id: &str, _: EcsClusterProperties) -> Reconciled {
        tracing::info!("ECS cluster update is a no-op: {}", physical_resource_id);
        Ok(Response::new(physical_resource_id))
    }

    async fn delete(&self, physical_resource_id: &str) -> Reconciled {
        let arn = match Checkpoint::decode(physical_resource_id) {
            Some(Checkpoint::Cluster(arn)) => arn,
            _ => {
                // Create failed before the cluster existed
                tracing::warn!(
                    "Not an ECS cluster ARN, skipping delete: {:?}",
                    physical_resource_id
                );
                return Ok(Response::new(physical_resource_id));
            }
        };
        let name = Checkpoint::cluster_name(&arn).unwrap_or_default();

        tracing::info!("Deleting ECS cluster: {}", name);
        match self.ecs.delete_cluster(name).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                tracing::info!("ECS cluster {} has already been deleted", name);
            }
            Err(e) => {
                return Err(Failure::with_checkpoint(
                    physical_resource_id,
                    ResourceError::delete_failed(RESOURCE_TYPE, name, e),
                ));
            }
        }

        Ok(Response::new(physical_resource_id))
    }
}
