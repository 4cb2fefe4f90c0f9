//! Stackhook Custom Resource Core
//!
//! This crate implements the CloudFormation custom-resource protocol:
//! one event in, one `(PhysicalResourceId, Data)` pair or failure out.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │            CloudFormation control plane          │
//! └─────────────────┬───────────────────────────────┘
//!                   │ Event
//! ┌─────────────────▼───────────────────────────────┐
//! │                 Reconciler                       │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │   HandlerRegistry (ResourceType → impl)   │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────────────┐     │
//! │  │  Properties  │  │  Checkpoint codec    │     │
//! │  └──────────────┘  └──────────────────────┘     │
//! └───────┬─────────────────┬───────────────────────┘
//!         │                 │
//! ┌───────▼───────┐ ┌───────▼────────┐
//! │  ECS cluster  │ │ metric filters │   (stackhook-aws)
//! └───────────────┘ └────────────────┘
//! ```

pub mod arn;
pub mod checkpoint;
pub mod error;
pub mod event;
pub mod handler;
pub mod reconciler;
pub mod registry;
pub mod response;

// Re-exports
pub use arn::{Arn, ArnError};
pub use checkpoint::{Checkpoint, FilterStep, MetricFilterCheckpoint};
pub use error::{BoxError, Failure, ResourceError, Result};
pub use event::{Event, Outputs, Properties, RequestType};
pub use handler::{DynResourceHandler, ResourceHandler, ResourceProperties, parse_properties};
pub use reconciler::Reconciler;
pub use registry::HandlerRegistry;
pub use response::{CfnResponse, FAILED_PHYSICAL_ID, Reconciled, Response, Status};
