//! Schema of the objects the renderer consumes (Gateway API resources and the
//! `GatewayConfig` custom resource) and of the TURN relay configuration it produces.

pub mod gateway;
pub use gateway::*;

pub mod gateway_config;
pub use gateway_config::*;

pub mod udp_route;
pub use udp_route::*;

pub mod protocol;
pub use protocol::*;

pub mod stunner;
pub use stunner::*;

pub mod snapshot;
pub use snapshot::*;

pub mod condition;
pub mod constants;

pub use k8s_gateway_api;
pub use k8s_openapi;
pub use k8s_openapi::api::core::v1::{ConfigMap, Secret, Service};
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::Condition;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
pub type BoxResult<T> = Result<T, BoxError>;
