use serde::{Deserialize, Serialize};

use crate::{Gateway, GatewayClass, GatewayConfig, Secret, Service, UdpRoute};

/// A point-in-time copy of every object the renderer reads, in the order they were observed.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gateway_classes: Vec<GatewayClass>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gateway_configs: Vec<GatewayConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gateways: Vec<Gateway>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub udp_routes: Vec<UdpRoute>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secrets: Vec<Secret>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<Service>,
}
