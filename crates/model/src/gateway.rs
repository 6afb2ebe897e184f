use std::fmt::Display;

pub use k8s_gateway_api::{
    Gateway, GatewayAddress, GatewaySpec, GatewayStatus, GatewayTlsConfig, Listener, ListenerStatus, ParametersReference, RouteGroupKind, SecretObjectReference,
};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// GatewayClass describes a class of Gateways available to the user for creating Gateway resources.
///
/// Declared here rather than taken from `k8s_gateway_api`, whose spec reads the parameters
/// reference from a misspelled `paramtersRef` key.
///
/// Reference: [Kubernetes Gateway](https://gateway-api.sigs.k8s.io/references/spec/#gateway.networking.k8s.io/v1beta1.GatewayClass)
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(group = "gateway.networking.k8s.io", version = "v1beta1", kind = "GatewayClass")]
pub struct GatewayClassSpec {
    /// ControllerName is the name of the controller that is managing Gateways of this class.
    pub controller_name: String,
    /// ParametersRef is a reference to a resource that contains the configuration parameters
    /// corresponding to the GatewayClass, for us always a `GatewayConfig`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters_ref: Option<ParametersReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// TLS handling of a listener, read from [`GatewayTlsConfig::mode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TlsMode {
    Terminate,
    Passthrough,
}

impl TlsMode {
    /// Absent mode means [`TlsMode::Terminate`]; `None` for a mode outside the Gateway API.
    pub fn of(tls: &GatewayTlsConfig) -> Option<Self> {
        match tls.mode.as_deref() {
            None | Some("Terminate") => Some(TlsMode::Terminate),
            Some("Passthrough") => Some(TlsMode::Passthrough),
            Some(_) => None,
        }
    }
}

impl Display for TlsMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TlsMode::Terminate => write!(f, "Terminate"),
            TlsMode::Passthrough => write!(f, "Passthrough"),
        }
    }
}

pub mod address_type {
    pub const IP_ADDRESS: &str = "IPAddress";
    pub const HOSTNAME: &str = "Hostname";
}

pub fn ip_address(value: impl Into<String>) -> GatewayAddress {
    GatewayAddress {
        r#type: Some(address_type::IP_ADDRESS.to_string()),
        value: value.into(),
    }
}

pub fn hostname_address(value: impl Into<String>) -> GatewayAddress {
    GatewayAddress {
        r#type: Some(address_type::HOSTNAME.to_string()),
        value: value.into(),
    }
}

/// A gateway status with nothing reported yet.
pub fn empty_gateway_status() -> GatewayStatus {
    GatewayStatus {
        addresses: None,
        conditions: None,
        listeners: None,
    }
}

/// Certificate references of a TLS block, in the order they are tried.
pub fn certificate_refs(tls: &GatewayTlsConfig) -> &[SecretObjectReference] {
    tls.certificate_refs.as_deref().unwrap_or_default()
}
