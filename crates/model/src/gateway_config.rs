use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// GatewayConfig carries the per-class defaults of the TURN relay: authentication, logging and
/// the relay port range. A GatewayClass points to it through its `parametersRef`.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(group = "stunner.l7mp.io", version = "v1alpha1", kind = "GatewayConfig", namespaced)]
pub struct GatewayConfigSpec {
    /// Name of the config object the rendered configuration is stored in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stunner_config: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    /// `plaintext` or `longterm`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_port: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_port: Option<i32>,
}
