use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{constants, ListenerProtocol};

/// The full configuration of a TURN relay, as consumed by stunnerd.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StunnerConfig {
    #[serde(rename = "version")]
    pub api_version: String,
    pub admin: AdminConfig,
    pub auth: AuthConfig,
    pub listeners: Vec<ListenerConfig>,
    pub clusters: Vec<ClusterConfig>,
}

impl Default for StunnerConfig {
    fn default() -> Self {
        Self {
            api_version: constants::DEFAULT_API_VERSION.to_string(),
            admin: Default::default(),
            auth: Default::default(),
            listeners: Default::default(),
            clusters: Default::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AdminConfig {
    pub name: String,
    pub loglevel: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            name: constants::DEFAULT_ADMIN_NAME.to_string(),
            loglevel: constants::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    #[serde(rename = "type")]
    pub auth_type: String,
    pub realm: String,
    pub credentials: BTreeMap<String, String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            auth_type: constants::DEFAULT_AUTH_TYPE.to_string(),
            realm: constants::DEFAULT_REALM.to_string(),
            credentials: BTreeMap::from([
                ("username".to_string(), constants::DEFAULT_USERNAME.to_string()),
                ("password".to_string(), constants::DEFAULT_PASSWORD.to_string()),
            ]),
        }
    }
}

/// One relay listener, rendered from one Gateway listener.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ListenerConfig {
    /// `<gateway namespace>/<gateway name>/<listener name>`
    pub name: String,
    pub protocol: ListenerProtocol,
    /// Empty while the fronting load balancer has no ingress address yet.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub public_address: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub public_port: i32,
    pub address: String,
    pub port: i32,
    pub min_relay_port: i32,
    pub max_relay_port: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cert: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    /// Keys of the routes attached to this listener, in attachment order.
    #[serde(default)]
    pub routes: Vec<String>,
}

fn is_zero(port: &i32) -> bool {
    *port == 0
}

/// A group of peers relayed traffic may be forwarded to, rendered from one route.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ClusterConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub cluster_type: String,
    pub endpoints: Vec<String>,
}
