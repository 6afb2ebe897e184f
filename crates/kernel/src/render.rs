//! The render and finalize passes.
//!
//! A pass reads everything from the store and never writes back to it: gateways and routes
//! with updated status are handed back in the outcome.
use std::collections::{BTreeMap, HashSet};

use kube::ResourceExt;
use stunner_gateway_config::{
    config_map::render_config_map,
    service::{address::public_address_for_gateway, object_key, Store},
};
use stunner_gateway_model::{
    constants::{DEFAULT_AUTH_TYPE, DEFAULT_CONFIG_MAP_NAME, DEFAULT_LOG_LEVEL, DEFAULT_PASSWORD, DEFAULT_REALM, DEFAULT_USERNAME},
    AdminConfig, AuthConfig, ConfigMap, Gateway, GatewayClass, GatewayConfig, GatewayConfigSpec, StunnerConfig, UdpRoute,
};

use crate::{
    cluster::render_cluster,
    listener::render_listener,
    matcher::{config_for_class, gateways_for_class, routes_for_gateway, routes_for_listener, select_class},
    status::{clear_gateway_status, reset_listener_statuses, set_gateway_addresses, set_gateway_ready, set_gateway_scheduled, set_listener_status, set_route_parent_status},
    RenderError,
};

const FALLBACK_NAMESPACE: &str = "default";

/// Result of rendering one gateway class.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub config: StunnerConfig,
    pub config_map: ConfigMap,
    /// Gateways of the class with their status updated.
    pub gateways: Vec<Gateway>,
    /// Routes attached to those gateways with their parent status updated.
    pub routes: Vec<UdpRoute>,
}

/// Result of a finalize pass.
#[derive(Debug, Clone)]
pub struct FinalizeOutcome {
    /// The config map emptied out.
    pub config_map: ConfigMap,
    /// Every known gateway with its status cleared.
    pub gateways: Vec<Gateway>,
}

/// Render every gateway of `class` into one relay configuration.
///
/// Listener failures are recorded in the listener's status and never fail the pass. A missing
/// `GatewayConfig` falls back to defaults.
///
/// # Errors
/// [`RenderError::Serialize`] if the assembled configuration cannot be serialized.
pub fn render_class<S: Store + ?Sized>(store: &S, controller_name: &str, class: &GatewayClass) -> Result<RenderOutcome, RenderError> {
    let class_name = class.name_any();
    let gateway_config = match config_for_class(store, class) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("[SG.Render] gateway class {class_name}: {e}, rendering with defaults");
            None
        }
    };
    let default_spec = GatewayConfigSpec::default();
    let config_spec = gateway_config.as_ref().map(|c| &c.spec).unwrap_or(&default_spec);

    let mut config = StunnerConfig {
        admin: render_admin(config_spec),
        auth: render_auth(config_spec),
        ..Default::default()
    };
    let mut gateways = Vec::new();
    let mut routes = Vec::new();
    let mut seen_routes = HashSet::new();

    for gateway in gateways_for_class(store, class) {
        let mut gateway = gateway.as_ref().clone();
        let gateway_key = object_key(&gateway);
        tracing::debug!("[SG.Render] render gateway {gateway_key}");

        set_gateway_scheduled(&mut gateway, controller_name);
        set_gateway_ready(&mut gateway);
        reset_listener_statuses(&mut gateway);

        let public = public_address_for_gateway(store, &gateway);
        if public.is_none() {
            tracing::debug!("[SG.Render] gateway {gateway_key}: public address pending");
        }
        set_gateway_addresses(&mut gateway, public.as_ref());
        let ready = public.is_some();

        let listeners = gateway.spec.listeners.clone();
        for listener in &listeners {
            let attached = routes_for_listener(store, &gateway, listener);
            match render_listener(store, &gateway, config_spec, listener, &attached, public.as_ref()) {
                Ok(rendered) => {
                    config.listeners.push(rendered);
                    set_listener_status(&mut gateway, &listener.name, ready, Ok(attached.len()));
                }
                Err(e) => {
                    tracing::warn!("[SG.Render] gateway {gateway_key}: listener {} not rendered: {e}", listener.name);
                    set_listener_status(&mut gateway, &listener.name, ready, Err(&e));
                }
            }
        }

        for route in routes_for_gateway(store, &gateway) {
            let route_key = object_key::<UdpRoute>(&route);
            if seen_routes.insert(route_key) {
                let rendered = render_cluster(store, &route);
                config.clusters.push(rendered.cluster);
                routes.push((route.as_ref().clone(), rendered.backends_resolved));
            }
        }
        gateways.push(gateway);
    }

    let routes = routes
        .into_iter()
        .map(|(mut route, backends_resolved)| {
            for gateway in &gateways {
                set_route_parent_status(&mut route, gateway, controller_name, backends_resolved);
            }
            route
        })
        .collect::<Vec<_>>();

    let (namespace, name) = config_map_target(class, gateway_config.as_deref());
    let config_map = render_config_map(&namespace, &name, Some(&config)).inspect_err(|e| {
        tracing::error!("[SG.Render] gateway class {class_name}: cannot serialize configuration: {e}");
    })?;
    tracing::info!(
        "[SG.Render] gateway class {class_name} rendered: {} gateway(s), {} listener(s), {} cluster(s)",
        gateways.len(),
        config.listeners.len(),
        config.clusters.len()
    );
    Ok(RenderOutcome {
        config,
        config_map,
        gateways,
        routes,
    })
}

/// Invalidate every known gateway and the rendered configuration of this controller's class.
///
/// # Errors
/// [`RenderError::Serialize`] never in practice, the emptied config map has no payload.
pub fn finalize<S: Store + ?Sized>(store: &S, controller_name: &str) -> Result<FinalizeOutcome, RenderError> {
    let class = select_class(store, controller_name).ok();
    let gateway_config = class.as_ref().and_then(|class| config_for_class(store, class).ok());
    let (namespace, name) = match class.as_deref() {
        Some(class) => config_map_target(class, gateway_config.as_deref()),
        None => (FALLBACK_NAMESPACE.to_string(), DEFAULT_CONFIG_MAP_NAME.to_string()),
    };
    let gateways = store
        .gateways()
        .iter()
        .map(|gateway| {
            let mut gateway = gateway.as_ref().clone();
            clear_gateway_status(&mut gateway);
            gateway
        })
        .collect::<Vec<_>>();
    let config_map = render_config_map(&namespace, &name, None)?;
    tracing::info!("[SG.Render] finalized {} gateway(s), config map {namespace}/{name} emptied", gateways.len());
    Ok(FinalizeOutcome { config_map, gateways })
}

fn render_admin(config: &GatewayConfigSpec) -> AdminConfig {
    AdminConfig {
        loglevel: config.log_level.clone().unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        ..Default::default()
    }
}

fn render_auth(config: &GatewayConfigSpec) -> AuthConfig {
    let realm = config.realm.clone().unwrap_or_else(|| DEFAULT_REALM.to_string());
    let auth_type = config.auth_type.as_deref().unwrap_or(DEFAULT_AUTH_TYPE).to_ascii_lowercase();
    let (auth_type, credentials) = match auth_type.as_str() {
        "longterm" => {
            let secret = config.shared_secret.clone().unwrap_or_default();
            if secret.is_empty() {
                tracing::warn!("[SG.Render] longterm authentication without a shared secret");
            }
            (auth_type, BTreeMap::from([("secret".to_string(), secret)]))
        }
        other => {
            if other != DEFAULT_AUTH_TYPE {
                tracing::warn!("[SG.Render] unknown authentication type {other}, falling back to {DEFAULT_AUTH_TYPE}");
            }
            (
                DEFAULT_AUTH_TYPE.to_string(),
                BTreeMap::from([
                    ("username".to_string(), config.user_name.clone().unwrap_or_else(|| DEFAULT_USERNAME.to_string())),
                    ("password".to_string(), config.password.clone().unwrap_or_else(|| DEFAULT_PASSWORD.to_string())),
                ]),
            )
        }
    };
    AuthConfig { auth_type, realm, credentials }
}

/// Namespace and name of the config map a class renders into.
fn config_map_target(class: &GatewayClass, config: Option<&GatewayConfig>) -> (String, String) {
    let name = config.and_then(|c| c.spec.stunner_config.clone()).unwrap_or_else(|| DEFAULT_CONFIG_MAP_NAME.to_string());
    let namespace = config
        .and_then(|c| c.metadata.namespace.clone())
        .or_else(|| class.spec.parameters_ref.as_ref().and_then(|p| p.namespace.clone()))
        .unwrap_or_else(|| FALLBACK_NAMESPACE.to_string());
    (namespace, name)
}
