use std::sync::Arc;

use stunner_gateway_config::service::{address::PublicAddress, object_key, Store};
use stunner_gateway_model::{
    constants::{DEFAULT_BIND_ADDRESS, DEFAULT_MAX_RELAY_PORT, DEFAULT_MIN_RELAY_PORT},
    Gateway, GatewayConfigSpec, Listener, ListenerConfig, ListenerProtocol, UdpRoute,
};

use crate::{tls::resolve_tls, RenderError};

/// Composite listener name, `<gateway namespace>/<gateway name>/<listener name>`.
pub fn listener_name(gateway: &Gateway, listener: &Listener) -> String {
    format!("{}/{}", object_key(gateway), listener.name)
}

/// Render one gateway listener into a relay listener.
///
/// The only failure is a protocol token that names no relay protocol. An unresolved public
/// address and missing TLS material leave the respective fields empty.
///
/// # Errors
/// [`RenderError::UnsupportedProtocol`] if the listener protocol is unknown.
pub fn render_listener<S: Store + ?Sized>(
    store: &S,
    gateway: &Gateway,
    config: &GatewayConfigSpec,
    listener: &Listener,
    routes: &[Arc<UdpRoute>],
    public: Option<&PublicAddress>,
) -> Result<ListenerConfig, RenderError> {
    let name = listener_name(gateway, listener);
    tracing::trace!("[SG.Render] render listener {name}: protocol {}, port {}, {} route(s)", listener.protocol, listener.port, routes.len());

    let protocol = listener.protocol.parse::<ListenerProtocol>()?;
    let (public_address, public_port) = match public {
        Some(public) => (public.address.value.clone(), public.port),
        None => (String::new(), 0),
    };
    let (cert, key) = match resolve_tls(store, gateway, listener) {
        Some(material) => (material.cert, material.key),
        None => (String::new(), String::new()),
    };

    let rendered = ListenerConfig {
        name,
        protocol,
        public_address,
        public_port,
        address: DEFAULT_BIND_ADDRESS.to_string(),
        port: i32::from(listener.port),
        min_relay_port: config.min_port.unwrap_or(DEFAULT_MIN_RELAY_PORT),
        max_relay_port: config.max_port.unwrap_or(DEFAULT_MAX_RELAY_PORT),
        cert,
        key,
        routes: routes.iter().map(|route| object_key::<UdpRoute>(route)).collect(),
    };
    tracing::debug!(
        "[SG.Render] listener {} rendered: {}://{}:{}, public {}:{}",
        rendered.name,
        rendered.protocol,
        rendered.address,
        rendered.port,
        rendered.public_address,
        rendered.public_port
    );
    Ok(rendered)
}
