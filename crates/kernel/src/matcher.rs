//! Selection of the objects a render pass works on.
use std::sync::Arc;

use kube::ResourceExt;
use stunner_gateway_config::service::{object_key, Store};
use stunner_gateway_model::{
    constants::{GATEWAY_API_GROUP, GATEWAY_CONFIG_KIND, GATEWAY_KIND, STUNNER_API_GROUP},
    parent_refs, Gateway, GatewayClass, GatewayConfig, Listener, ParentReference, UdpRoute,
};

use crate::RenderError;

/// The class owned by this controller.
///
/// When several classes name the same controller the first one wins.
pub fn select_class<S: Store + ?Sized>(store: &S, controller_name: &str) -> Result<Arc<GatewayClass>, RenderError> {
    let mut classes = store.gateway_classes().into_iter().filter(|class| class.spec.controller_name == controller_name);
    let class = classes.next().ok_or_else(|| RenderError::not_found("GatewayClass", format!("for controller {controller_name}")))?;
    let others = classes.count();
    if others > 0 {
        tracing::warn!("[SG.Render] {} more gateway class(es) claim controller {controller_name}, using {}", others, class.name_any());
    }
    Ok(class)
}

/// The class named `name`, provided this controller owns it.
pub fn class_by_name<S: Store + ?Sized>(store: &S, name: &str, controller_name: &str) -> Result<Arc<GatewayClass>, RenderError> {
    match store.get_gateway_class(name) {
        Some(class) if class.spec.controller_name == controller_name => Ok(class),
        Some(class) => {
            tracing::debug!("[SG.Render] gateway class {name} belongs to controller {}", class.spec.controller_name);
            Err(RenderError::not_found("GatewayClass", name))
        }
        None => Err(RenderError::not_found("GatewayClass", name)),
    }
}

/// Every gateway of the class, in store order.
pub fn gateways_for_class<S: Store + ?Sized>(store: &S, class: &GatewayClass) -> Vec<Arc<Gateway>> {
    let class_name = class.name_any();
    store.gateways().into_iter().filter(|gw| gw.spec.gateway_class_name == class_name).collect()
}

/// Follow the class's parameters reference to its `GatewayConfig`.
pub fn config_for_class<S: Store + ?Sized>(store: &S, class: &GatewayClass) -> Result<Arc<GatewayConfig>, RenderError> {
    let Some(parameters) = class.spec.parameters_ref.as_ref() else {
        return Err(RenderError::not_found("GatewayConfig", format!("parametersRef of {}", class.name_any())));
    };
    if parameters.group != STUNNER_API_GROUP || parameters.kind != GATEWAY_CONFIG_KIND {
        tracing::debug!("[SG.Render] gateway class {}: parametersRef points to {}/{}", class.name_any(), parameters.group, parameters.kind);
        return Err(RenderError::not_found("GatewayConfig", format!("parametersRef of {}", class.name_any())));
    }
    let namespace = parameters.namespace.as_deref().unwrap_or_default();
    store.get_gateway_config(namespace, &parameters.name).ok_or_else(|| RenderError::not_found("GatewayConfig", format!("{namespace}/{}", parameters.name)))
}

/// Whether a parent reference of a route in `route_namespace` points at the gateway.
///
/// Only same-namespace attachment is supported. Unset group, kind and namespace match.
pub fn parent_ref_matches_gateway(parent: &ParentReference, route_namespace: &str, gateway: &Gateway) -> bool {
    let gateway_namespace = gateway.metadata.namespace.as_deref().unwrap_or_default();
    if route_namespace != gateway_namespace {
        return false;
    }
    if parent.group.as_deref().is_some_and(|group| group != GATEWAY_API_GROUP) {
        return false;
    }
    if parent.kind.as_deref().is_some_and(|kind| kind != GATEWAY_KIND) {
        return false;
    }
    if parent.namespace.as_deref().is_some_and(|namespace| namespace != gateway_namespace) {
        return false;
    }
    gateway.metadata.name.as_deref() == Some(parent.name.as_str())
}

/// Whether a parent reference attaches to one listener of the gateway.
pub fn parent_ref_matches_listener(parent: &ParentReference, route_namespace: &str, gateway: &Gateway, listener: &Listener) -> bool {
    parent_ref_matches_gateway(parent, route_namespace, gateway) && parent.section_name.as_deref().map_or(true, |section| section == listener.name)
}

/// Routes attached to one listener of the gateway, in store order.
pub fn routes_for_listener<S: Store + ?Sized>(store: &S, gateway: &Gateway, listener: &Listener) -> Vec<Arc<UdpRoute>> {
    store
        .udp_routes()
        .into_iter()
        .filter(|route| {
            let namespace = route.metadata.namespace.as_deref().unwrap_or_default();
            let attached = parent_refs(route).iter().any(|parent| parent_ref_matches_listener(parent, namespace, gateway, listener));
            if !attached {
                tracing::debug!(
                    "[SG.Render] route {} does not attach to listener {} of gateway {}",
                    object_key::<UdpRoute>(route),
                    listener.name,
                    object_key(gateway)
                );
            }
            attached
        })
        .collect()
}

/// Routes attached to any listener of the gateway, each listed once, in store order.
pub fn routes_for_gateway<S: Store + ?Sized>(store: &S, gateway: &Gateway) -> Vec<Arc<UdpRoute>> {
    store
        .udp_routes()
        .into_iter()
        .filter(|route| {
            let namespace = route.metadata.namespace.as_deref().unwrap_or_default();
            parent_refs(route).iter().any(|parent| gateway.spec.listeners.iter().any(|listener| parent_ref_matches_listener(parent, namespace, gateway, listener)))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use stunner_gateway_config::service::memory::Memory;
    use stunner_gateway_model::*;

    use super::*;

    fn gateway() -> Gateway {
        let mut gw = Gateway::new(
            "gateway-1",
            GatewaySpec {
                gateway_class_name: "gatewayclass-ok".into(),
                listeners: vec![
                    listener("gateway-1-listener-udp", "UDP", 1),
                    listener("gateway-1-listener-tcp", "TCP", 2),
                ],
                addresses: None,
            },
        );
        gw.metadata.namespace = Some("testnamespace".into());
        gw
    }

    fn listener(name: &str, protocol: &str, port: u16) -> Listener {
        Listener {
            name: name.into(),
            hostname: None,
            port,
            protocol: protocol.into(),
            tls: None,
            allowed_routes: None,
        }
    }

    fn route(name: &str, namespace: &str, parent: ParentReference) -> UdpRoute {
        let mut route = UdpRoute::new(
            name,
            UdpRouteSpec {
                inner: CommonRouteSpec { parent_refs: Some(vec![parent]) },
                rules: vec![],
            },
        );
        route.metadata.namespace = Some(namespace.into());
        route
    }

    fn parent(name: &str) -> ParentReference {
        ParentReference {
            group: None,
            kind: None,
            namespace: None,
            name: name.into(),
            section_name: None,
            port: None,
        }
    }

    #[test]
    fn test_select_class() {
        let store = Memory::new();
        assert!(select_class(&store, "stunner.l7mp.io/gateway-operator").is_err_and(|e| e.is_not_found()));
        store.upsert(GatewayClass::new(
            "gatewayclass-other",
            GatewayClassSpec {
                controller_name: "example.com/other".into(),
                ..Default::default()
            },
        ));
        store.upsert(GatewayClass::new(
            "gatewayclass-ok",
            GatewayClassSpec {
                controller_name: "stunner.l7mp.io/gateway-operator".into(),
                ..Default::default()
            },
        ));
        let class = select_class(&store, "stunner.l7mp.io/gateway-operator").expect("class");
        assert_eq!(class.name_any(), "gatewayclass-ok");
        assert!(class_by_name(&store, "gatewayclass-other", "stunner.l7mp.io/gateway-operator").is_err());
    }

    #[test]
    fn test_gateways_for_class() {
        let store = Memory::new();
        store.upsert(gateway());
        let mut other = gateway();
        other.metadata.name = Some("gateway-2".into());
        other.spec.gateway_class_name = "gatewayclass-other".into();
        store.upsert(other);
        let class = GatewayClass::new("gatewayclass-ok", GatewayClassSpec::default());
        let gateways = gateways_for_class(&store, &class);
        assert_eq!(gateways.len(), 1);
        assert_eq!(gateways[0].name_any(), "gateway-1");
    }

    #[test]
    fn test_config_for_class() {
        let store = Memory::new();
        let mut config = GatewayConfig::new("gatewayconfig-ok", GatewayConfigSpec::default());
        config.metadata.namespace = Some("testnamespace".into());
        store.upsert(config);
        let mut class = GatewayClass::new("gatewayclass-ok", GatewayClassSpec::default());
        assert!(config_for_class(&store, &class).is_err());
        class.spec.parameters_ref = Some(ParametersReference {
            group: "stunner.l7mp.io".into(),
            kind: "GatewayConfig".into(),
            name: "gatewayconfig-ok".into(),
            namespace: Some("testnamespace".into()),
        });
        assert!(config_for_class(&store, &class).is_ok());
    }

    #[test]
    fn test_route_in_other_namespace_never_attaches() {
        let store = Memory::new();
        let mut parent = parent("gateway-1");
        parent.namespace = Some("testnamespace".into());
        store.upsert(route("udproute-other", "othernamespace", parent));
        let gw = gateway();
        assert!(routes_for_listener(&store, &gw, &gw.spec.listeners[0]).is_empty());
        assert!(routes_for_gateway(&store, &gw).is_empty());
    }

    #[test]
    fn test_section_name() {
        let store = Memory::new();
        let mut to_tcp = parent("gateway-1");
        to_tcp.section_name = Some("gateway-1-listener-tcp".into());
        store.upsert(route("udproute-tcp", "testnamespace", to_tcp));
        store.upsert(route("udproute-all", "testnamespace", parent("gateway-1")));
        let gw = gateway();
        let udp = routes_for_listener(&store, &gw, &gw.spec.listeners[0]);
        assert_eq!(udp.iter().map(|r| r.name_any()).collect::<Vec<_>>(), ["udproute-all"]);
        let tcp = routes_for_listener(&store, &gw, &gw.spec.listeners[1]);
        assert_eq!(tcp.iter().map(|r| r.name_any()).collect::<Vec<_>>(), ["udproute-tcp", "udproute-all"]);
        // listed once even though it attaches to both listeners
        assert_eq!(routes_for_gateway(&store, &gw).len(), 2);
    }

    #[test]
    fn test_group_and_kind() {
        let gw = gateway();
        let mut wrong_group = parent("gateway-1");
        wrong_group.group = Some("example.com".into());
        assert!(!parent_ref_matches_gateway(&wrong_group, "testnamespace", &gw));
        let mut wrong_kind = parent("gateway-1");
        wrong_kind.kind = Some("Service".into());
        assert!(!parent_ref_matches_gateway(&wrong_kind, "testnamespace", &gw));
        let mut explicit = parent("gateway-1");
        explicit.group = Some(GATEWAY_API_GROUP.into());
        explicit.kind = Some(GATEWAY_KIND.into());
        assert!(parent_ref_matches_gateway(&explicit, "testnamespace", &gw));
        assert!(!parent_ref_matches_gateway(&parent("gateway-2"), "testnamespace", &gw));
    }
}
