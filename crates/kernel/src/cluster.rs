use stunner_gateway_config::service::{object_key, Store};
use stunner_gateway_model::{constants::CLUSTER_TYPE_STATIC, ClusterConfig, UdpRoute};

/// A rendered cluster and whether every backend of the route was found.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCluster {
    pub cluster: ClusterConfig,
    pub backends_resolved: bool,
}

/// Render the peers a route forwards to into a static cluster.
///
/// Backends are services; the endpoints are their cluster IPs. Missing services are skipped.
pub fn render_cluster<S: Store + ?Sized>(store: &S, route: &UdpRoute) -> RenderedCluster {
    let name = object_key(route);
    let route_namespace = route.metadata.namespace.as_deref().unwrap_or_default();
    let mut endpoints = Vec::new();
    let mut backends_resolved = true;
    for backend in route.spec.rules.iter().flat_map(|rule| rule.backend_refs.iter()).map(|backend| &backend.inner) {
        if backend.kind.as_deref().is_some_and(|kind| kind != "Service") {
            tracing::debug!("[SG.Render] route {name}: skip backend {} of kind {:?}", backend.name, backend.kind);
            backends_resolved = false;
            continue;
        }
        let namespace = backend.namespace.as_deref().unwrap_or(route_namespace);
        let Some(service) = store.get_service(namespace, &backend.name) else {
            tracing::warn!("[SG.Render] route {name}: backend service {namespace}/{} not found", backend.name);
            backends_resolved = false;
            continue;
        };
        match service.spec.as_ref().and_then(|spec| spec.cluster_ip.as_deref()) {
            Some(ip) if !ip.is_empty() && ip != "None" => {
                if !endpoints.iter().any(|e| e == ip) {
                    endpoints.push(ip.to_string());
                }
            }
            _ => tracing::debug!("[SG.Render] route {name}: backend service {namespace}/{} has no cluster ip", backend.name),
        }
    }
    RenderedCluster {
        cluster: ClusterConfig {
            name,
            cluster_type: CLUSTER_TYPE_STATIC.to_string(),
            endpoints,
        },
        backends_resolved,
    }
}
