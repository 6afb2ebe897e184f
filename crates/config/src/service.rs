use std::sync::Arc;

use kube::{Resource, ResourceExt};
use stunner_gateway_model::*;

/// Public address discovery from load balancer services
pub mod address;
/// Snapshot file formats
pub mod config_format;
/// File system snapshot loading
#[cfg(feature = "fs")]
pub mod fs;
/// In-memory backend
pub mod memory;

/// Read access to the current view of every object the renderer consumes.
///
/// Lookups are synchronous and served from memory; every list is returned in the
/// order the objects were first observed.
pub trait Store: Send + Sync {
    fn gateway_classes(&self) -> Vec<Arc<GatewayClass>>;
    fn gateway_configs(&self) -> Vec<Arc<GatewayConfig>>;
    fn gateways(&self) -> Vec<Arc<Gateway>>;
    fn udp_routes(&self) -> Vec<Arc<UdpRoute>>;
    fn secrets(&self) -> Vec<Arc<Secret>>;
    fn services(&self) -> Vec<Arc<Service>>;

    fn get_secret(&self, namespace: &str, name: &str) -> Option<Arc<Secret>> {
        self.secrets().into_iter().find(|s| is_named::<Secret>(s, Some(namespace), name))
    }

    fn get_service(&self, namespace: &str, name: &str) -> Option<Arc<Service>> {
        self.services().into_iter().find(|s| is_named::<Service>(s, Some(namespace), name))
    }

    fn get_gateway_config(&self, namespace: &str, name: &str) -> Option<Arc<GatewayConfig>> {
        self.gateway_configs().into_iter().find(|c| is_named::<GatewayConfig>(c, Some(namespace), name))
    }

    fn get_gateway_class(&self, name: &str) -> Option<Arc<GatewayClass>> {
        self.gateway_classes().into_iter().find(|c| c.name_any() == name)
    }
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn gateway_classes(&self) -> Vec<Arc<GatewayClass>> {
        self.as_ref().gateway_classes()
    }
    fn gateway_configs(&self) -> Vec<Arc<GatewayConfig>> {
        self.as_ref().gateway_configs()
    }
    fn gateways(&self) -> Vec<Arc<Gateway>> {
        self.as_ref().gateways()
    }
    fn udp_routes(&self) -> Vec<Arc<UdpRoute>> {
        self.as_ref().udp_routes()
    }
    fn secrets(&self) -> Vec<Arc<Secret>> {
        self.as_ref().secrets()
    }
    fn services(&self) -> Vec<Arc<Service>> {
        self.as_ref().services()
    }
}

/// Stable identity of an object: `namespace/name`, or just `name` for cluster scoped objects.
pub fn object_key<K: Resource>(obj: &K) -> String {
    let name = obj.meta().name.as_deref().unwrap_or_default();
    match obj.meta().namespace.as_deref() {
        Some(namespace) => format!("{namespace}/{name}"),
        None => name.to_string(),
    }
}

fn is_named<K: Resource>(obj: &K, namespace: Option<&str>, name: &str) -> bool {
    obj.meta().namespace.as_deref() == namespace && obj.meta().name.as_deref() == Some(name)
}
