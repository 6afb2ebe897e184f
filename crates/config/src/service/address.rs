use stunner_gateway_model::{constants::RELATED_GATEWAY_ANNOTATION, hostname_address, ip_address, Gateway, GatewayAddress, Service};

use super::Store;

/// The externally reachable address of a gateway, as published by its load balancer service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicAddress {
    pub address: GatewayAddress,
    /// First port of the service, 0 if it has none.
    pub port: i32,
}

/// Every public address found for the gateway, in service order.
///
/// A service is considered when it lives in the gateway's namespace and its
/// related-gateway annotation reads `<namespace>/<name>` of the gateway.
pub fn public_addresses_for_gateway<S: Store + ?Sized>(store: &S, gateway: &Gateway) -> Vec<PublicAddress> {
    let namespace = gateway.metadata.namespace.as_deref().unwrap_or_default();
    let related = format!("{}/{}", namespace, gateway.metadata.name.as_deref().unwrap_or_default());
    store
        .services()
        .iter()
        .filter(|svc| svc.metadata.namespace.as_deref().unwrap_or_default() == namespace)
        .filter(|svc| svc.metadata.annotations.as_ref().and_then(|a| a.get(RELATED_GATEWAY_ANNOTATION)).is_some_and(|v| *v == related))
        .filter_map(|svc| service_public_address(svc))
        .collect()
}

/// The first public address of the gateway, if any.
pub fn public_address_for_gateway<S: Store + ?Sized>(store: &S, gateway: &Gateway) -> Option<PublicAddress> {
    let addresses = public_addresses_for_gateway(store, gateway);
    if addresses.len() > 1 {
        tracing::debug!(
            "[SG.Store] {} services front gateway {}, using the first one",
            addresses.len(),
            gateway.metadata.name.as_deref().unwrap_or_default()
        );
    }
    addresses.into_iter().next()
}

fn service_public_address(svc: &Service) -> Option<PublicAddress> {
    let ingress = svc.status.as_ref()?.load_balancer.as_ref()?.ingress.as_ref()?.first()?;
    let address = match (ingress.ip.as_deref(), ingress.hostname.as_deref()) {
        (Some(ip), _) if !ip.is_empty() => ip_address(ip),
        (_, Some(hostname)) if !hostname.is_empty() => hostname_address(hostname),
        _ => return None,
    };
    let port = svc.spec.as_ref().and_then(|spec| spec.ports.as_ref()).and_then(|ports| ports.first()).map(|p| p.port).unwrap_or_default();
    Some(PublicAddress { address, port })
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use k8s_openapi::api::core::v1::{LoadBalancerIngress, LoadBalancerStatus, ServicePort, ServiceSpec, ServiceStatus};

    use super::*;
    use crate::service::memory::Memory;
    use stunner_gateway_model::{address_type, GatewaySpec};

    fn service(namespace: &str, related: &str, ip: &str) -> Service {
        let mut svc = Service::default();
        svc.metadata.name = Some("stunner-gateway-udp-svc".into());
        svc.metadata.namespace = Some(namespace.into());
        svc.metadata.annotations = Some(BTreeMap::from([(RELATED_GATEWAY_ANNOTATION.to_string(), related.to_string())]));
        svc.spec = Some(ServiceSpec {
            ports: Some(vec![ServicePort {
                port: 3478,
                ..Default::default()
            }]),
            ..Default::default()
        });
        svc.status = Some(ServiceStatus {
            load_balancer: Some(LoadBalancerStatus {
                ingress: Some(vec![LoadBalancerIngress {
                    ip: Some(ip.into()),
                    ..Default::default()
                }]),
            }),
            ..Default::default()
        });
        svc
    }

    fn gateway() -> Gateway {
        let mut gateway = Gateway::new(
            "gateway-1",
            GatewaySpec {
                gateway_class_name: "gatewayclass-ok".into(),
                listeners: vec![],
                addresses: None,
            },
        );
        gateway.metadata.namespace = Some("testnamespace".into());
        gateway
    }

    #[test]
    fn test_public_address() {
        let store = Memory::new();
        store.upsert(service("testnamespace", "testnamespace/gateway-1", "1.2.3.4"));
        let address = public_address_for_gateway(&store, &gateway()).expect("address");
        assert_eq!(address.address.value, "1.2.3.4");
        assert_eq!(address.address.r#type.as_deref(), Some(address_type::IP_ADDRESS));
        assert_eq!(address.port, 3478);
    }

    #[test]
    fn test_public_address_falls_back_to_hostname() {
        let store = Memory::new();
        let mut svc = service("testnamespace", "testnamespace/gateway-1", "");
        if let Some(ingress) = svc.status.as_mut().and_then(|s| s.load_balancer.as_mut()).and_then(|lb| lb.ingress.as_mut()) {
            ingress[0].hostname = Some("lb.example.com".into());
        }
        store.upsert(svc);
        let address = public_address_for_gateway(&store, &gateway()).expect("address");
        assert_eq!(address.address, hostname_address("lb.example.com"));
    }

    #[test]
    fn test_public_address_ignores_unrelated_services() {
        let store = Memory::new();
        store.upsert(service("othernamespace", "testnamespace/gateway-1", "1.2.3.4"));
        let mut unrelated = service("testnamespace", "testnamespace/gateway-2", "5.6.7.8");
        unrelated.metadata.name = Some("other".into());
        store.upsert(unrelated);
        assert!(public_address_for_gateway(&store, &gateway()).is_none());
    }
}
