pub use k8s_gateway_api::{BackendObjectReference, BackendRef, CommonRouteSpec, ParentReference, RouteParentStatus, RouteStatus, UdpRoute, UdpRouteRule, UdpRouteSpec, UdpRouteStatus};

/// Parent references of a route, in declaration order.
pub fn parent_refs(route: &UdpRoute) -> &[ParentReference] {
    route.spec.inner.parent_refs.as_deref().unwrap_or_default()
}

/// A route status with no parent reported yet.
pub fn empty_route_status() -> UdpRouteStatus {
    UdpRouteStatus {
        inner: RouteStatus { parents: vec![] },
    }
}
