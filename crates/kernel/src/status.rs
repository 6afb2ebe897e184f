//! Status synthesis for gateways, their listeners and the routes attached to them.
//!
//! Every condition written here carries the generation of its object as of the pass.
use stunner_gateway_config::service::address::PublicAddress;
use stunner_gateway_model::{
    condition::{gateway as gw_cond, listener as listener_cond, route as route_cond, ConditionStatus},
    constants::{GATEWAY_API_GROUP, UDP_ROUTE_KIND},
    empty_gateway_status, empty_route_status, parent_refs, Condition, Gateway, GatewayStatus, ListenerStatus, RouteGroupKind, RouteParentStatus, UdpRoute,
};

use crate::{
    condition::{new_condition, upsert_condition},
    matcher::parent_ref_matches_listener,
    RenderError,
};

fn generation_of(gateway: &Gateway) -> i64 {
    gateway.metadata.generation.unwrap_or(0)
}

fn status_mut(gateway: &mut Gateway) -> &mut GatewayStatus {
    gateway.status.get_or_insert_with(empty_gateway_status)
}

fn conditions_mut(gateway: &mut Gateway) -> &mut Vec<Condition> {
    status_mut(gateway).conditions.get_or_insert_with(Vec::new)
}

fn listener_statuses_mut(gateway: &mut Gateway) -> &mut Vec<ListenerStatus> {
    status_mut(gateway).listeners.get_or_insert_with(Vec::new)
}

fn empty_listener_status(name: String) -> ListenerStatus {
    ListenerStatus {
        name,
        supported_kinds: supported_kinds(),
        attached_routes: 0,
        conditions: vec![],
    }
}

fn supported_kinds() -> Vec<RouteGroupKind> {
    vec![RouteGroupKind {
        group: Some(GATEWAY_API_GROUP.to_string()),
        kind: UDP_ROUTE_KIND.to_string(),
    }]
}

/// Mark the gateway as claimed by this controller.
pub fn set_gateway_scheduled(gateway: &mut Gateway, controller_name: &str) {
    let generation = generation_of(gateway);
    upsert_condition(
        conditions_mut(gateway),
        new_condition(
            gw_cond::SCHEDULED,
            ConditionStatus::True,
            gw_cond::REASON_SCHEDULED,
            format!("gateway under processing by controller {controller_name}"),
            generation,
        ),
    );
}

pub fn set_gateway_ready(gateway: &mut Gateway) {
    let generation = generation_of(gateway);
    upsert_condition(
        conditions_mut(gateway),
        new_condition(gw_cond::READY, ConditionStatus::True, gw_cond::REASON_READY, "gateway rendered", generation),
    );
}

/// Publish the resolved public address, or clear it.
pub fn set_gateway_addresses(gateway: &mut Gateway, public: Option<&PublicAddress>) {
    status_mut(gateway).addresses = public.map(|public| vec![public.address.clone()]);
}

/// Align the listener status list with the spec listeners.
///
/// Entries are matched by name so conditions of surviving listeners carry over; the result
/// has one entry per spec listener, in spec order.
pub fn reset_listener_statuses(gateway: &mut Gateway) {
    let names = gateway.spec.listeners.iter().map(|l| l.name.clone()).collect::<Vec<_>>();
    let statuses = listener_statuses_mut(gateway);
    let mut previous = std::mem::take(statuses);
    *statuses = names
        .into_iter()
        .map(|name| match previous.iter().position(|s| s.name == name) {
            Some(index) => previous.swap_remove(index),
            None => empty_listener_status(name),
        })
        .collect();
}

/// Record the outcome of rendering one listener.
///
/// `result` carries the number of attached routes on success. `ready` tells whether the
/// listener is reachable from outside, i.e. its public address is known.
pub fn set_listener_status(gateway: &mut Gateway, listener_name: &str, ready: bool, result: Result<usize, &RenderError>) {
    let generation = generation_of(gateway);
    let statuses = listener_statuses_mut(gateway);
    let index = match statuses.iter().position(|s| s.name == listener_name) {
        Some(index) => index,
        None => {
            statuses.push(empty_listener_status(listener_name.to_string()));
            statuses.len() - 1
        }
    };
    let Some(listener_status) = statuses.get_mut(index) else {
        return;
    };
    listener_status.supported_kinds = supported_kinds();
    let conditions = &mut listener_status.conditions;
    match result {
        Ok(attached_routes) => {
            listener_status.attached_routes = u16::try_from(attached_routes).unwrap_or(u16::MAX);
            upsert_condition(
                conditions,
                new_condition(listener_cond::DETACHED, ConditionStatus::False, listener_cond::REASON_ATTACHED, "listener accepted", generation),
            );
            upsert_condition(
                conditions,
                new_condition(listener_cond::RESOLVED_REFS, ConditionStatus::True, listener_cond::REASON_RESOLVED_REFS, "listener object references successfully resolved", generation),
            );
            let ready_condition = if ready {
                new_condition(listener_cond::READY, ConditionStatus::True, listener_cond::REASON_READY, "public address found", generation)
            } else {
                new_condition(listener_cond::READY, ConditionStatus::False, listener_cond::REASON_PENDING, "public address pending", generation)
            };
            upsert_condition(conditions, ready_condition);
        }
        Err(error) => {
            listener_status.attached_routes = 0;
            let message = error.to_string();
            upsert_condition(
                conditions,
                new_condition(listener_cond::DETACHED, ConditionStatus::True, listener_cond::REASON_UNSUPPORTED_PROTOCOL, message.clone(), generation),
            );
            upsert_condition(
                conditions,
                new_condition(listener_cond::RESOLVED_REFS, ConditionStatus::False, listener_cond::REASON_UNSUPPORTED_PROTOCOL, message.clone(), generation),
            );
            let ready_condition = if ready {
                new_condition(listener_cond::READY, ConditionStatus::False, listener_cond::REASON_INVALID, message, generation)
            } else {
                new_condition(listener_cond::READY, ConditionStatus::False, listener_cond::REASON_PENDING, message, generation)
            };
            upsert_condition(conditions, ready_condition);
        }
    }
}

/// Drop every condition, listener status and address of the gateway.
pub fn clear_gateway_status(gateway: &mut Gateway) {
    if let Some(status) = gateway.status.as_mut() {
        status.conditions = None;
        status.listeners = None;
        status.addresses = None;
    }
}

/// Accept the route on every parent reference that attaches it to the gateway.
pub fn set_route_parent_status(route: &mut UdpRoute, gateway: &Gateway, controller_name: &str, backends_resolved: bool) {
    let generation = route.metadata.generation.unwrap_or(0);
    let namespace = route.metadata.namespace.clone().unwrap_or_default();
    let parents = parent_refs(route)
        .iter()
        .filter(|parent| gateway.spec.listeners.iter().any(|listener| parent_ref_matches_listener(parent, &namespace, gateway, listener)))
        .cloned()
        .collect::<Vec<_>>();
    let statuses = &mut route.status.get_or_insert_with(empty_route_status).inner.parents;
    for parent_ref in parents {
        let index = match statuses.iter().position(|p| p.parent_ref == parent_ref && p.controller_name == controller_name) {
            Some(index) => index,
            None => {
                statuses.push(RouteParentStatus {
                    parent_ref,
                    controller_name: controller_name.to_string(),
                    conditions: vec![],
                });
                statuses.len() - 1
            }
        };
        let Some(parent_status) = statuses.get_mut(index) else {
            continue;
        };
        upsert_condition(
            &mut parent_status.conditions,
            new_condition(route_cond::ACCEPTED, ConditionStatus::True, route_cond::REASON_ACCEPTED, "parent accepts the route", generation),
        );
        let resolved = if backends_resolved {
            new_condition(route_cond::RESOLVED_REFS, ConditionStatus::True, route_cond::REASON_RESOLVED_REFS, "backend references resolved", generation)
        } else {
            new_condition(route_cond::RESOLVED_REFS, ConditionStatus::False, route_cond::REASON_BACKEND_NOT_FOUND, "one or more backend services not found", generation)
        };
        upsert_condition(&mut parent_status.conditions, resolved);
    }
}
