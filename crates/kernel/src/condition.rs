//! Ordered condition lists.
//!
//! A condition list holds at most one condition per type. Updating a type keeps its
//! position, a new type is appended, so the order types were first set in is stable
//! across passes.
use chrono::Utc;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{Condition, Time};
use stunner_gateway_model::condition::ConditionStatus;

/// Build a condition stamped with the current time.
pub fn new_condition(type_: &str, status: ConditionStatus, reason: &str, message: impl Into<String>, generation: i64) -> Condition {
    Condition {
        type_: type_.to_string(),
        status: status.as_str().to_string(),
        reason: reason.to_string(),
        message: message.into(),
        observed_generation: Some(generation),
        last_transition_time: Time(Utc::now()),
    }
}

/// Insert or replace the condition of the same type.
///
/// The previous `lastTransitionTime` is kept when the status does not change.
pub fn upsert_condition(conditions: &mut Vec<Condition>, mut condition: Condition) {
    match conditions.iter_mut().find(|c| c.type_ == condition.type_) {
        Some(existing) => {
            if existing.status == condition.status {
                condition.last_transition_time = existing.last_transition_time.clone();
            }
            *existing = condition;
        }
        None => conditions.push(condition),
    }
}

pub fn find_condition<'a>(conditions: &'a [Condition], type_: &str) -> Option<&'a Condition> {
    conditions.iter().find(|c| c.type_ == type_)
}
