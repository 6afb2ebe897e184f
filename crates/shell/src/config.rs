use serde::{Deserialize, Serialize};
use stunner_gateway_config::model::constants::{DEFAULT_CHANNEL_CAPACITY, DEFAULT_CONTROLLER_NAME};

/// Settings of an operator instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OperatorConfig {
    /// Gateway classes naming this controller are the ones this instance renders.
    pub controller_name: String,
    /// Capacity of the event queue; producers wait once it is full.
    pub channel_capacity: usize,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            controller_name: DEFAULT_CONTROLLER_NAME.to_string(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl OperatorConfig {
    pub fn with_controller_name(mut self, controller_name: impl Into<String>) -> Self {
        self.controller_name = controller_name.into();
        self
    }
}
