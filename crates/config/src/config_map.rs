use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use stunner_gateway_model::{constants::DEFAULT_CONFIG_DATA_KEY, ConfigMap, StunnerConfig};

/// Package a rendered configuration into an immutable config map.
///
/// `None` produces an empty value under the data key, which is what a finalized class leaves behind.
pub fn render_config_map(namespace: &str, name: &str, config: Option<&StunnerConfig>) -> Result<ConfigMap, serde_json::Error> {
    let value = match config {
        Some(config) => serde_json::to_string(config)?,
        None => String::new(),
    };
    Ok(ConfigMap {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        data: Some(BTreeMap::from([(DEFAULT_CONFIG_DATA_KEY.to_string(), value)])),
        immutable: Some(true),
        ..Default::default()
    })
}

/// Read back the configuration stored in a config map.
///
/// Returns `Ok(None)` when the data key is absent or empty.
pub fn parse_config_map(config_map: &ConfigMap) -> Result<Option<StunnerConfig>, serde_json::Error> {
    match config_map.data.as_ref().and_then(|data| data.get(DEFAULT_CONFIG_DATA_KEY)) {
        Some(value) if !value.is_empty() => serde_json::from_str(value).map(Some),
        _ => Ok(None),
    }
}
