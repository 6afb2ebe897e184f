use std::path::Path;

use stunner_gateway_model::{BoxError, BoxResult, Snapshot};

use super::{
    config_format::{ConfigFormat, SnapshotFormat},
    memory::Memory,
};

/// Read a snapshot file, picking the format from its extension.
pub async fn load_snapshot(path: impl AsRef<Path>) -> BoxResult<Snapshot> {
    let path = path.as_ref();
    let format = path
        .extension()
        .and_then(SnapshotFormat::from_extension)
        .ok_or_else(|| BoxError::from(format!("unsupported snapshot file extension: {}", path.display())))?;
    tracing::debug!("[SG.Store] loading snapshot from {}", path.display());
    let bytes = tokio::fs::read(path).await?;
    let snapshot: Snapshot = format.de(&bytes)?;
    tracing::info!(
        "[SG.Store] snapshot loaded: {} gateway class(es), {} gateway(s), {} udp route(s)",
        snapshot.gateway_classes.len(),
        snapshot.gateways.len(),
        snapshot.udp_routes.len()
    );
    Ok(snapshot)
}

impl Memory {
    /// Create a store seeded from a snapshot file.
    pub async fn from_file(path: impl AsRef<Path>) -> BoxResult<Self> {
        Ok(Memory::from_snapshot(load_snapshot(path).await?))
    }
}
