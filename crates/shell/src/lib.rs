//! **Render Gateway API intent into TURN relay configuration.**
//!
//! The shell runs the render pipeline of [`stunner_gateway_kernel`] behind a single-consumer
//! event queue. Requests come in through an [`OperatorHandle`]; the [`Operator`] processes them
//! one at a time, strictly in arrival order, and answers each one on its own completion channel.
//!
//! ## startup
//! ### over any store
//! see [`startup`]
//! ### from a snapshot file
//! see [`startup_file`]
#![warn(clippy::unwrap_used)]

pub use stunner_gateway_config as config_service;
pub use stunner_gateway_config::model;
pub use stunner_gateway_config::model::{BoxError, BoxResult};
use stunner_gateway_config::service::Store;
pub use stunner_gateway_kernel as kernel;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

pub mod config;
pub mod event;
pub mod operator;

pub use config::OperatorConfig;
pub use event::{Event, OperatorError};
pub use operator::{InFlight, Operator, OperatorHandle};

/// # Startup the operator over a store
/// Returns the handle to send requests with and the worker task, which ends once
/// `shutdown_signal` fires.
#[instrument(skip(store, shutdown_signal))]
pub fn startup<S>(store: S, config: OperatorConfig, shutdown_signal: CancellationToken) -> (OperatorHandle, JoinHandle<()>)
where
    S: Store + 'static,
{
    info!("Stunner Gateway Meta Info: {:?}", Meta::new());
    let (operator, handle) = Operator::new(store, config);
    (handle, operator.spawn(shutdown_signal))
}

#[cfg(feature = "fs")]
/// # Startup the operator over a snapshot file
/// The format is picked from the file extension, `json` or `toml`.
pub async fn startup_file(
    path: impl AsRef<std::path::Path>,
    config: OperatorConfig,
    shutdown_signal: CancellationToken,
) -> Result<(OperatorHandle, JoinHandle<()>), BoxError> {
    use stunner_gateway_config::service::memory::Memory;
    let store = Memory::from_file(path).await?;
    Ok(startup(store, config, shutdown_signal))
}

#[derive(Debug, Clone, Copy)]
pub struct Meta {
    pub version: &'static str,
}

impl Meta {
    const DEFAULT: Meta = Self {
        version: env!("CARGO_PKG_VERSION"),
    };
    pub const fn new() -> Self {
        Self::DEFAULT
    }
}

impl Default for Meta {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub fn ctrl_c_cancel_token() -> CancellationToken {
    let cancel_token = CancellationToken::new();
    {
        let cancel_token = cancel_token.clone();
        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received ctrl+c signal, shutting down...");
            cancel_token.cancel();
        });
    }
    cancel_token
}
