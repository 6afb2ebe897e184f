#![warn(clippy::indexing_slicing, clippy::unwrap_used, clippy::dbg_macro, clippy::undocumented_unsafe_blocks)]
//! This crate is aim to supply the renderer with the objects it reads, and to package what it writes.

/// re-export stunner_gateway_model
pub use stunner_gateway_model as model;
/// Store traits and backends
pub mod service;

pub use model::*;
/// The persisted artifact of a render pass
pub mod config_map;
