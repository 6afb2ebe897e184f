//! # Stunner gateway kernel crate.
//!
//! This crate renders gateway classes into TURN relay configuration and synthesizes the status
//! of the objects involved.

#![deny(clippy::unwrap_used, clippy::dbg_macro, clippy::unimplemented, clippy::todo, clippy::missing_safety_doc)]
#![warn(clippy::missing_errors_doc, clippy::inline_always, clippy::fn_params_excessive_bools, missing_debug_implementations)]
/// cluster rendering from route backends
pub mod cluster;
/// ordered condition lists
pub mod condition;
mod error;
/// single listener rendering
pub mod listener;
/// object selection and route attachment
pub mod matcher;
/// render and finalize passes
pub mod render;
/// gateway, listener and route status
pub mod status;
/// certificate resolution
pub mod tls;

pub use error::RenderError;
pub use render::{finalize, render_class, FinalizeOutcome, RenderOutcome};
pub use stunner_gateway_config as config;
pub use stunner_gateway_model as model;
