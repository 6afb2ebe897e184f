use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};
use stunner_gateway_shell::{
    model::constants::{DEFAULT_CHANNEL_CAPACITY, DEFAULT_CONTROLLER_NAME},
    OperatorConfig,
};

/// Stunner gateway start up arguments
#[derive(Debug, Serialize, Deserialize, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The snapshot file holding the objects to render, `.json` or `.toml`
    #[arg(short, long, env)]
    pub snapshot: PathBuf,
    /// Gateway classes naming this controller are rendered
    #[arg(long, env, default_value = DEFAULT_CONTROLLER_NAME)]
    pub controller_name: String,
    /// Capacity of the event queue
    #[arg(long, env, default_value_t = DEFAULT_CHANNEL_CAPACITY)]
    pub channel_capacity: usize,
    /// The gateway class to render, by default the one owned by this controller
    #[arg(short, long)]
    pub class: Option<String>,
    /// Invalidate every gateway instead of rendering
    #[arg(long, conflicts_with = "class")]
    pub finalize: bool,
    /// Print the updated gateways and routes along with the config map
    #[arg(long)]
    pub status: bool,
}

impl Args {
    pub fn operator_config(&self) -> OperatorConfig {
        OperatorConfig {
            controller_name: self.controller_name.clone(),
            channel_capacity: self.channel_capacity,
        }
    }
}
