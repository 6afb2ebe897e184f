use clap::Parser;
use serde_json::json;
use stunner_gateway_shell::BoxError;
mod args;
fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();
    let args = args::Args::parse();
    let rt = tokio::runtime::Builder::new_multi_thread().enable_all().thread_name(env!("CARGO_PKG_NAME")).build().expect("fail to build runtime");
    rt.block_on(async move {
        let shutdown_signal = stunner_gateway_shell::ctrl_c_cancel_token();
        let (handle, worker) = stunner_gateway_shell::startup_file(&args.snapshot, args.operator_config(), shutdown_signal.clone()).await?;
        let output = if args.finalize {
            let outcome = handle.finalize().await?;
            if args.status {
                json!({ "configMap": outcome.config_map, "gateways": outcome.gateways })
            } else {
                serde_json::to_value(&outcome.config_map)?
            }
        } else {
            let outcome = handle.render(args.class.as_deref()).await?;
            if args.status {
                json!({ "configMap": outcome.config_map, "gateways": outcome.gateways, "udpRoutes": outcome.routes })
            } else {
                serde_json::to_value(&outcome.config_map)?
            }
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        shutdown_signal.cancel();
        if let Err(e) = worker.await {
            tracing::error!("operator task failed: {e}");
        }
        Ok::<(), BoxError>(())
    })
}
