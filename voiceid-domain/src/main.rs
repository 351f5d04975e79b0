//! voiceid-domain: run one handler invocation for a Voice ID domain.
//!
//! Reads a handler request (and optionally the context saved from a previous
//! in-progress event), runs the requested lifecycle action against the
//! control plane, and writes the progress event as JSON to stdout. Logs go
//! to stderr.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voiceid_domain::{
    handle_request, Action, GrpcDomainClient, HandlerConfig, OperationContext,
    ResourceHandlerRequest, StabilizationConfig,
};

/// Voice ID domain resource handler
#[derive(Parser, Debug)]
#[command(name = "voiceid-domain", version, about)]
struct Args {
    /// Control-plane endpoint (e.g., http://[::1]:50070)
    #[arg(long, default_value = "http://[::1]:50070")]
    endpoint: String,

    /// Lifecycle action to run
    #[arg(long, value_enum)]
    action: Action,

    /// Handler request JSON file ("-" for stdin)
    #[arg(long, default_value = "-")]
    request: PathBuf,

    /// Context JSON from a previous in-progress event
    #[arg(long)]
    context: Option<PathBuf>,

    /// Update stabilization budget in seconds
    #[arg(long, default_value = "1800")]
    stabilization_timeout: u64,

    /// Delay between update stabilization probes in seconds
    #[arg(long, default_value = "60")]
    stabilization_delay: u64,

    /// Seconds one invocation may spend stabilizing before returning in-progress
    #[arg(long)]
    invocation_window: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voiceid_domain=info,tonic=warn,tower=warn,hyper=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let request: ResourceHandlerRequest =
        serde_json::from_str(&read_input(&args.request)?).context("Invalid handler request")?;
    let context: OperationContext = match &args.context {
        Some(path) => serde_json::from_str(&read_input(path)?).context("Invalid context")?,
        None => OperationContext::default(),
    };

    let config = handler_config(&args);

    info!("Running {:?} against {}", args.action, args.endpoint);
    let client = GrpcDomainClient::connect(&args.endpoint).await?;

    let event = handle_request(args.action, &request, context, &client, &config).await;
    println!("{}", serde_json::to_string(&event)?);

    Ok(())
}

fn handler_config(args: &Args) -> HandlerConfig {
    let mut update = StabilizationConfig::new(
        Duration::from_secs(args.stabilization_timeout),
        Duration::from_secs(args.stabilization_delay),
    );
    let mut config = HandlerConfig::default();
    if let Some(window) = args.invocation_window {
        let window = Duration::from_secs(window);
        update = update.with_invocation_window(window);
        config.delete_stabilization = config.delete_stabilization.with_invocation_window(window);
    }
    config.update_stabilization = update;
    config
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
