mod analyze_cmd;
mod config_cmd;
mod settings;
mod status_cmd;
mod terminal_output;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use tracing::{info, warn};

use leafscan_config::{LeafScanConfig, ServerConfig};
use leafscan_gateway::{start_server, GatewayState};
use leafscan_logging::init_logger;
use leafscan_media::UploadPolicy;
use leafscan_understanding::GoogleVisionProvider;

use analyze_cmd::AnalyzeInput;
use terminal_output::note_warn;

#[derive(Parser)]
#[command(name = "leafscan")]
#[command(about = "leafscan: plant leaf health analysis from photos")]
#[command(version)]
struct Cli {
    /// Path to config.yaml (defaults to ~/.leafscan/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP service
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Classify a saved label list or a photo
    #[command(group(ArgGroup::new("input").required(true).args(["labels", "image"])))]
    Analyze {
        /// JSON file with vision labels
        #[arg(long)]
        labels: Option<PathBuf>,
        /// Image file to send to the vision provider
        #[arg(long)]
        image: Option<PathBuf>,
        /// Print the raw result JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether a local service is running
    Status {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show the effective configuration (secrets masked)
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = settings::load(cli.config.as_deref()).await?;
    let _log_guard = init_logger(&settings::log_settings(&config));

    match cli.command {
        Commands::Serve { port } => {
            run_server(config, port).await?;
        }
        Commands::Analyze { labels, image, json } => {
            let input = match (labels, image) {
                (Some(path), _) => AnalyzeInput::Labels(path),
                (None, Some(path)) => AnalyzeInput::Image(path),
                (None, None) => bail!("either --labels or --image is required"),
            };
            analyze_cmd::run(&config, input, json).await?;
        }
        Commands::Status { port } => {
            status_cmd::run(port.unwrap_or(config.port())).await?;
        }
        Commands::Config => {
            config_cmd::run(&config, &settings::config_path(cli.config.as_deref()))?;
        }
    }

    Ok(())
}

async fn run_server(mut config: LeafScanConfig, port: Option<u16>) -> Result<()> {
    if let Some(port) = port {
        config.server.get_or_insert_with(ServerConfig::default).port = Some(port);
    }

    for warning in settings::serve_preflight(&config)? {
        warn!("Config warning: {warning}");
        note_warn(&warning);
    }

    let Some(api_key) = config.vision_api_key() else {
        bail!("No vision API key configured");
    };
    let vision = GoogleVisionProvider::new(api_key)
        .with_base_url(config.vision_base_url())
        .with_max_labels(config.max_labels());

    let state = GatewayState::new(Arc::new(vision))
        .with_upload_policy(UploadPolicy::new(config.max_upload_bytes()));

    let addr: SocketAddr = config
        .listen_addr()
        .parse()
        .with_context(|| format!("Invalid listen address for bind '{}'", config.bind()))?;

    info!(addr = %addr, "Starting leafscan service");
    start_server(addr, state).await
}
