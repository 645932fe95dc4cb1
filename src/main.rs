//! Usage Cluster Service
//!
//! Loads the trained artifacts, then serves the prediction form and API.

use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use usage_cluster_service::{
    ApiServer, ApiServerConfig, ArtifactManifest, ArtifactStore, ClusterModel, ClusterService,
    Error, ServiceMetrics,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Usage Cluster Service - behavioral cluster assignment for account usage
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// HTTP bind address
    #[arg(long, env = "LISTEN_ADDR", default_value = "127.0.0.1:5000")]
    listen_addr: String,

    /// Directory holding the trained artifacts
    #[arg(long, env = "ARTIFACT_DIR", default_value = ".")]
    artifact_dir: PathBuf,

    /// YAML manifest overriding artifact file names
    #[arg(long, env = "ARTIFACT_MANIFEST")]
    manifest: Option<PathBuf>,

    /// Maximum request body size in bytes
    #[arg(long, env = "MAX_BODY_BYTES", default_value = "65536")]
    max_body_bytes: usize,

    /// Per-request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "10")]
    request_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&args)?;

    info!("Starting Usage Cluster Service");
    info!("  Version: {}", usage_cluster_service::VERSION);
    info!("  Listen: {}", args.listen_addr);
    info!("  Artifacts: {}", args.artifact_dir.display());

    let listen_addr: SocketAddr = args
        .listen_addr
        .parse()
        .map_err(|e| Error::Configuration(format!("Invalid listen address: {}", e)))?;

    let manifest = match &args.manifest {
        Some(path) => ArtifactManifest::from_file(path)
            .with_context(|| format!("loading manifest {}", path.display()))?,
        None => ArtifactManifest::default(),
    };

    // Artifacts must be in memory before the listener accepts anything
    let artifacts = ArtifactStore::load(&args.artifact_dir, &manifest)
        .context("loading trained artifacts")?;
    info!(
        "Artifacts loaded ({} clusters)",
        artifacts.model().n_clusters()
    );

    let metrics = ServiceMetrics::new().context("registering metrics")?;
    let service = ClusterService::new(artifacts, metrics);

    let config = ApiServerConfig {
        listen_addr,
        request_timeout_secs: args.request_timeout_secs,
        max_body_size: args.max_body_bytes,
    };

    ApiServer::new(config, service).run().await?;

    info!("Service shutdown complete");
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("hyper=warn".parse()?)
        .add_directive("tower=warn".parse()?)
        .add_directive("tower_http=info".parse()?)
        .add_directive("axum=info".parse()?);

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }

    Ok(())
}
