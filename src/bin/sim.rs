//! vspark Simulator Binary
//!
//! Runs a simulated VoodooSpark device for local testing.

use clap::Parser;
use vspark::config::DEFAULT_PORT;
use vspark::network::Simulator;
use vspark::ProtocolProfile;
use tracing_subscriber::{fmt, EnvFilter};

/// vspark device simulator
#[derive(Parser, Debug)]
#[command(name = "vspark-sim")]
#[command(about = "Simulated VoodooSpark device")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value_t = format!("127.0.0.1:{}", DEFAULT_PORT))]
    listen: String,

    /// Protocol profile (standard or legacy)
    #[arg(short, long, default_value = "standard")]
    profile: ProtocolProfile,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vspark=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("vspark simulator v{}", vspark::VERSION);
    tracing::info!("Listen address: {}", args.listen);
    tracing::info!("Protocol profile: {}", args.profile);

    let simulator = match Simulator::bind(&args.listen, args.profile) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start simulator: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = simulator.run() {
        tracing::error!("Simulator error: {}", e);
        std::process::exit(1);
    }
}
