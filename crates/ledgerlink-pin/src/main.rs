//! ledgerlink pinning binary.
//!
//! Uploads go to the pinning API with a bearer token; downloads come back
//! through the public gateway and are verified against an expected digest
//! when one is supplied.

use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use ledgerlink_core::error::{LinkError, Result};
use ledgerlink_core::stats::format_duration;
use ledgerlink_core::timing::SpanTimers;
use ledgerlink_pin::PinClient;

/// Span accumulating one cycle per upload or download round.
const SUBMIT_SPAN: &str = "Submit";

const JWT_ENV: &str = "PIN_SERVICE_JWT";

#[derive(Parser, Debug)]
#[command(
    name = "ledgerlink-pin",
    about = "Pin files to a remote service and fetch them back by CID"
)]
struct Args {
    /// Pinning API base URL.
    #[arg(long, default_value = "https://api.pinata.cloud")]
    api: String,

    /// Public gateway base URL for downloads.
    #[arg(long, default_value = "https://gateway.pinata.cloud")]
    gateway: String,

    /// Bearer JWT for uploads; falls back to the PIN_SERVICE_JWT variable.
    #[arg(long)]
    jwt: Option<String>,

    /// Run the operation this many times to build a running average.
    #[arg(long, default_value_t = 1)]
    repeat: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload one file and print its receipt.
    Upload {
        /// File to pin.
        file: PathBuf,
    },
    /// Download an object by content identifier.
    Download {
        /// Content identifier to fetch.
        cid: String,
        /// Write the object here instead of discarding it.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Expected SHA-256 (hex) of the content.
        #[arg(long)]
        sha256: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        tracing::error!(error = %e, kind = e.kind().as_str(), "pin operation failed");
        exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let jwt = match &args.command {
        Command::Upload { .. } => args.jwt.clone().or_else(env_jwt).ok_or_else(|| {
            LinkError::Config(format!("uploads need a token: pass --jwt or set {JWT_ENV}"))
        })?,
        // Downloads go through the public gateway, no token involved.
        Command::Download { .. } => args.jwt.clone().or_else(env_jwt).unwrap_or_default(),
    };
    let client = PinClient::new(&args.api, &args.gateway, &jwt)?;
    let timers = SpanTimers::new();

    for round in 1..=args.repeat {
        timers.start(SUBMIT_SPAN);
        match &args.command {
            Command::Upload { file } => {
                let receipt = client.upload_file(file).await?;
                println!("pinned {} ({} bytes)", receipt.ipfs_hash, receipt.pin_size);
            }
            Command::Download { cid, out, sha256 } => {
                let bytes = client.download(cid, sha256.as_deref()).await?;
                if let Some(path) = out {
                    tokio::fs::write(path, &bytes).await.map_err(|e| {
                        LinkError::Internal(format!("write {}: {e}", path.display()))
                    })?;
                }
                println!("fetched {cid} ({} bytes)", bytes.len());
            }
        }
        let elapsed = timers
            .stop(SUBMIT_SPAN)
            .ok_or_else(|| LinkError::Internal("submit span was never started".to_string()))?;
        println!("round {round}/{}: {}", args.repeat, format_duration(elapsed));
    }

    if let Some(stats) = timers.stats(SUBMIT_SPAN) {
        println!(
            "mean over {} round(s): {}",
            stats.count,
            format_duration(stats.mean())
        );
    }
    Ok(())
}

fn env_jwt() -> Option<String> {
    std::env::var(JWT_ENV).ok().filter(|v| !v.is_empty())
}
