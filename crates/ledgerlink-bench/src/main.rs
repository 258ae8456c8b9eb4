//! ledgerlink benchmark binary.
//!
//! Enrolls the benchmark identity, connects the gateway, then hands the
//! contract to the driver and prints its closing report.

use std::path::Path;
use std::process::exit;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use ledgerlink_bench::driver;
use ledgerlink_core::error::{LinkError, Result};
use ledgerlink_core::timing::SpanTimers;
use ledgerlink_gateway::ca::{self, CaClient};
use ledgerlink_gateway::{ConnectOptions, ConnectionProfile, Gateway, Wallet};

#[derive(Parser, Debug)]
#[command(
    name = "ledgerlink-bench",
    about = "Fire concurrent change-owner transactions and report latency"
)]
struct Args {
    /// Path to the connection profile JSON.
    #[arg(long, default_value = "connection.json")]
    profile: String,

    /// Wallet directory holding enrolled identities.
    #[arg(long, default_value = "wallet")]
    wallet: String,

    /// Channel to submit against.
    #[arg(long, default_value = "mychannel")]
    channel: String,

    /// Contract name on the channel.
    #[arg(long, default_value = "assets")]
    contract: String,

    /// Identity label used for submissions.
    #[arg(long, default_value = "appUser")]
    user: String,

    /// Registrar identity label.
    #[arg(long, default_value = "admin")]
    admin: String,

    /// Registrar enrollment secret.
    #[arg(long, default_value = "adminpw")]
    admin_secret: String,

    /// Affiliation for newly registered identities.
    #[arg(long, default_value = "org1.department1")]
    affiliation: String,

    /// CA name from the profile; defaults to the organization's first CA.
    #[arg(long)]
    ca_name: Option<String>,

    /// Number of concurrent change-owner submissions.
    #[arg(long, default_value_t = 1000)]
    count: usize,
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        tracing::error!(error = %e, kind = e.kind().as_str(), "benchmark failed");
        exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let profile = ConnectionProfile::load_from_file(Path::new(&args.profile))?;
    let msp_id = profile.msp_id()?.to_string();
    let wallet = Wallet::open_dir(&args.wallet)?;
    let ca = CaClient::new(profile.ca(args.ca_name.as_deref())?)?;
    ca::enroll_admin(&ca, &wallet, &msp_id, &args.admin, &args.admin_secret).await?;
    ca::register_and_enroll_user(
        &ca,
        &wallet,
        &msp_id,
        &args.admin,
        &args.admin_secret,
        &args.user,
        &args.affiliation,
    )
    .await?;

    let identity = wallet.get(&args.user)?.ok_or_else(|| {
        LinkError::Config(format!(
            "identity {} missing from wallet after enrollment",
            args.user
        ))
    })?;
    let gateway = Gateway::connect(&profile, &identity, ConnectOptions::default()).await?;
    let contract = gateway.network(&args.channel).contract(&args.contract);

    let timers = Arc::new(SpanTimers::new());
    let report = driver::run_benchmark(Arc::new(contract), timers, args.count).await?;
    println!("{report}");
    Ok(())
}
