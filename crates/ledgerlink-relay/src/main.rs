//! ledgerlink relay service.
//!
//! Startup order matters: config, profile, wallet, enrollment, gateway
//! session, then the event stream. Only once all of those hold does the
//! HTTP side come up; a relay that cannot see control events must not
//! accept sensor traffic as if it could.

use std::net::SocketAddr;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use ledgerlink_core::error::{LinkError, Result};
use ledgerlink_gateway::ca::{self, CaClient};
use ledgerlink_gateway::{ConnectOptions, ConnectionProfile, Gateway, Wallet};
use ledgerlink_relay::{app_state, config, listener, router};

#[derive(Parser, Debug)]
#[command(
    name = "ledgerlink-relay",
    about = "Relay sensor readings to HTTP subscribers managed on-chain"
)]
struct Args {
    /// Path to the relay config file.
    #[arg(long, default_value = "ledgerlink.yaml")]
    config: String,
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        tracing::error!(error = %e, kind = e.kind().as_str(), "relay failed");
        exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let cfg = config::load_from_file(&args.config)?;
    let listen: SocketAddr = cfg
        .http
        .listen
        .parse()
        .map_err(|e| LinkError::Config(format!("http.listen must be a socket address: {e}")))?;
    if cfg.http.auth_token.is_none() {
        tracing::warn!("http.auth_token not set, sensor ingest is unauthenticated");
    }

    let profile = ConnectionProfile::load_from_file(Path::new(&cfg.ledger.profile))?;
    let msp_id = profile.msp_id()?.to_string();
    let wallet = Wallet::open_dir(&cfg.ledger.wallet)?;
    let ca = CaClient::new(profile.ca(cfg.ledger.ca_name.as_deref())?)?;
    ca::enroll_admin(
        &ca,
        &wallet,
        &msp_id,
        &cfg.ledger.admin_id,
        &cfg.ledger.admin_secret,
    )
    .await?;
    ca::register_and_enroll_user(
        &ca,
        &wallet,
        &msp_id,
        &cfg.ledger.admin_id,
        &cfg.ledger.admin_secret,
        &cfg.ledger.user_id,
        &cfg.ledger.affiliation,
    )
    .await?;

    let identity = wallet.get(&cfg.ledger.user_id)?.ok_or_else(|| {
        LinkError::Config(format!(
            "identity {} missing from wallet after enrollment",
            cfg.ledger.user_id
        ))
    })?;
    let gateway = Gateway::connect(&profile, &identity, ConnectOptions::default()).await?;
    let contract = gateway
        .network(&cfg.ledger.channel)
        .contract(&cfg.ledger.contract);

    // Fail fast: without the event stream the subscriber set can never change.
    let stream = contract.events().await?;

    let state = app_state::AppState::new(cfg)?;
    tokio::spawn(listener::run(state.clone(), contract, stream));

    let app = router::build_router(state);
    tracing::info!(%listen, "ledgerlink-relay starting");
    let tcp = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| LinkError::Internal(format!("bind {listen}: {e}")))?;
    axum::serve(tcp, app)
        .await
        .map_err(|e| LinkError::Internal(format!("server failed: {e}")))?;
    Ok(())
}
