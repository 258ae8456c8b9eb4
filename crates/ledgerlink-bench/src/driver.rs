//! Concurrent submission driver.
//!
//! All submissions run in one `JoinSet`; the report is computed only after
//! the set has drained, so it reflects exactly the requested number of
//! completions no matter how individual submissions fared.

use std::sync::Arc;

use tokio::task::JoinSet;

use ledgerlink_core::error::{LinkError, Result};
use ledgerlink_core::stats::LatencyStats;
use ledgerlink_core::timing::SpanTimers;
use ledgerlink_gateway::AssetContract;

use crate::report::BenchReport;

/// Span covering the whole submit window, first dispatch to last completion.
pub const SUBMIT_SPAN: &str = "Submit";

/// Dispatch `requested` concurrent change-owner submissions and reduce the
/// outcomes to one report.
///
/// Each submission is a self-transfer: record i keeps its owner, so the
/// write path is exercised without mutating the dataset. Submission i times
/// itself under the span `tx#i`; distinct keys keep concurrent spans from
/// clobbering each other. A failed or panicked submission is logged and
/// counted, never propagated, so the completion count stays exact.
pub async fn run_benchmark(
    contract: Arc<dyn AssetContract>,
    timers: Arc<SpanTimers>,
    requested: usize,
) -> Result<BenchReport> {
    let assets = contract.query_all_assets().await?;
    if assets.len() < requested {
        return Err(LinkError::Config(format!(
            "ledger holds {} assets, benchmark needs {requested}",
            assets.len()
        )));
    }
    tracing::info!(requested, available = assets.len(), "submit window open");

    timers.start(SUBMIT_SPAN);
    let mut tasks = JoinSet::new();
    for (index, asset) in assets.into_iter().take(requested).enumerate() {
        let contract = Arc::clone(&contract);
        let timers = Arc::clone(&timers);
        tasks.spawn(async move {
            let span = format!("tx#{index}");
            timers.start(&span);
            let result = contract
                .change_asset_owner(&asset.id, &asset.owner, &asset.owner)
                .await;
            let elapsed = timers.stop(&span);
            match result {
                Ok(_) => elapsed,
                Err(e) => {
                    tracing::warn!(tx = index, error = %e, "submission failed");
                    None
                }
            }
        });
    }

    let mut completed = 0usize;
    let mut failed = 0usize;
    let mut samples = LatencyStats::new();
    while let Some(joined) = tasks.join_next().await {
        completed += 1;
        match joined {
            Ok(Some(elapsed)) => samples.record(elapsed),
            Ok(None) => failed += 1,
            Err(e) => {
                tracing::warn!(error = %e, "submission task aborted");
                failed += 1;
            }
        }
    }
    if completed != requested {
        return Err(LinkError::Internal(format!(
            "completion mismatch: {completed} of {requested} submissions accounted for"
        )));
    }

    let window = timers
        .stop(SUBMIT_SPAN)
        .ok_or_else(|| LinkError::Internal("submit span was never started".to_string()))?;
    tracing::info!(
        succeeded = samples.len(),
        failed,
        "submit window closed"
    );
    Ok(BenchReport {
        requested,
        failed,
        samples,
        window,
    })
}
