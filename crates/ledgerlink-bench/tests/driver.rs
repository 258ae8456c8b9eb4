#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use ledgerlink_bench::driver::{self, SUBMIT_SPAN};
use ledgerlink_core::asset::Asset;
use ledgerlink_core::error::{LinkError, Result};
use ledgerlink_core::timing::SpanTimers;
use ledgerlink_gateway::AssetContract;

/// In-process contract: optional per-asset delay, failure, or panic.
#[derive(Default)]
struct StubContract {
    assets: Vec<Asset>,
    delays: HashMap<String, Duration>,
    failing: HashSet<String>,
    panicking: HashSet<String>,
}

#[async_trait]
impl AssetContract for StubContract {
    async fn query_all_assets(&self) -> Result<Vec<Asset>> {
        Ok(self.assets.clone())
    }

    async fn change_asset_owner(
        &self,
        id: &str,
        current_owner: &str,
        new_owner: &str,
    ) -> Result<Asset> {
        if let Some(delay) = self.delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
        if self.panicking.contains(id) {
            panic!("stub told to panic for {id}");
        }
        if self.failing.contains(id) {
            return Err(LinkError::Rejected(format!("asset {id} is locked")));
        }
        let stored = self
            .assets
            .iter()
            .find(|a| a.id == id)
            .unwrap_or_else(|| panic!("unknown asset {id}"));
        assert_eq!(
            current_owner, stored.owner,
            "driver must pass the record's current owner"
        );
        assert_eq!(
            new_owner, stored.owner,
            "benchmark submissions are self-transfers"
        );
        let mut updated = stored.clone();
        updated.owner = new_owner.to_string();
        Ok(updated)
    }
}

fn asset(i: usize) -> Asset {
    Asset {
        id: format!("asset{i}"),
        holder: format!("holder{i}"),
        owner: format!("owner{i}"),
        station: format!("st-{i}"),
    }
}

fn stub_with(count: usize) -> StubContract {
    StubContract {
        assets: (0..count).map(asset).collect(),
        ..StubContract::default()
    }
}

#[tokio::test]
async fn zero_latency_stubs_produce_one_complete_report() {
    let contract = Arc::new(stub_with(8));
    let timers = Arc::new(SpanTimers::new());
    let report = driver::run_benchmark(contract, Arc::clone(&timers), 8)
        .await
        .expect("benchmark must succeed");

    assert_eq!(report.requested, 8);
    assert_eq!(report.failed, 0);
    assert_eq!(report.succeeded(), 8);
    assert!(report.samples.min() <= report.samples.mean());
    assert!(report.samples.mean() <= report.samples.max());
    assert!((report.tps() - 8.0 / report.window.as_secs_f64()).abs() < 1e-9);

    // One submit window, one cycle per transaction key.
    assert_eq!(timers.stats(SUBMIT_SPAN).unwrap().count, 1);
    assert_eq!(timers.stats("tx#0").unwrap().count, 1);
    assert_eq!(timers.stats("tx#7").unwrap().count, 1);
    assert!(timers.stats("tx#8").is_none());
}

#[tokio::test]
async fn fixed_delays_shape_the_report() {
    let mut contract = stub_with(3);
    contract.delays = HashMap::from([
        ("asset0".to_string(), Duration::from_millis(10)),
        ("asset1".to_string(), Duration::from_millis(20)),
        ("asset2".to_string(), Duration::from_millis(30)),
    ]);
    let timers = Arc::new(SpanTimers::new());
    let report = driver::run_benchmark(Arc::new(contract), timers, 3)
        .await
        .expect("benchmark must succeed");

    assert_eq!(report.succeeded(), 3);
    let min = report.samples.min();
    let max = report.samples.max();
    let mean = report.samples.mean();
    assert!(min >= Duration::from_millis(10) && min < Duration::from_millis(20));
    assert!(max >= Duration::from_millis(30) && max < Duration::from_millis(55));
    assert!(mean >= Duration::from_millis(15) && mean <= Duration::from_millis(35));

    // Concurrent, not serial: the window tracks the slowest submission,
    // not the sum of all three.
    assert!(report.window >= Duration::from_millis(30));
    assert!(report.window < Duration::from_millis(55), "window {:?}", report.window);
    assert!((report.tps() - 3.0 / report.window.as_secs_f64()).abs() < 1e-9);
}

#[tokio::test]
async fn failed_submission_is_counted_without_aborting() {
    let mut contract = stub_with(4);
    contract.failing = HashSet::from(["asset2".to_string()]);
    let timers = Arc::new(SpanTimers::new());
    let report = driver::run_benchmark(Arc::new(contract), timers, 4)
        .await
        .expect("a rejected submission must not fail the run");

    assert_eq!(report.requested, 4);
    assert_eq!(report.failed, 1);
    assert_eq!(report.succeeded(), 3);
}

#[tokio::test]
async fn panicked_submission_counts_as_failed() {
    let mut contract = stub_with(4);
    contract.panicking = HashSet::from(["asset1".to_string()]);
    let timers = Arc::new(SpanTimers::new());
    let report = driver::run_benchmark(Arc::new(contract), timers, 4)
        .await
        .expect("a panicked submission must not fail the run");

    assert_eq!(report.failed, 1);
    assert_eq!(report.succeeded(), 3);
}

#[tokio::test]
async fn short_dataset_is_rejected_up_front() {
    let contract = Arc::new(stub_with(2));
    let timers = Arc::new(SpanTimers::new());
    let err = driver::run_benchmark(contract, Arc::clone(&timers), 3)
        .await
        .expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CONFIG");
    assert!(err.to_string().contains("holds 2 assets"));

    // Nothing was dispatched, so no submit window was opened.
    assert!(timers.stats(SUBMIT_SPAN).is_none());
}
