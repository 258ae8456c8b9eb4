//! Parallel fan-out delivery to subscribers.

use std::time::Duration;

use bytes::Bytes;
use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use serde::Serialize;

use ledgerlink_core::error::LinkError;

/// Outcome of one fan-out pass. Serialized as the ingest response body.
#[derive(Debug, Serialize)]
pub struct DeliveryReport {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: Vec<DeliveryFailure>,
}

#[derive(Debug, Serialize)]
pub struct DeliveryFailure {
    pub url: String,
    pub error: String,
}

/// POST `body` to every target in parallel. Each delivery runs under its own
/// timeout and failures are collected, not propagated, so one dead or slow
/// subscriber cannot stall the rest of the pass.
pub async fn fan_out(
    http: &reqwest::Client,
    targets: &[String],
    body: Bytes,
    per_target_timeout: Duration,
) -> DeliveryReport {
    let mut futs = FuturesUnordered::new();
    for url in targets {
        let http = http.clone();
        let body = body.clone();
        let url = url.clone();
        futs.push(async move {
            let result = match tokio::time::timeout(
                per_target_timeout,
                deliver_one(&http, &url, body),
            )
            .await
            {
                Ok(r) => r,
                Err(_) => Err(LinkError::Connect(format!(
                    "delivery timed out after {}ms",
                    per_target_timeout.as_millis()
                ))),
            };
            (url, result)
        });
    }

    let mut report = DeliveryReport {
        attempted: targets.len(),
        delivered: 0,
        failed: Vec::new(),
    };
    while let Some((url, result)) = futs.next().await {
        match result {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                tracing::warn!(%url, error = %e, "subscriber delivery failed");
                report.failed.push(DeliveryFailure {
                    url,
                    error: e.to_string(),
                });
            }
        }
    }
    report
}

async fn deliver_one(http: &reqwest::Client, url: &str, body: Bytes) -> Result<(), LinkError> {
    let response = http
        .post(url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() || e.is_connect() {
                LinkError::Connect(format!("deliver: {e}"))
            } else {
                LinkError::Internal(format!("deliver: {e}"))
            }
        })?;
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(LinkError::Rejected(format!("subscriber returned {status}")))
    }
}
