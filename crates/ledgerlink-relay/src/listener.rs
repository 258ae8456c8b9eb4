//! Contract event listener.
//!
//! Consumes the contract event stream and keeps the subscriber set in step
//! with on-chain control events. Only events published under this station's
//! key are acted on; everything else on the channel is ignored.

use std::time::Duration;

use ledgerlink_core::control::SubscriberUpdate;
use ledgerlink_core::error::ErrorKind;
use ledgerlink_core::event::ContractEvent;
use ledgerlink_gateway::{Contract, ContractEventStream};

use crate::app_state::AppState;

const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// What one contract event did to the subscriber set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Applied,
    Ignored,
    Rejected,
}

impl EventOutcome {
    pub fn as_label(&self) -> &'static str {
        match self {
            EventOutcome::Applied => "applied",
            EventOutcome::Ignored => "ignored",
            EventOutcome::Rejected => "rejected",
        }
    }
}

/// Apply one event. Foreign event names are ignored; malformed control
/// payloads are rejected without touching the set.
pub async fn apply_event(state: &AppState, event: &ContractEvent) -> EventOutcome {
    if event.name != state.cfg().ledger.station_key {
        tracing::debug!(event = %event.name, "ignoring event for another station");
        return EventOutcome::Ignored;
    }
    let update = match SubscriberUpdate::parse(&event.payload) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!(error = %e, "bad subscriber control payload");
            return EventOutcome::Rejected;
        }
    };
    let applied = state.subscribers().apply(&update).await;
    let count = state.subscribers().len().await;
    state.metrics().subscribers_active.set(count as i64);
    tracing::info!(
        url = update.url(),
        result = applied.as_str(),
        subscribers = count,
        "subscriber set updated"
    );
    EventOutcome::Applied
}

/// Run until the process exits: consume events, apply them, and redial the
/// stream after a fixed delay whenever it drops.
pub async fn run(state: AppState, contract: Contract, mut stream: ContractEventStream) {
    loop {
        state.set_listener_up(true);
        read_stream(&state, &mut stream).await;
        state.set_listener_up(false);

        stream = loop {
            tokio::time::sleep(RECONNECT_DELAY).await;
            match contract.events().await {
                Ok(s) => break s,
                Err(e) => tracing::warn!(error = %e, "event stream redial failed"),
            }
        };
    }
}

async fn read_stream(state: &AppState, stream: &mut ContractEventStream) {
    loop {
        match stream.next_event().await {
            Ok(Some(event)) => {
                let outcome = apply_event(state, &event).await;
                state
                    .metrics()
                    .events_seen
                    .inc(&[("outcome", outcome.as_label())]);
            }
            Ok(None) => {
                tracing::warn!("event stream closed");
                return;
            }
            // A garbled frame is skippable; the stream itself is fine.
            Err(e) if e.kind() == ErrorKind::Decode => {
                tracing::warn!(error = %e, "skipping undecodable event frame");
                state
                    .metrics()
                    .events_seen
                    .inc(&[("outcome", "rejected")]);
            }
            Err(e) => {
                tracing::warn!(error = %e, "event stream read failed");
                return;
            }
        }
    }
}
