//! Contract event envelope codec.
//!
//! Events arrive on the event stream as JSON text frames:
//!
//! ```json
//! {"eventName": "SensorEvent", "payload": "<base64>"}
//! ```
//!
//! The payload is opaque bytes; interpreting it belongs to the consumer.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{LinkError, Result};

/// A decoded contract event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractEvent {
    pub name: String,
    pub payload: Bytes,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct EventEnvelope {
    #[serde(rename = "eventName")]
    event_name: String,
    payload: String,
}

/// Parse one event frame. Rejects unknown fields and malformed base64 so a
/// garbled frame surfaces as a `Decode` error instead of an empty payload.
pub fn decode_event(frame: &str) -> Result<ContractEvent> {
    let envelope: EventEnvelope =
        serde_json::from_str(frame).map_err(|e| LinkError::Decode(format!("event frame: {e}")))?;
    let payload = STANDARD
        .decode(envelope.payload.as_bytes())
        .map_err(|e| LinkError::Decode(format!("event payload base64: {e}")))?;
    Ok(ContractEvent {
        name: envelope.event_name,
        payload: Bytes::from(payload),
    })
}

/// Render an event as a wire frame. Inverse of [`decode_event`].
pub fn encode_event(name: &str, payload: &[u8]) -> Result<String> {
    let envelope = EventEnvelope {
        event_name: name.to_string(),
        payload: STANDARD.encode(payload),
    };
    serde_json::to_string(&envelope).map_err(|e| LinkError::Internal(format!("event frame: {e}")))
}
