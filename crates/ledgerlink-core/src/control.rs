//! Subscriber control payloads carried inside contract events.
//!
//! The contract emits `Send:<url>` to attach a forwarding target and
//! `Stop:<url>` to detach one. The verb is split from the URL at the first
//! colon only, so URLs with ports and paths (`http://host:3000/ingest`)
//! survive intact.

use crate::error::{LinkError, Result};

/// A parsed subscriber control instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriberUpdate {
    Add { url: String },
    Remove { url: String },
}

impl SubscriberUpdate {
    /// Parse a raw control payload.
    ///
    /// The payload must be UTF-8, carry a known verb, and name an `http` or
    /// `https` URL. Anything else is a `Decode` error.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(payload)
            .map_err(|_| LinkError::Decode("control payload is not utf-8".to_string()))?;
        let (verb, rest) = text
            .split_once(':')
            .ok_or_else(|| LinkError::Decode(format!("control payload has no verb: {text:?}")))?;
        let build = match verb {
            "Send" => |url: String| SubscriberUpdate::Add { url },
            "Stop" => |url: String| SubscriberUpdate::Remove { url },
            other => {
                return Err(LinkError::Decode(format!(
                    "unknown control verb: {other:?}"
                )))
            }
        };
        let url = rest.trim();
        if url.is_empty() {
            return Err(LinkError::Decode("control payload has empty url".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(LinkError::Decode(format!(
                "control url must be http(s): {url:?}"
            )));
        }
        Ok(build(url.to_string()))
    }

    pub fn url(&self) -> &str {
        match self {
            SubscriberUpdate::Add { url } | SubscriberUpdate::Remove { url } => url,
        }
    }
}
