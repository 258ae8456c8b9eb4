//! Contract event stream over WebSocket.

use std::time::Duration;

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use ledgerlink_core::error::{LinkError, Result};
use ledgerlink_core::event::{decode_event, ContractEvent};

const DIAL_TIMEOUT: Duration = Duration::from_secs(10);

/// A live subscription to one contract's events.
///
/// `next_event` yields decoded events until the stream closes. A frame that
/// fails to decode is reported as a `Decode` error without consuming the
/// stream, so callers can skip it and keep reading.
pub struct ContractEventStream {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
    endpoint: String,
}

pub(crate) async fn dial(
    ws_base: &str,
    channel: &str,
    contract: &str,
    session: &str,
) -> Result<ContractEventStream> {
    // The session token rides in the query string; keep it out of logs.
    let endpoint = format!("{ws_base}/api/v1/channels/{channel}/contracts/{contract}/events");
    let url = format!("{endpoint}?session={session}");
    let (socket, _) = tokio::time::timeout(DIAL_TIMEOUT, connect_async(&url))
        .await
        .map_err(|_| LinkError::Connect(format!("event stream dial timed out: {endpoint}")))?
        .map_err(|e| LinkError::Connect(format!("event stream dial {endpoint}: {e}")))?;
    tracing::info!(%endpoint, "event stream connected");
    Ok(ContractEventStream { socket, endpoint })
}

impl ContractEventStream {
    /// The dialed endpoint without the session query.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Next decoded event, or `None` once the peer closes the stream.
    pub async fn next_event(&mut self) -> Result<Option<ContractEvent>> {
        loop {
            let frame = match self.socket.next().await {
                None => return Ok(None),
                Some(Ok(frame)) => frame,
                Some(Err(e)) => {
                    return Err(LinkError::Connect(format!(
                        "event stream read {}: {e}",
                        self.endpoint
                    )))
                }
            };
            match frame {
                Message::Text(text) => return decode_event(&text).map(Some),
                Message::Binary(_) => {
                    return Err(LinkError::Decode(
                        "binary frame on event stream".to_string(),
                    ))
                }
                Message::Close(_) => return Ok(None),
                _ => continue,
            }
        }
    }
}
