//! HTTP client for the pinning API and its public gateway.

use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use ledgerlink_core::error::{LinkError, Result};

// Uploads move whole files, so the request timeout is generous compared to
// the gateway clients.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Receipt returned on a successful pin. Extra response fields are
/// tolerated, the service adds them without notice.
#[derive(Debug, Clone, Deserialize)]
pub struct PinReceipt {
    #[serde(rename = "IpfsHash")]
    pub ipfs_hash: String,
    #[serde(rename = "PinSize")]
    pub pin_size: u64,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

/// Client over a pinning API base (uploads) and a public gateway base
/// (downloads by content identifier).
pub struct PinClient {
    http: reqwest::Client,
    api_base: String,
    gateway_base: String,
    jwt: String,
}

impl PinClient {
    pub fn new(api_base: &str, gateway_base: &str, jwt: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| LinkError::Internal(format!("http client: {e}")))?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            gateway_base: gateway_base.trim_end_matches('/').to_string(),
            jwt: jwt.to_string(),
        })
    }

    /// Pin a local file under its own file name.
    pub async fn upload_file(&self, path: &Path) -> Result<PinReceipt> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                LinkError::Config(format!("{} has no usable file name", path.display()))
            })?
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| LinkError::Config(format!("read {}: {e}", path.display())))?;
        self.upload_bytes(&name, bytes).await
    }

    /// Pin raw bytes as `name`. The multipart layout is fixed by the API:
    /// the `file` part plus `pinataMetadata` and `pinataOptions` JSON parts.
    pub async fn upload_bytes(&self, name: &str, bytes: Vec<u8>) -> Result<PinReceipt> {
        let metadata = serde_json::json!({ "name": name }).to_string();
        let options = serde_json::json!({ "cidVersion": 1 }).to_string();
        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(name.to_string()),
            )
            .text("pinataMetadata", metadata)
            .text("pinataOptions", options);

        let response = self
            .http
            .post(format!("{}/pinning/pinFileToIPFS", self.api_base))
            .bearer_auth(&self.jwt)
            .multipart(form)
            .send()
            .await
            .map_err(|e| classify("upload", e))?;
        let response = fail_on_status("upload", response).await?;
        let receipt: PinReceipt = response
            .json()
            .await
            .map_err(|e| LinkError::Decode(format!("pin receipt: {e}")))?;
        tracing::info!(
            name,
            cid = %receipt.ipfs_hash,
            size = receipt.pin_size,
            "file pinned"
        );
        Ok(receipt)
    }

    /// Fetch `cid` through the public gateway. The SHA-256 of the content is
    /// always logged; when `expected_sha256` is given, a mismatch fails the
    /// download with an integrity error.
    pub async fn download(&self, cid: &str, expected_sha256: Option<&str>) -> Result<Bytes> {
        let response = self
            .http
            .get(format!("{}/ipfs/{cid}", self.gateway_base))
            .send()
            .await
            .map_err(|e| classify("download", e))?;
        let response = fail_on_status("download", response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify("download body", e))?;

        let digest = sha256_hex(&bytes);
        tracing::info!(%cid, sha256 = %digest, size = bytes.len(), "object fetched");
        if let Some(expected) = expected_sha256 {
            if !digest.eq_ignore_ascii_case(expected) {
                return Err(LinkError::Integrity(format!(
                    "{cid}: content hashes to {digest}, expected {expected}"
                )));
            }
        }
        Ok(bytes)
    }
}

/// Hex-encoded SHA-256 of a byte slice.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn classify(what: &str, err: reqwest::Error) -> LinkError {
    if err.is_timeout() || err.is_connect() {
        LinkError::Connect(format!("{what}: {err}"))
    } else {
        LinkError::Internal(format!("{what}: {err}"))
    }
}

// The pinning API reports failures as opaque bodies, so unlike the ledger
// gateway no error envelope is parsed; the status line carries the class.
async fn fail_on_status(what: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status.as_u16() {
        401 | 403 => Err(LinkError::Auth(format!("{what}: {status}"))),
        _ => Err(LinkError::Rejected(format!("{what}: {status}"))),
    }
}
