//! Gateway session and contract invocation.
//!
//! `Gateway::connect` trades an identity's certificate for a session token;
//! `Network`/`Contract` scope that session down to one contract on one
//! channel. Handles are cheap clones over a shared inner, so callers hold
//! their own instances instead of sharing through globals.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use ledgerlink_core::asset::Asset;
use ledgerlink_core::error::{LinkError, Result};

use crate::events::{self, ContractEventStream};
use crate::http;
use crate::profile::ConnectionProfile;
use crate::wallet::Identity;

/// Timeouts for the gateway HTTP session. The request timeout covers the
/// whole submit round trip including endorsement, so it sits well above the
/// connect timeout.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Serialize)]
struct ConnectRequest<'a> {
    #[serde(rename = "mspId")]
    msp_id: &'a str,
    certificate: &'a str,
}

#[derive(Deserialize)]
struct ConnectResponse {
    session: String,
}

#[derive(Serialize)]
struct InvokeRequest<'a> {
    function: &'a str,
    args: &'a [&'a str],
}

#[derive(Deserialize)]
struct InvokeResponse {
    result: Value,
}

#[derive(Debug)]
pub(crate) struct GatewayInner {
    pub(crate) http: reqwest::Client,
    pub(crate) base: String,
    pub(crate) ws_base: String,
    pub(crate) session: String,
}

/// An authenticated session against one gateway peer.
#[derive(Clone, Debug)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

impl Gateway {
    /// Establish a session using the profile's first peer for the client
    /// organization.
    pub async fn connect(
        profile: &ConnectionProfile,
        identity: &Identity,
        options: ConnectOptions,
    ) -> Result<Self> {
        let base = profile.gateway_url()?.trim_end_matches('/').to_string();
        let ws_base = profile.events_url()?.trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(options.request_timeout)
            .connect_timeout(options.connect_timeout)
            .build()
            .map_err(|e| LinkError::Internal(format!("build gateway http client: {e}")))?;

        let url = format!("{base}/api/v1/connect");
        let response = http
            .post(&url)
            .json(&ConnectRequest {
                msp_id: &identity.msp_id,
                certificate: &identity.certificate,
            })
            .send()
            .await
            .map_err(|e| http::transport_error("gateway connect", e))?;
        let response = http::check_status("gateway connect", response).await?;
        let body: ConnectResponse = response
            .json()
            .await
            .map_err(|e| http::transport_error("gateway connect", e))?;

        tracing::info!(gateway = %base, "gateway session established");
        Ok(Self {
            inner: Arc::new(GatewayInner {
                http,
                base,
                ws_base,
                session: body.session,
            }),
        })
    }

    pub fn network(&self, channel: &str) -> Network {
        Network {
            inner: Arc::clone(&self.inner),
            channel: channel.to_string(),
        }
    }
}

/// A channel scope under a gateway session.
pub struct Network {
    inner: Arc<GatewayInner>,
    channel: String,
}

impl Network {
    pub fn contract(&self, name: &str) -> Contract {
        Contract {
            inner: Arc::clone(&self.inner),
            channel: self.channel.clone(),
            name: name.to_string(),
        }
    }
}

/// One named contract on one channel.
#[derive(Clone)]
pub struct Contract {
    inner: Arc<GatewayInner>,
    channel: String,
    name: String,
}

impl Contract {
    /// Read-only invocation; the result is the contract's JSON return value.
    pub async fn evaluate(&self, function: &str, args: &[&str]) -> Result<Value> {
        self.invoke("evaluate", function, args).await
    }

    /// Ordering invocation; resolves once the transaction is committed.
    pub async fn submit(&self, function: &str, args: &[&str]) -> Result<Value> {
        self.invoke("submit", function, args).await
    }

    async fn invoke(&self, mode: &str, function: &str, args: &[&str]) -> Result<Value> {
        let url = format!(
            "{}/api/v1/channels/{}/contracts/{}/{mode}",
            self.inner.base, self.channel, self.name
        );
        let context = format!("{mode} {function}");
        let response = self
            .inner
            .http
            .post(&url)
            .bearer_auth(&self.inner.session)
            .json(&InvokeRequest { function, args })
            .send()
            .await
            .map_err(|e| http::transport_error(&context, e))?;
        let response = http::check_status(&context, response).await?;
        let body: InvokeResponse = response
            .json()
            .await
            .map_err(|e| http::transport_error(&context, e))?;
        Ok(body.result)
    }

    /// Open this contract's event stream.
    pub async fn events(&self) -> Result<ContractEventStream> {
        events::dial(
            &self.inner.ws_base,
            &self.channel,
            &self.name,
            &self.inner.session,
        )
        .await
    }
}

/// Typed facade over the asset contract's functions.
#[async_trait]
pub trait AssetContract: Send + Sync {
    /// Every non-empty asset record on the ledger.
    async fn query_all_assets(&self) -> Result<Vec<Asset>>;

    /// Transfer `id` from `current_owner` to `new_owner` and return the
    /// updated record. The contract rejects the transfer unless
    /// `current_owner` matches its view of the asset.
    async fn change_asset_owner(
        &self,
        id: &str,
        current_owner: &str,
        new_owner: &str,
    ) -> Result<Asset>;
}

#[async_trait]
impl AssetContract for Contract {
    async fn query_all_assets(&self) -> Result<Vec<Asset>> {
        let value = self.evaluate("QueryAllAssets", &[]).await?;
        serde_json::from_value(value)
            .map_err(|e| LinkError::Decode(format!("QueryAllAssets result: {e}")))
    }

    async fn change_asset_owner(
        &self,
        id: &str,
        current_owner: &str,
        new_owner: &str,
    ) -> Result<Asset> {
        let value = self
            .submit("ChangeAssetOwner", &[id, current_owner, new_owner])
            .await?;
        serde_json::from_value(value)
            .map_err(|e| LinkError::Decode(format!("ChangeAssetOwner result: {e}")))
    }
}
