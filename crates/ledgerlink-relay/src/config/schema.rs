use serde::Deserialize;

use ledgerlink_core::error::{LinkError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    pub version: u32,

    #[serde(default)]
    pub http: HttpSection,

    pub ledger: LedgerSection,
}

impl RelayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(LinkError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.http.validate()?;
        self.ledger.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Per-subscriber delivery timeout for one fan-out pass.
    #[serde(default = "default_forward_timeout_ms")]
    pub forward_timeout_ms: u64,

    /// Bearer token required on sensor ingest. Unset means open ingest,
    /// which startup logs loudly.
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            forward_timeout_ms: default_forward_timeout_ms(),
            auth_token: None,
        }
    }
}

impl HttpSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60000).contains(&self.forward_timeout_ms) {
            return Err(LinkError::Config(
                "http.forward_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        if let Some(token) = &self.auth_token {
            if token.is_empty() {
                return Err(LinkError::Config(
                    "http.auth_token must not be empty when set".into(),
                ));
            }
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".into()
}
fn default_forward_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerSection {
    /// Path to the connection profile JSON.
    pub profile: String,

    #[serde(default = "default_wallet")]
    pub wallet: String,

    #[serde(default = "default_channel")]
    pub channel: String,

    #[serde(default = "default_contract")]
    pub contract: String,

    #[serde(default = "default_user_id")]
    pub user_id: String,

    #[serde(default = "default_admin_id")]
    pub admin_id: String,

    #[serde(default = "default_admin_secret")]
    pub admin_secret: String,

    #[serde(default = "default_affiliation")]
    pub affiliation: String,

    /// Certificate authority key in the profile; the organization's first
    /// one when unset.
    #[serde(default)]
    pub ca_name: Option<String>,

    /// Event name this relay answers to. Control events published under any
    /// other name are ignored.
    pub station_key: String,
}

impl LedgerSection {
    pub fn validate(&self) -> Result<()> {
        if self.profile.is_empty() {
            return Err(LinkError::Config("ledger.profile must not be empty".into()));
        }
        if self.station_key.is_empty() {
            return Err(LinkError::Config(
                "ledger.station_key must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_wallet() -> String {
    "wallet".into()
}
fn default_channel() -> String {
    "mychannel".into()
}
fn default_contract() -> String {
    "assets".into()
}
fn default_user_id() -> String {
    "appUser".into()
}
fn default_admin_id() -> String {
    "admin".into()
}
fn default_admin_secret() -> String {
    "adminpw".into()
}
fn default_affiliation() -> String {
    "org1.department1".into()
}
