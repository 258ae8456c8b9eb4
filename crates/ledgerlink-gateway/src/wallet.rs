//! File-backed identity wallet.
//!
//! Identities live one per file as `<label>.id` JSON records so a wallet
//! directory can be inspected and copied around with plain shell tools. An
//! in-memory backing exists for tests and short-lived tooling.

use std::fs;
use std::path::PathBuf;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use ledgerlink_core::error::{LinkError, Result};

/// An enrolled identity: the MSP it belongs to plus its PEM credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub msp_id: String,
    pub certificate: String,
    pub private_key: String,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WalletRecord {
    #[serde(rename = "mspId")]
    msp_id: String,
    #[serde(rename = "type")]
    identity_type: String,
    version: u32,
    credentials: WalletCredentials,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WalletCredentials {
    certificate: String,
    #[serde(rename = "privateKey")]
    private_key: String,
}

const IDENTITY_TYPE: &str = "X.509";
const RECORD_VERSION: u32 = 1;

enum Backing {
    Dir(PathBuf),
    Memory(DashMap<String, String>),
}

/// A label-addressed identity store.
pub struct Wallet {
    backing: Backing,
}

impl Wallet {
    /// Open (creating if needed) a directory-backed wallet.
    pub fn open_dir(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path).map_err(|e| {
            LinkError::Config(format!("create wallet dir {}: {e}", path.display()))
        })?;
        Ok(Self {
            backing: Backing::Dir(path),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            backing: Backing::Memory(DashMap::new()),
        }
    }

    pub fn put(&self, label: &str, identity: &Identity) -> Result<()> {
        check_label(label)?;
        let record = WalletRecord {
            msp_id: identity.msp_id.clone(),
            identity_type: IDENTITY_TYPE.to_string(),
            version: RECORD_VERSION,
            credentials: WalletCredentials {
                certificate: identity.certificate.clone(),
                private_key: identity.private_key.clone(),
            },
        };
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| LinkError::Internal(format!("encode wallet record: {e}")))?;
        match &self.backing {
            Backing::Dir(dir) => {
                let path = dir.join(format!("{label}.id"));
                fs::write(&path, json).map_err(|e| {
                    LinkError::Internal(format!("write wallet record {}: {e}", path.display()))
                })
            }
            Backing::Memory(map) => {
                map.insert(label.to_string(), json);
                Ok(())
            }
        }
    }

    pub fn get(&self, label: &str) -> Result<Option<Identity>> {
        check_label(label)?;
        let json = match &self.backing {
            Backing::Dir(dir) => {
                let path = dir.join(format!("{label}.id"));
                match fs::read_to_string(&path) {
                    Ok(s) => s,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
                    Err(e) => {
                        return Err(LinkError::Internal(format!(
                            "read wallet record {}: {e}",
                            path.display()
                        )))
                    }
                }
            }
            Backing::Memory(map) => match map.get(label) {
                Some(entry) => entry.value().clone(),
                None => return Ok(None),
            },
        };
        let record: WalletRecord = serde_json::from_str(&json)
            .map_err(|e| LinkError::Decode(format!("wallet record for {label}: {e}")))?;
        if record.identity_type != IDENTITY_TYPE {
            return Err(LinkError::Decode(format!(
                "wallet record for {label} has unsupported type: {}",
                record.identity_type
            )));
        }
        Ok(Some(Identity {
            msp_id: record.msp_id,
            certificate: record.credentials.certificate,
            private_key: record.credentials.private_key,
        }))
    }

    pub fn contains(&self, label: &str) -> Result<bool> {
        check_label(label)?;
        match &self.backing {
            Backing::Dir(dir) => Ok(dir.join(format!("{label}.id")).exists()),
            Backing::Memory(map) => Ok(map.contains_key(label)),
        }
    }
}

// Labels become file names; path separators would escape the wallet dir.
fn check_label(label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(LinkError::Config("wallet label must not be empty".to_string()));
    }
    if label.contains('/') || label.contains('\\') || label.contains("..") {
        return Err(LinkError::Config(format!(
            "wallet label must not contain path separators: {label:?}"
        )));
    }
    Ok(())
}
