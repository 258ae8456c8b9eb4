//! Relay config loader (strict parsing).

pub mod schema;

use std::fs;

use ledgerlink_core::error::{LinkError, Result};

pub use schema::{HttpSection, LedgerSection, RelayConfig};

pub fn load_from_file(path: &str) -> Result<RelayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| LinkError::Config(format!("read config {path}: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<RelayConfig> {
    let cfg: RelayConfig =
        serde_yaml::from_str(s).map_err(|e| LinkError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
