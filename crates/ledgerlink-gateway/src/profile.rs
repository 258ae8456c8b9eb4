//! Connection profile loader (strict parsing).
//!
//! The profile is a JSON document describing the gateway endpoints for one
//! deployment: organizations, their peers, and their certificate
//! authorities. Profiles are authored alongside the deployment, so unknown
//! keys are treated as typos and rejected.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use ledgerlink_core::error::{LinkError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionProfile {
    pub name: String,
    pub version: String,
    pub client: ClientSection,
    pub organizations: HashMap<String, OrganizationProfile>,
    pub peers: HashMap<String, PeerProfile>,
    #[serde(rename = "certificateAuthorities", default)]
    pub certificate_authorities: HashMap<String, CaProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    pub organization: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrganizationProfile {
    #[serde(rename = "mspid")]
    pub msp_id: String,
    #[serde(default)]
    pub peers: Vec<String>,
    #[serde(rename = "certificateAuthorities", default)]
    pub certificate_authorities: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeerProfile {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaProfile {
    pub url: String,
    #[serde(rename = "caName", default)]
    pub ca_name: Option<String>,
}

impl ConnectionProfile {
    /// Load and validate a profile from disk. A missing or unreadable file
    /// is a config error; callers are expected to treat it as fatal.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path).map_err(|e| {
            LinkError::Config(format!("read connection profile {}: {e}", path.display()))
        })?;
        Self::load_from_str(&s)
    }

    pub fn load_from_str(s: &str) -> Result<Self> {
        let profile: ConnectionProfile = serde_json::from_str(s)
            .map_err(|e| LinkError::Config(format!("invalid connection profile: {e}")))?;
        profile.validate()?;
        Ok(profile)
    }

    fn validate(&self) -> Result<()> {
        let org = self.organization()?;
        if org.peers.is_empty() {
            return Err(LinkError::Config(format!(
                "organization {} lists no peers",
                self.client.organization
            )));
        }
        for peer_ref in &org.peers {
            let peer = self.peers.get(peer_ref).ok_or_else(|| {
                LinkError::Config(format!("profile references unknown peer: {peer_ref}"))
            })?;
            check_http_url("peer", &peer.url)?;
        }
        for ca_ref in &org.certificate_authorities {
            let ca = self.certificate_authorities.get(ca_ref).ok_or_else(|| {
                LinkError::Config(format!(
                    "profile references unknown certificate authority: {ca_ref}"
                ))
            })?;
            check_http_url("certificate authority", &ca.url)?;
        }
        Ok(())
    }

    /// The client organization's section.
    pub fn organization(&self) -> Result<&OrganizationProfile> {
        self.organizations
            .get(&self.client.organization)
            .ok_or_else(|| {
                LinkError::Config(format!(
                    "client organization not in profile: {}",
                    self.client.organization
                ))
            })
    }

    pub fn msp_id(&self) -> Result<&str> {
        Ok(self.organization()?.msp_id.as_str())
    }

    /// HTTP base of the organization's first peer.
    pub fn gateway_url(&self) -> Result<&str> {
        let org = self.organization()?;
        let peer_ref = org.peers.first().ok_or_else(|| {
            LinkError::Config(format!(
                "organization {} lists no peers",
                self.client.organization
            ))
        })?;
        let peer = self.peers.get(peer_ref).ok_or_else(|| {
            LinkError::Config(format!("profile references unknown peer: {peer_ref}"))
        })?;
        Ok(peer.url.as_str())
    }

    /// WebSocket base derived from [`gateway_url`](Self::gateway_url) by
    /// scheme swap: `http` becomes `ws`, `https` becomes `wss`.
    pub fn events_url(&self) -> Result<String> {
        let url = self.gateway_url()?;
        if let Some(rest) = url.strip_prefix("https://") {
            Ok(format!("wss://{rest}"))
        } else if let Some(rest) = url.strip_prefix("http://") {
            Ok(format!("ws://{rest}"))
        } else {
            Err(LinkError::Config(format!("peer url must be http(s): {url}")))
        }
    }

    /// Look up a certificate authority by profile key, or the client
    /// organization's first one when `name` is `None`.
    pub fn ca(&self, name: Option<&str>) -> Result<&CaProfile> {
        let ca_ref = match name {
            Some(n) => n,
            None => {
                let org = self.organization()?;
                org.certificate_authorities.first().ok_or_else(|| {
                    LinkError::Config(format!(
                        "organization {} lists no certificate authorities",
                        self.client.organization
                    ))
                })?
            }
        };
        self.certificate_authorities.get(ca_ref).ok_or_else(|| {
            LinkError::Config(format!(
                "profile references unknown certificate authority: {ca_ref}"
            ))
        })
    }
}

fn check_http_url(what: &str, url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(LinkError::Config(format!(
            "{what} url must be http(s): {url}"
        )))
    }
}
