//! Certificate authority client and the enrollment flows built on it.
//!
//! Enrollment exchanges an id/secret pair for signed credentials; register
//! creates a new enrollment id under an admin's authority. Both flows are
//! idempotent against the wallet: an identity that is already present is
//! left untouched.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use ledgerlink_core::error::{LinkError, Result};

use crate::http;
use crate::profile::CaProfile;
use crate::wallet::{Identity, Wallet};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Credentials returned by a successful enrollment.
pub struct EnrollmentMaterial {
    pub certificate: String,
    pub private_key: String,
}

#[derive(Serialize)]
struct EnrollRequest<'a> {
    #[serde(rename = "caName", skip_serializing_if = "Option::is_none")]
    ca_name: Option<&'a str>,
}

#[derive(Deserialize)]
struct EnrollResponse {
    certificate: String,
    #[serde(rename = "privateKey")]
    private_key: String,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    #[serde(rename = "enrollmentId")]
    enrollment_id: &'a str,
    affiliation: &'a str,
    role: &'a str,
    #[serde(rename = "caName", skip_serializing_if = "Option::is_none")]
    ca_name: Option<&'a str>,
}

#[derive(Deserialize)]
struct RegisterResponse {
    secret: String,
}

/// HTTP client for one certificate authority.
pub struct CaClient {
    http: reqwest::Client,
    base: String,
    ca_name: Option<String>,
}

impl CaClient {
    pub fn new(ca: &CaProfile) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| LinkError::Internal(format!("build ca http client: {e}")))?;
        Ok(Self {
            http,
            base: ca.url.trim_end_matches('/').to_string(),
            ca_name: ca.ca_name.clone(),
        })
    }

    /// Exchange an enrollment id and secret for signed credentials.
    pub async fn enroll(&self, enrollment_id: &str, secret: &str) -> Result<EnrollmentMaterial> {
        let url = format!("{}/api/v1/enroll", self.base);
        let response = self
            .http
            .post(&url)
            .basic_auth(enrollment_id, Some(secret))
            .json(&EnrollRequest {
                ca_name: self.ca_name.as_deref(),
            })
            .send()
            .await
            .map_err(|e| http::transport_error("ca enroll", e))?;
        let response = http::check_status("ca enroll", response).await?;
        let body: EnrollResponse = response
            .json()
            .await
            .map_err(|e| http::transport_error("ca enroll", e))?;
        Ok(EnrollmentMaterial {
            certificate: body.certificate,
            private_key: body.private_key,
        })
    }

    /// Register a new client enrollment id under the admin's authority and
    /// return the secret the new id can enroll with.
    pub async fn register(
        &self,
        admin_id: &str,
        admin_secret: &str,
        enrollment_id: &str,
        affiliation: &str,
    ) -> Result<String> {
        let url = format!("{}/api/v1/register", self.base);
        let response = self
            .http
            .post(&url)
            .basic_auth(admin_id, Some(admin_secret))
            .json(&RegisterRequest {
                enrollment_id,
                affiliation,
                role: "client",
                ca_name: self.ca_name.as_deref(),
            })
            .send()
            .await
            .map_err(|e| http::transport_error("ca register", e))?;
        let response = http::check_status("ca register", response).await?;
        let body: RegisterResponse = response
            .json()
            .await
            .map_err(|e| http::transport_error("ca register", e))?;
        Ok(body.secret)
    }
}

/// Enroll the admin id into the wallet unless it is already there.
pub async fn enroll_admin(
    ca: &CaClient,
    wallet: &Wallet,
    msp_id: &str,
    admin_id: &str,
    admin_secret: &str,
) -> Result<()> {
    if wallet.contains(admin_id)? {
        tracing::info!(label = %admin_id, "identity already in wallet, skipping enrollment");
        return Ok(());
    }
    let material = ca.enroll(admin_id, admin_secret).await?;
    wallet.put(
        admin_id,
        &Identity {
            msp_id: msp_id.to_string(),
            certificate: material.certificate,
            private_key: material.private_key,
        },
    )?;
    tracing::info!(label = %admin_id, "enrolled admin identity");
    Ok(())
}

/// Register and enroll an application user unless the wallet already holds
/// it. The admin credentials authorize the registration step.
pub async fn register_and_enroll_user(
    ca: &CaClient,
    wallet: &Wallet,
    msp_id: &str,
    admin_id: &str,
    admin_secret: &str,
    user_id: &str,
    affiliation: &str,
) -> Result<()> {
    if wallet.contains(user_id)? {
        tracing::info!(label = %user_id, "identity already in wallet, skipping enrollment");
        return Ok(());
    }
    let secret = ca
        .register(admin_id, admin_secret, user_id, affiliation)
        .await?;
    let material = ca.enroll(user_id, &secret).await?;
    wallet.put(
        user_id,
        &Identity {
            msp_id: msp_id.to_string(),
            certificate: material.certificate,
            private_key: material.private_key,
        },
    )?;
    tracing::info!(label = %user_id, affiliation = %affiliation, "registered and enrolled user identity");
    Ok(())
}
