use async_trait::async_trait;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::ApiError;

/// Authenticated user context for the current request.
///
/// Carries the original bearer token alongside the resolved user id: every
/// data-API call must present the same token so that upstream row-level
/// security re-derives the caller's identity itself.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub token: String,
}

/// Identity resolved by the upstream verifier.
#[derive(Debug, Deserialize)]
pub struct VerifiedUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// External identity capability: given a bearer token, resolve the user it
/// identifies, or `None` when the token is invalid, expired, or revoked.
///
/// Behind a trait so tests (and alternate identity providers) can swap the
/// implementation without touching the middleware.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify_token(&self, token: &str) -> Result<Option<VerifiedUser>, ApiError>;
}

/// Verifier backed by the GoTrue identity endpoint of the upstream project.
///
/// Every request re-validates against upstream; results are never cached, so
/// token revocation takes effect immediately at the cost of one extra call.
pub struct GoTrueVerifier {
    http: reqwest::Client,
    user_endpoint: String,
    service_role_key: String,
}

impl GoTrueVerifier {
    pub fn new(config: &AppConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            user_endpoint: config.auth_user_endpoint(),
            service_role_key: config.service_role_key.clone(),
        }
    }
}

#[async_trait]
impl TokenVerifier for GoTrueVerifier {
    async fn verify_token(&self, token: &str) -> Result<Option<VerifiedUser>, ApiError> {
        let response = self
            .http
            .get(&self.user_endpoint)
            .bearer_auth(token)
            .header("apikey", &self.service_role_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "token rejected by identity service");
            return Ok(None);
        }

        // A user object without a usable id is treated the same as no user
        match response.json::<VerifiedUser>().await {
            Ok(user) if !user.id.is_empty() => Ok(Some(user)),
            Ok(_) => Ok(None),
            Err(e) => {
                tracing::warn!("unparseable identity response: {}", e);
                Ok(None)
            }
        }
    }
}
