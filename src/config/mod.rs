use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is missing or empty")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

/// Process configuration, resolved once at startup.
///
/// The three Supabase values are hard requirements: without them the server
/// cannot build upstream requests, so startup is refused rather than failing
/// lazily on the first request.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Supabase project base URL, e.g. `https://abc.supabase.co`.
    pub supabase_url: String,
    /// Public (anon) API key, sent as `apikey` on every data-API call.
    pub anon_key: String,
    /// Service-role key, used only by the token verifier.
    pub service_role_key: String,
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Per-request timeout for upstream calls, in seconds.
    pub upstream_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let supabase_url = require("SUPABASE_URL", env::var("SUPABASE_URL").ok())?;
        let anon_key = require("SUPABASE_ANON_KEY", env::var("SUPABASE_ANON_KEY").ok())?;
        let service_role_key = require(
            "SUPABASE_SERVICE_ROLE_KEY",
            env::var("SUPABASE_SERVICE_ROLE_KEY").ok(),
        )?;

        let port = parse_or("PORT", env::var("PORT").ok(), 8000)?;
        let upstream_timeout_secs = parse_or(
            "UPSTREAM_TIMEOUT_SECS",
            env::var("UPSTREAM_TIMEOUT_SECS").ok(),
            5,
        )?;

        Ok(Self {
            supabase_url,
            anon_key,
            service_role_key,
            port,
            upstream_timeout_secs,
        })
    }

    /// Base URL of the PostgREST data API.
    pub fn rest_base(&self) -> String {
        format!("{}/rest/v1", self.supabase_url.trim_end_matches('/'))
    }

    /// Identity endpoint used to validate bearer tokens.
    pub fn auth_user_endpoint(&self) -> String {
        format!("{}/auth/v1/user", self.supabase_url.trim_end_matches('/'))
    }
}

fn require(name: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v
            .parse()
            .map_err(|_| ConfigError::InvalidVar { name, value: v }),
    }
}
