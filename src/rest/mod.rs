pub mod filter;

pub use filter::{Filter, Op};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use url::Url;

use crate::config::AppConfig;
use crate::error::ApiError;

/// Client for the upstream PostgREST data API.
///
/// Builds the per-request URL and header set, forwards the call, and maps the
/// response: any upstream status >= 400 is surfaced verbatim, transport
/// failures become `UpstreamUnavailable`.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    rest_base: String,
    anon_key: String,
}

impl RestClient {
    pub fn new(config: &AppConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            rest_base: config.rest_base(),
            anon_key: config.anon_key.clone(),
        }
    }

    /// GET rows from `table`. `token: None` performs an anonymous read that
    /// must not impersonate any user.
    pub async fn select(
        &self,
        table: &str,
        filters: &[Filter],
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let url = self.table_url(table, filters, true)?;
        let headers = self.headers(token)?;
        let response = self.http.get(url).headers(headers).send().await?;
        read_json(response).await
    }

    /// POST a single row, asking upstream to echo the persisted representation.
    pub async fn insert(&self, table: &str, payload: &Value, token: &str) -> Result<Value, ApiError> {
        let url = self.table_url(table, &[], false)?;
        let headers = self.headers(Some(token))?;
        let response = self
            .http
            .post(url)
            .headers(headers)
            .header("Prefer", "return=representation")
            .json(payload)
            .send()
            .await?;
        Ok(first_row(read_json(response).await?))
    }

    /// POST with upstream conflict resolution: insert, or replace the existing
    /// row with the same primary key.
    pub async fn upsert(&self, table: &str, payload: &Value, token: &str) -> Result<Value, ApiError> {
        let url = self.table_url(table, &[], false)?;
        let headers = self.headers(Some(token))?;
        let response = self
            .http
            .post(url)
            .headers(headers)
            .header("Prefer", "return=representation,resolution=merge-duplicates")
            .json(payload)
            .send()
            .await?;
        Ok(first_row(read_json(response).await?))
    }

    /// PATCH rows matching `filters`. A filter set that matches nothing yields
    /// an empty array, not an error.
    pub async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        payload: &Value,
        token: &str,
    ) -> Result<Value, ApiError> {
        let url = self.table_url(table, filters, false)?;
        let headers = self.headers(Some(token))?;
        let response = self
            .http
            .patch(url)
            .headers(headers)
            .header("Prefer", "return=representation")
            .json(payload)
            .send()
            .await?;
        Ok(first_row(read_json(response).await?))
    }

    /// DELETE rows matching `filters`. Upstream may reply with an empty body;
    /// that reads as an empty row set.
    pub async fn delete(&self, table: &str, filters: &[Filter], token: &str) -> Result<Value, ApiError> {
        let url = self.table_url(table, filters, false)?;
        let headers = self.headers(Some(token))?;
        let response = self.http.delete(url).headers(headers).send().await?;
        read_json(response).await
    }

    fn table_url(&self, table: &str, filters: &[Filter], select_all: bool) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}/{}", self.rest_base, table))
            .map_err(|e| ApiError::configuration(format!("invalid upstream URL: {}", e)))?;
        // Only touch the query when there is something to append;
        // query_pairs_mut alone leaves a dangling `?` on the URL.
        if select_all || !filters.is_empty() {
            let mut pairs = url.query_pairs_mut();
            if select_all {
                pairs.append_pair("select", "*");
            }
            for filter in filters {
                let (field, value) = filter.to_query_pair();
                pairs.append_pair(&field, &value);
            }
        }
        Ok(url)
    }

    /// Header set for a data-API call. Authenticated calls carry the bearer
    /// token plus the anon API key; anonymous calls carry the key only.
    /// Missing credentials fail here, before anything is sent upstream.
    fn headers(&self, token: Option<&str>) -> Result<HeaderMap, ApiError> {
        if self.anon_key.is_empty() {
            return Err(ApiError::configuration("anon API key is not configured"));
        }

        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(&self.anon_key)?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            if token.is_empty() {
                return Err(ApiError::configuration("bearer token required but empty"));
            }
            headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", token))?);
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value)
        .map_err(|_| ApiError::configuration("credential contains invalid header characters"))
}

/// Upstream returns representation bodies as arrays; callers want the single
/// affected row. Empty arrays pass through untouched so an ownership-scoped
/// mutation that matched zero rows is visible as exactly that.
fn first_row(value: Value) -> Value {
    match value {
        Value::Array(mut rows) if !rows.is_empty() => rows.remove(0),
        other => other,
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, ApiError> {
    let status = response.status();
    if status.as_u16() >= 400 {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::upstream(status.as_u16(), body));
    }

    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Array(Vec::new()));
    }
    serde_json::from_str(&text)
        .map_err(|e| ApiError::upstream_unavailable(format!("invalid JSON from upstream: {}", e)))
}
