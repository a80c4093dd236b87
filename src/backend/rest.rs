use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;

use super::{BackendError, Identity, IdentityBackend, OrderBy};
use crate::config::BackendConfig;
use crate::context::RequestContext;

/// HTTP client for a Supabase-style backend: an auth API under `/auth/v1`
/// and a PostgREST table API under `/rest/v1`.
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: Client,
    base_url: Option<Url>,
    anon_key: Option<String>,
    access_token_cookie: String,
}

impl RestBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let base_url = config.url.as_deref().map(parse_base_url).transpose()?;

        Ok(Self {
            client,
            base_url,
            anon_key: config.anon_key.clone(),
            access_token_cookie: config.access_token_cookie.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        let base = self
            .base_url
            .as_ref()
            .ok_or(BackendError::ConfigMissing("SUPABASE_URL"))?;
        Ok(base.join(path)?)
    }

    fn api_key(&self) -> Result<&str, BackendError> {
        self.anon_key
            .as_deref()
            .ok_or(BackendError::ConfigMissing("SUPABASE_ANON_KEY"))
    }
}

/// Parse the backend URL, making sure relative joins keep its path
fn parse_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Error body of a failed response, or `null` when it is not JSON
async fn error_body(response: Response) -> Value {
    response.json::<Value>().await.unwrap_or(Value::Null)
}

#[async_trait]
impl IdentityBackend for RestBackend {
    async fn current_user(&self, ctx: &RequestContext) -> Result<Option<Identity>, BackendError> {
        let Some(token) = ctx
            .cookie(&self.access_token_cookie)
            .filter(|token| !token.is_empty())
        else {
            return Err(BackendError::session_missing());
        };

        let url = self.endpoint("auth/v1/user")?;
        let response = self
            .client
            .get(url)
            .header("apikey", self.api_key()?)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            tracing::debug!("auth API rejected access token with status {}", status);
            return Err(BackendError::auth_api(status.as_u16(), &body));
        }

        // The record is passed through untouched; only its presence counts
        let body: Value = response.json().await?;
        match body {
            Value::Object(_) => Ok(Some(Identity::new(body))),
            _ => Ok(None),
        }
    }

    async fn select_all(&self, table: &str, order: &OrderBy) -> Result<Vec<Value>, BackendError> {
        let mut url = self.endpoint(&format!("rest/v1/{}", table))?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", &order.to_query_value());

        let key = self.api_key()?;
        let response = self
            .client
            .get(url)
            .header("apikey", key)
            .bearer_auth(key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("query on '{}' failed with status {}", table, status));
            return Err(BackendError::Query { status: status.as_u16(), message });
        }

        let rows: Option<Vec<Value>> = response.json().await?;
        Ok(rows.unwrap_or_default())
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        let url = self.endpoint("auth/v1/health")?;
        self.client
            .get(url)
            .header("apikey", self.api_key()?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
