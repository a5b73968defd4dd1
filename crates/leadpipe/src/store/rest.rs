//! REST-backed lead store client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{ImportError, Result};
use crate::lead::{CommittedLead, NewLead};

use super::LeadStore;

/// Request timeout for store calls. This is the store client's own call
/// semantics; the import layer adds no timeout on top.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable naming the store's base URL.
pub const STORE_URL_ENV: &str = "LEADPIPE_STORE_URL";

/// Environment variable holding an optional bearer token.
pub const STORE_TOKEN_ENV: &str = "LEADPIPE_STORE_TOKEN";

/// Lead store backed by a REST endpoint (`POST {base_url}/leads`).
pub struct RestLeadStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RestLeadStore {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ImportError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(STORE_URL_ENV).map_err(|_| {
            ImportError::Config(format!("{STORE_URL_ENV} environment variable not set"))
        })?;

        let store = Self::new(base_url)?;
        match std::env::var(STORE_TOKEN_ENV) {
            Ok(token) => Ok(store.with_token(token)),
            Err(_) => Ok(store),
        }
    }
}

#[async_trait]
impl LeadStore for RestLeadStore {
    async fn create(&self, lead: NewLead) -> Result<CommittedLead> {
        let url = format!("{}/leads", self.base_url);

        let mut request = self.client.post(&url).json(&lead);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImportError::Store {
                message: format!("create returned {status}: {body}"),
            });
        }

        Ok(response.json::<CommittedLead>().await?)
    }

    fn name(&self) -> &str {
        "rest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let store = RestLeadStore::new("https://crm.internal/api/").unwrap();
        assert_eq!(store.base_url, "https://crm.internal/api");
        assert_eq!(store.name(), "rest");
    }
}
