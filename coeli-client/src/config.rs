//! Client configuration.

use crate::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Production API root; the tenant is appended as the next path segment.
pub const DEFAULT_API_BASE_URL: &str = "https://app.coeli.cat/coeli";

/// Connection settings. Read-only once a client is built from it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Tenant path segment.
    pub tenant: String,
    /// API token, sent as `Authorization: Authorization <token>`.
    pub token: String,
    /// Base URL up to (not including) the tenant segment.
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            tenant: String::new(),
            token: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: 60,
        }
    }
}

impl ClientConfig {
    pub fn new(tenant: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            tenant: tenant.into(),
            token: token.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Checks that tenant and token are set and the timeout is nonzero.
    pub fn validate(&self) -> ClientResult<()> {
        if self.tenant.trim().is_empty() {
            return Err(ClientError::Config("tenant is required".to_string()));
        }
        if self.token.trim().is_empty() {
            return Err(ClientError::Config("token is required".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ClientError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.tenant.contains('/') {
            return Err(ClientError::Config(format!(
                "tenant must be a single path segment: {}",
                self.tenant
            )));
        }
        Ok(())
    }

    /// `<api_base_url>/<tenant>`, the prefix of every request URL.
    pub fn tenant_url(&self) -> String {
        format!("{}/{}", self.api_base_url.trim_end_matches('/'), self.tenant)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("tenant", &self.tenant)
            .field("token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
