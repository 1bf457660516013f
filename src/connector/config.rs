// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Connector configuration.
//!
//! Options are read from a YAML file and may be overridden from the command
//! line. Every field except `host` and `username` has a default.
//!
//! ```yaml
//! host: gm.example.com
//! wapi_version: "2.5"
//! username: admin
//! password: infoblox
//! ssl_verify: false
//! network_view: default
//! dns_view: default
//! multi_tenant: true
//! ns_group: default-group
//! ```

use crate::constants::{
    DEFAULT_DNS_VIEW, DEFAULT_HTTP_REQUEST_TIMEOUT_SECS, DEFAULT_NETWORK_VIEW,
    DEFAULT_WAPI_VERSION,
};
use crate::errors::{InfobloxError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Settings for reaching a grid master and naming defaults for views and zones.
///
/// `Debug` output never includes the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorOptions {
    /// Grid master host name or URL
    pub host: String,
    /// WAPI version (e.g., "2.5")
    pub wapi_version: String,
    /// WAPI user
    pub username: String,
    /// WAPI password
    #[serde(skip_serializing)]
    pub password: String,
    /// Verify the grid master TLS certificate
    pub ssl_verify: bool,
    /// Per-request timeout in seconds
    pub http_request_timeout_secs: u64,
    /// Default network view
    pub network_view: String,
    /// Default DNS view
    pub dns_view: String,
    /// Create per-tenant network and DNS views
    pub multi_tenant: bool,
    /// Name server group assigned to new authoritative zones
    pub ns_group: Option<String>,
}

impl std::fmt::Debug for ConnectorOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let password = if self.password.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("ConnectorOptions")
            .field("host", &self.host)
            .field("wapi_version", &self.wapi_version)
            .field("username", &self.username)
            .field("password", &password)
            .field("ssl_verify", &self.ssl_verify)
            .field("http_request_timeout_secs", &self.http_request_timeout_secs)
            .field("network_view", &self.network_view)
            .field("dns_view", &self.dns_view)
            .field("multi_tenant", &self.multi_tenant)
            .field("ns_group", &self.ns_group)
            .finish()
    }
}

impl Default for ConnectorOptions {
    fn default() -> Self {
        Self {
            host: String::new(),
            wapi_version: DEFAULT_WAPI_VERSION.to_string(),
            username: String::new(),
            password: String::new(),
            ssl_verify: true,
            http_request_timeout_secs: DEFAULT_HTTP_REQUEST_TIMEOUT_SECS,
            network_view: DEFAULT_NETWORK_VIEW.to_string(),
            dns_view: DEFAULT_DNS_VIEW.to_string(),
            multi_tenant: false,
            ns_group: None,
        }
    }
}

impl ConnectorOptions {
    /// Load options from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`InfobloxError::Config`] if the file cannot be read or parsed.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading connector configuration");

        let content = std::fs::read_to_string(path).map_err(|e| {
            InfobloxError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse options from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`InfobloxError::Config`] if the text is not valid YAML for this structure.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| InfobloxError::Config(e.to_string()))
    }

    /// Check that the options are usable for a connection.
    ///
    /// # Errors
    ///
    /// Returns [`InfobloxError::Config`] if `host` or `username` is empty.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(InfobloxError::Config("host must not be empty".to_string()));
        }
        if self.username.trim().is_empty() {
            return Err(InfobloxError::Config(
                "username must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Per-request timeout
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http_request_timeout_secs)
    }

    /// WAPI base URL, always ending with `/`.
    ///
    /// A bare host gets the `https://` scheme; a host that already carries a
    /// scheme is used as given.
    #[must_use]
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        let host = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{host}")
        };
        format!("{host}/wapi/v{}/", self.wapi_version)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
