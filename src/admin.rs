//! Admin screen: validating and testing the backing database connection.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::db::models::AdminConfig;

/// Connection settings as submitted from the admin form
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionTestResult {
    pub success: bool,
    pub message: String,
}

/// Checks whether a backing database answers with the given credentials.
#[derive(Clone)]
pub struct ConnectionTester {
    http: Client,
}

impl ConnectionTester {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ConnectionTester { http })
    }

    /// GET the endpoint with the key as `apikey` and bearer token; 2xx counts as connected.
    pub async fn test(&self, url: &Url, key: &str) -> ConnectionTestResult {
        debug!("Testing connection to {}", url);
        let resp = self
            .http
            .get(url.clone())
            .header("apikey", key)
            .bearer_auth(key)
            .send()
            .await;

        match resp {
            Ok(r) if r.status().is_success() => {
                info!("Connection test to {} succeeded", url);
                ConnectionTestResult {
                    success: true,
                    message: format!("Connected to {}", url),
                }
            }
            Ok(r) => {
                warn!("Connection test to {} failed: {}", url, r.status());
                ConnectionTestResult {
                    success: false,
                    message: format!("Database answered with {}", r.status()),
                }
            }
            Err(e) => {
                warn!("Connection test to {} failed: {}", url, e);
                ConnectionTestResult {
                    success: false,
                    message: format!("Could not reach database: {}", e),
                }
            }
        }
    }
}

impl ConnectionRequest {
    /// Both fields are required and the URL must be absolute http(s).
    pub fn validate(&self) -> Result<Url, String> {
        let url = self.url.trim();
        let key = self.key.trim();
        if url.is_empty() || key.is_empty() {
            return Err("Both the URL and the API key are required".to_string());
        }
        let parsed = Url::parse(url).map_err(|e| format!("Invalid URL: {}", e))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(format!("Unsupported URL scheme {:?}", parsed.scheme()));
        }
        Ok(parsed)
    }

    pub fn into_config(self, is_connected: bool) -> AdminConfig {
        AdminConfig {
            url: self.url.trim().to_string(),
            key: self.key.trim().to_string(),
            is_connected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(url: &str, key: &str) -> ConnectionRequest {
        ConnectionRequest {
            url: url.into(),
            key: key.into(),
        }
    }

    #[test]
    fn test_validate_requires_both_fields() {
        assert!(req("", "k").validate().is_err());
        assert!(req("https://db.example.com", "  ").validate().is_err());
    }

    #[test]
    fn test_validate_scheme() {
        assert!(req("ftp://db.example.com", "k").validate().is_err());
        assert!(req("not a url", "k").validate().is_err());
        let url = req(" https://db.example.com/rest/v1 ", "k").validate().unwrap();
        assert_eq!(url.host_str(), Some("db.example.com"));
    }

    #[test]
    fn test_into_config_trims() {
        let cfg = req(" https://db.example.com ", " key ").into_config(true);
        assert_eq!(cfg.url, "https://db.example.com");
        assert_eq!(cfg.key, "key");
        assert!(cfg.is_connected);
    }

    #[tokio::test]
    async fn test_unreachable_host_reports_failure() {
        let tester = ConnectionTester::new(Duration::from_millis(500)).unwrap();
        // Port 9 (discard) on loopback is closed in test environments
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        let result = tester.test(&url, "key").await;
        assert!(!result.success);
    }
}
