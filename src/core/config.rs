//! Configuration management

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, XtmError};

/// Production host for the project-manager REST API
pub const DEFAULT_BASE_URL: &str = "https://www.xtm-cloud.com/project-manager-api-rest";

/// Per-request timeout applied to every call
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Configuration for an XTM client session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XtmConfig {
    /// Base URL of the REST API
    pub base_url: String,
    /// Account (client) name used during token exchange
    pub client_name: String,
    /// Numeric user id used during token exchange
    pub user_id: u64,
    /// Password used during token exchange
    pub password: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl XtmConfig {
    /// Configuration for the production host with the given credentials
    pub fn new(client_name: impl Into<String>, user_id: u64, password: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_name: client_name.into(),
            user_id,
            password: password.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `XTM_CLIENT_NAME`, `XTM_USER_ID` and `XTM_PASSWORD` are required;
    /// `XTM_BASE_URL` and `XTM_TIMEOUT_MS` override the defaults.
    pub fn from_env() -> Result<Self> {
        let client_name = required_env("XTM_CLIENT_NAME")?;
        let password = required_env("XTM_PASSWORD")?;

        let user_id = required_env("XTM_USER_ID")?
            .parse::<u64>()
            .map_err(|_| XtmError::ConfigError {
                message: "XTM_USER_ID must be a numeric user id".to_string(),
            })?;

        let base_url =
            std::env::var("XTM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_ms = std::env::var("XTM_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_MS.to_string())
            .parse::<u64>()
            .map_err(|_| XtmError::ConfigError {
                message: "XTM_TIMEOUT_MS must be an integer number of milliseconds".to_string(),
            })?;

        Ok(Self {
            base_url,
            client_name,
            user_id,
            password,
            timeout_ms,
        })
    }

    /// Point the client at a different host (staging, mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the per-request timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(XtmError::ConfigError {
                message: "base_url is required".to_string(),
            });
        }

        if self.client_name.is_empty() {
            return Err(XtmError::ConfigError {
                message: "client_name is required".to_string(),
            });
        }

        if self.password.is_empty() {
            return Err(XtmError::ConfigError {
                message: "password is required".to_string(),
            });
        }

        if self.timeout_ms == 0 {
            return Err(XtmError::ConfigError {
                message: "timeout_ms must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Read a required environment variable
fn required_env(name: &'static str) -> Result<String> {
    std::env::var(name).map_err(|_| XtmError::ConfigError {
        message: format!("{} environment variable is required", name),
    })
}
