//! ============================================================================
//! Application Configuration
//! ============================================================================

use serde::{Deserialize, Serialize};

/// Default Gemini model for text generation
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default timeout for outbound provider requests, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Runtime configuration, normally read from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini API key; when absent, polish and compatibility degrade to
    /// their offline behavior instead of erroring
    pub gemini_api_key: Option<String>,
    /// Model identifier used for text generation requests
    pub gemini_model: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            gemini_model: std::env::var("TANDEM_GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Config with no provider credential, regardless of the environment
    pub fn offline() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_config_has_no_credential() {
        let config = AppConfig::offline();
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }
}
