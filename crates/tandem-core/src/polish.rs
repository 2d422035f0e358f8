//! ============================================================================
//! Pitch Polisher - Text generation via the Gemini API
//! ============================================================================
//! Two operations back the profile editor:
//! - polish: rewrite a pitch to be concise, motivating, and premium
//! - compatibility: a one-sentence read on why two partners fit
//!
//! Both degrade gracefully. Any failure (no credential, network, quota,
//! malformed response) returns the caller's text unchanged for polish, or a
//! fixed fallback sentence for compatibility. The UI always has something
//! to show and never surfaces a provider error.
//! ============================================================================

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::AppConfig;

/// Gemini generateContent endpoint root
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Sentence shown when a compatibility read cannot be produced
pub const COMPATIBILITY_FALLBACK: &str = "Great potential for shared growth.";

/// Gateway to the Gemini text-generation API
pub struct PitchPolisher {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl PitchPolisher {
    /// Create a polisher from application config
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// Point the gateway at a different endpoint root (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether a provider credential is configured
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Rewrite a pitch for the given habit.
    ///
    /// Returns the rewritten text on success, trimmed of surrounding
    /// whitespace. Returns the input unchanged when the text is empty, no
    /// credential is configured, or the call fails. Never errors.
    pub async fn polish(&self, raw_text: &str, habit_label: &str) -> String {
        if raw_text.trim().is_empty() {
            return raw_text.to_string();
        }

        let api_key = match self.api_key.as_deref() {
            Some(key) => key,
            None => {
                debug!("no Gemini credential configured, returning pitch unchanged");
                return raw_text.to_string();
            }
        };

        let prompt = format!(
            "You are an editor for a premium, calm accountability app called \"Tandem\". \
             The user is writing a pitch to find an accountability partner for the habit of \"{}\". \
             Rewrite the following text to be concise, motivating, and premium. \
             Max 140 characters. No emojis. Tone: Serious, dedicated, but warm.\n\n\
             Input: \"{}\"",
            habit_label, raw_text
        );

        match self.generate(api_key, &prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("polish request failed, keeping original pitch: {}", e);
                raw_text.to_string()
            }
        }
    }

    /// One short sentence on why two partners work well together.
    ///
    /// Returns [`COMPATIBILITY_FALLBACK`] when no credential is configured
    /// or the call fails. Never errors.
    pub async fn compatibility(&self, bio_a: &str, bio_b: &str) -> String {
        let api_key = match self.api_key.as_deref() {
            Some(key) => key,
            None => {
                debug!("no Gemini credential configured, using compatibility fallback");
                return COMPATIBILITY_FALLBACK.to_string();
            }
        };

        let prompt = format!(
            "Analyze compatibility between two accountability partners.\n\
             Person A: \"{}\"\n\
             Person B: \"{}\"\n\
             Output a single short sentence (max 10 words) highlighting why they work well together.",
            bio_a, bio_b
        );

        match self.generate(api_key, &prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("compatibility request failed, using fallback: {}", e);
                COMPATIBILITY_FALLBACK.to_string()
            }
        }
    }

    /// Single-turn generateContent call, returning the first candidate's text
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String> {
        debug!("calling Gemini ({}, {} prompt chars)", self.model, prompt.len());

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to call Gemini API: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Gemini API error {}: {}", status, error_detail(&body)));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse Gemini response: {}", e))?;

        let text = parsed
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
            .ok_or_else(|| anyhow!("No text in Gemini response"))?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("Gemini returned empty text"));
        }

        Ok(trimmed.to_string())
    }
}

/// Pull the human-readable message out of a Gemini error body, if present
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| wrapper.error.message)
        .unwrap_or_else(|| body.to_string())
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_GEMINI_MODEL;
    use mockito::Server;

    fn offline_polisher() -> PitchPolisher {
        PitchPolisher::from_config(&AppConfig::offline())
    }

    fn online_polisher(base_url: &str) -> PitchPolisher {
        let config = AppConfig {
            gemini_api_key: Some("test-key".to_string()),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            request_timeout_secs: 5,
        };
        PitchPolisher::from_config(&config).with_base_url(base_url)
    }

    fn success_body(text: &str) -> String {
        serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": text } ] } }
            ]
        })
        .to_string()
    }

    // mockito matches the path together with the query string
    const GENERATE_PATH: &str = "/gemini-2.5-flash:generateContent?key=test-key";

    #[tokio::test]
    async fn test_polish_without_credential_returns_input() {
        let polisher = offline_polisher();
        assert!(!polisher.is_enabled());
        assert_eq!(polisher.polish("Training hard", "Running").await, "Training hard");
        assert_eq!(polisher.polish("", "Running").await, "");
    }

    #[tokio::test]
    async fn test_polish_skips_provider_for_empty_text() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", GENERATE_PATH)
            .with_status(200)
            .with_body(success_body("unused"))
            .expect(0)
            .create_async()
            .await;

        let polisher = online_polisher(&server.url());
        assert_eq!(polisher.polish("   ", "Running").await, "   ");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_polish_provider_failure_returns_input() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", GENERATE_PATH)
            .with_status(500)
            .with_body(r#"{"error":{"message":"quota exceeded"}}"#)
            .create_async()
            .await;

        let polisher = online_polisher(&server.url());
        assert_eq!(polisher.polish("Training hard", "Running").await, "Training hard");
    }

    #[tokio::test]
    async fn test_polish_success_trims_whitespace() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", GENERATE_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(success_body("  Ready to commit.  "))
            .create_async()
            .await;

        let polisher = online_polisher(&server.url());
        assert_eq!(polisher.polish("I want to commit", "Running").await, "Ready to commit.");
    }

    #[tokio::test]
    async fn test_polish_blank_response_returns_input() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", GENERATE_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(success_body("   "))
            .create_async()
            .await;

        let polisher = online_polisher(&server.url());
        assert_eq!(polisher.polish("Training hard", "Running").await, "Training hard");
    }

    #[tokio::test]
    async fn test_polish_malformed_response_returns_input() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", GENERATE_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let polisher = online_polisher(&server.url());
        assert_eq!(polisher.polish("Training hard", "Running").await, "Training hard");
    }

    #[tokio::test]
    async fn test_compatibility_without_credential_uses_fallback() {
        let polisher = offline_polisher();
        let result = polisher.compatibility("bio a", "bio b").await;
        assert_eq!(result, COMPATIBILITY_FALLBACK);
    }

    #[tokio::test]
    async fn test_compatibility_failure_uses_fallback() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", GENERATE_PATH)
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let polisher = online_polisher(&server.url());
        let result = polisher.compatibility("bio a", "bio b").await;
        assert_eq!(result, COMPATIBILITY_FALLBACK);
    }

    #[tokio::test]
    async fn test_compatibility_success() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", GENERATE_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(success_body("Shared discipline, matched schedules."))
            .create_async()
            .await;

        let polisher = online_polisher(&server.url());
        let result = polisher.compatibility("bio a", "bio b").await;
        assert_eq!(result, "Shared discipline, matched schedules.");
    }

    #[test]
    fn test_error_detail_extraction() {
        assert_eq!(
            error_detail(r#"{"error":{"message":"API key not valid"}}"#),
            "API key not valid"
        );
        assert_eq!(error_detail("plain text error"), "plain text error");
    }
}
