use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

const SITEVERIFY_ENDPOINT: &str = "https://www.google.com/recaptcha/api/siteverify";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Human-presence check for a submission token. Implementations fail closed:
/// any ambiguity in the verification outcome is a rejection.
pub trait HumanVerifier {
    fn verify_token(&self, token: &str) -> bool;
}

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    #[serde(default)]
    success: bool,
}

/// Thin HTTP client for the reCAPTCHA siteverify endpoint.
#[derive(Debug, Clone)]
pub struct RecaptchaVerifier {
    client: reqwest::Client,
    endpoint: String,
    secret: String,
}

impl RecaptchaVerifier {
    /// Create a verifier for the real siteverify endpoint.
    pub fn new(secret: impl Into<String>) -> Self {
        Self::with_endpoint(secret, SITEVERIFY_ENDPOINT)
    }

    /// Create a verifier against a specific endpoint (e.g. a stand-in server).
    pub fn with_endpoint(secret: impl Into<String>, endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build verification client");
        Self {
            client,
            endpoint: endpoint.into(),
            secret: secret.into(),
        }
    }

    fn post_verification(&self, token: &str) -> Result<SiteVerifyResponse, String> {
        let request = self
            .client
            .post(&self.endpoint)
            .form(&[("secret", self.secret.as_str()), ("response", token)]);

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let response = request
                    .send()
                    .await
                    .map_err(|error| format!("verification request failed: {error}"))?;
                response
                    .json::<SiteVerifyResponse>()
                    .await
                    .map_err(|error| format!("malformed verification response: {error}"))
            })
        })
    }
}

impl HumanVerifier for RecaptchaVerifier {
    fn verify_token(&self, token: &str) -> bool {
        match self.post_verification(token) {
            Ok(response) => response.success,
            Err(error) => {
                eprintln!(
                    "{}",
                    json!({
                        "component": "recaptcha_verifier",
                        "level": "error",
                        "event": "verification_request_failed",
                        "timestamp": chrono::Utc::now().to_rfc3339(),
                        "details": { "error": error },
                    })
                );
                false
            }
        }
    }
}
