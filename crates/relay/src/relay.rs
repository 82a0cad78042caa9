//! The guess relay: validation, upstream call, and result shaping

use doodle_config::RelayConfig;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::adapter::{VisionAdapter, adapter_for};
use crate::{FALLBACK_GUESS, GUESS_PROMPT, GenerationParams, GuessError, strip_data_uri_prefix};

/// Stateless relay from canvas images to a vision model's guess
///
/// Each call is independent: concurrent calls are neither coalesced nor
/// deduplicated, and nothing is shared between them except configuration.
pub struct GuessRelay {
    client: Client,
    adapter: Box<dyn VisionAdapter>,
    credential: Option<String>,
    prompt: String,
    params: GenerationParams,
}

impl GuessRelay {
    /// Create a relay with a default HTTP client (transport-default timeouts)
    pub fn new(adapter: Box<dyn VisionAdapter>, credential: Option<String>) -> Self {
        Self {
            client: Client::new(),
            adapter,
            credential,
            prompt: GUESS_PROMPT.to_string(),
            params: GenerationParams::default(),
        }
    }

    /// Create a relay from configuration, honoring the optional upstream timeout
    pub fn from_config(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.upstream_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            ..Self::new(adapter_for(config), config.api_key.clone())
        })
    }

    pub fn adapter(&self) -> &dyn VisionAdapter {
        self.adapter.as_ref()
    }

    /// Ask the vision model what `image_data` depicts
    ///
    /// `image_data` may be a data URI or raw base64. Failures are always
    /// returned as a [`GuessError`]; a successful upstream response without
    /// an answer yields [`FALLBACK_GUESS`].
    pub async fn guess(&self, image_data: Option<&str>) -> Result<String, GuessError> {
        let image = image_data
            .filter(|s| !s.is_empty())
            .ok_or(GuessError::InvalidInput)?;

        info!(
            has_credential = self.credential.is_some(),
            credential_len = self.credential.as_deref().map_or(0, str::len),
            "Credential check"
        );
        let credential = self
            .credential
            .as_deref()
            .ok_or(GuessError::Misconfigured)?;

        let image_base64 = strip_data_uri_prefix(image);
        let payload = self
            .adapter
            .build_request(image_base64, &self.prompt, &self.params);

        info!(
            adapter = self.adapter.name(),
            endpoint = self.adapter.endpoint(),
            image_len = image_base64.len(),
            "Calling vision API"
        );

        let request = self
            .client
            .post(self.adapter.endpoint())
            .json(&payload);
        let response = self
            .adapter
            .authorize(request, credential)
            .send()
            .await
            .map_err(|e| internal("vision request failed", e))?;

        let status = response.status();
        info!(
            status = status.as_u16(),
            reason = status.canonical_reason().unwrap_or(""),
            "Vision API responded"
        );

        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| internal("reading vision error body failed", e))?;
            error!(
                status = status.as_u16(),
                body = %body,
                "Vision API returned an error"
            );
            return Err(GuessError::Upstream {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| internal("vision response decode failed", e))?;
        debug!(body = %body, "Vision API response body");

        Ok(match self.adapter.parse_response(&body) {
            Some(guess) => guess,
            None => {
                warn!("Vision API response had no answer text, using fallback");
                FALLBACK_GUESS.to_string()
            }
        })
    }
}

fn internal(context: &str, err: reqwest::Error) -> GuessError {
    error!(error = %err, "{context}");
    GuessError::Internal(err.to_string())
}
