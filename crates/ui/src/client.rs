//! HTTP client for the guess relay

use doodle_ipc::{ErrorResponse, GUESS_ROUTE, GuessRequest, GuessResponse};
use painting::ExportError;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

/// Shown when the relay fails without a usable error message
pub const GENERIC_FAILURE: &str = "请求失败";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The relay answered with an error status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The relay could not be reached or its body could not be read
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The canvas could not be encoded
    #[error("{0}")]
    Export(#[from] ExportError),
}

/// Sends canvas images to the relay's guess route
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    url: String,
}

impl RelayClient {
    /// `base_url` is the relay origin, e.g. `http://127.0.0.1:3000`
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            url: format!("{}{}", base_url.trim_end_matches('/'), GUESS_ROUTE),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Post one image and wait for the guess
    pub async fn request_guess(&self, image_data: &str) -> Result<String, ClientError> {
        debug!(url = %self.url, image_len = image_data.len(), "Requesting guess");
        let response = self
            .client
            .post(&self.url)
            .json(&GuessRequest::new(image_data))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await?;
            let message = serde_json::from_slice::<ErrorResponse>(&body)
                .ok()
                .map(|e| e.error)
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            warn!(status = status.as_u16(), %message, "Guess rejected");
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let GuessResponse { guess } = response.json().await?;
        Ok(guess)
    }
}
