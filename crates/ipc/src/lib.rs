//! Wire protocol for Doodle Guess
//!
//! Defines the JSON bodies exchanged between the drawing client and the
//! guess relay.

use serde::{Deserialize, Serialize};

/// Route the relay serves guesses on
pub const GUESS_ROUTE: &str = "/api/guess";

// ============================================================================
// Request Types
// ============================================================================

/// Body of `POST /api/guess`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRequest {
    /// Data URI or raw base64 image. Optional so a missing field is
    /// reported as invalid input rather than a decode failure.
    #[serde(rename = "imageData", default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
}

impl GuessRequest {
    pub fn new(image_data: impl Into<String>) -> Self {
        Self {
            image_data: Some(image_data.into()),
        }
    }

    /// Decode a request body
    pub fn from_json(body: &[u8]) -> Result<Self, IpcError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// The image payload, if present and non-empty
    pub fn image(&self) -> Option<&str> {
        self.image_data.as_deref().filter(|s| !s.is_empty())
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Successful guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResponse {
    pub guess: String,
}

/// Failed guess. Optional fields are omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Upstream HTTP status (upstream failures only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Upstream HTTP reason phrase (upstream failures only)
    #[serde(
        rename = "statusText",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub status_text: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            status: None,
            status_text: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("Failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),
}
