//! Vendor adapters
//!
//! Each adapter knows one upstream's endpoint, payload shape, auth scheme,
//! and where the answer text sits in its response. Swapping providers
//! touches only this module.

mod gemini;
mod openai;

pub use gemini::GeminiAdapter;
pub use openai::OpenAiCompatibleAdapter;

use doodle_config::{RelayConfig, VisionProvider};
use reqwest::RequestBuilder;
use serde_json::Value;

use crate::GenerationParams;

/// Trait for upstream vision APIs
pub trait VisionAdapter: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// URL requests are POSTed to
    fn endpoint(&self) -> &str;

    /// Build the JSON payload for one image and prompt.
    /// `image_base64` carries no data URI header.
    fn build_request(&self, image_base64: &str, prompt: &str, params: &GenerationParams) -> Value;

    /// Attach the credential the way this vendor expects it
    fn authorize(&self, request: RequestBuilder, credential: &str) -> RequestBuilder;

    /// Extract the answer text, or None if the expected field is absent
    fn parse_response(&self, body: &Value) -> Option<String>;
}

/// Build the adapter selected by configuration
pub fn adapter_for(config: &RelayConfig) -> Box<dyn VisionAdapter> {
    match config.provider {
        VisionProvider::OpenAiCompatible => Box::new(OpenAiCompatibleAdapter::from_config(config)),
        VisionProvider::Gemini => Box::new(GeminiAdapter::from_config(config)),
    }
}

/// Treat blank answers as absent
fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
