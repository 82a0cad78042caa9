//! Native Gemini generate-content adapter

use doodle_config::RelayConfig;
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{VisionAdapter, non_blank};
use crate::GenerationParams;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

fn default_endpoint(model: &str) -> String {
    format!("https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent")
}

/// API-key-in-query multimodal vendor
#[derive(Debug, Clone)]
pub struct GeminiAdapter {
    endpoint: String,
}

impl Default for GeminiAdapter {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(DEFAULT_MODEL),
        }
    }
}

impl GeminiAdapter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// The model is part of the URL, so an explicit endpoint wins over it
    pub fn from_config(config: &RelayConfig) -> Self {
        let endpoint = match (&config.endpoint, &config.model) {
            (Some(endpoint), _) => endpoint.clone(),
            (None, Some(model)) => default_endpoint(model),
            (None, None) => default_endpoint(DEFAULT_MODEL),
        };
        Self { endpoint }
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl VisionAdapter for GeminiAdapter {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request(&self, image_base64: &str, prompt: &str, params: &GenerationParams) -> Value {
        json!({
            "contents": [
                {
                    "parts": [
                        { "text": prompt },
                        {
                            "inline_data": {
                                "mime_type": "image/png",
                                "data": image_base64
                            }
                        }
                    ]
                }
            ],
            "generationConfig": {
                "temperature": params.temperature,
                "topK": params.top_k,
                "topP": params.top_p,
                "maxOutputTokens": params.max_tokens,
            }
        })
    }

    fn authorize(&self, request: RequestBuilder, credential: &str) -> RequestBuilder {
        request.query(&[("key", credential)])
    }

    fn parse_response(&self, body: &Value) -> Option<String> {
        let response = GenerateContentResponse::deserialize(body).ok()?;
        let text = response
            .candidates?
            .into_iter()
            .next()?
            .content?
            .parts?
            .into_iter()
            .next()?
            .text;
        non_blank(text)
    }
}
