//! OpenAI-compatible chat-completions adapter (OpenRouter by default)

use doodle_config::RelayConfig;
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{VisionAdapter, non_blank};
use crate::{GenerationParams, png_data_uri};

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_APP_TITLE: &str = "Doodle Guess";

/// Bearer-token chat-completions vendor
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleAdapter {
    endpoint: String,
    model: String,
    /// Sent as `X-Title`, which OpenRouter uses for attribution
    app_title: Option<String>,
}

impl Default for OpenAiCompatibleAdapter {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            app_title: Some(DEFAULT_APP_TITLE.to_string()),
        }
    }
}

impl OpenAiCompatibleAdapter {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            app_title: None,
        }
    }

    pub fn with_app_title(mut self, title: impl Into<String>) -> Self {
        self.app_title = Some(title.into());
        self
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        let defaults = Self::default();
        Self {
            endpoint: config.endpoint.clone().unwrap_or(defaults.endpoint),
            model: config.model.clone().unwrap_or(defaults.model),
            app_title: config.app_title.clone().or(defaults.app_title),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Option<Vec<Choice>>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl VisionAdapter for OpenAiCompatibleAdapter {
    fn name(&self) -> &'static str {
        "openai-compatible"
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request(&self, image_base64: &str, prompt: &str, params: &GenerationParams) -> Value {
        json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": prompt },
                        {
                            "type": "image_url",
                            "image_url": { "url": png_data_uri(image_base64) }
                        }
                    ]
                }
            ],
            "temperature": params.temperature,
            "max_tokens": params.max_tokens,
        })
    }

    fn authorize(&self, request: RequestBuilder, credential: &str) -> RequestBuilder {
        let request = request.bearer_auth(credential);
        match &self.app_title {
            Some(title) => request.header("X-Title", title),
            None => request,
        }
    }

    fn parse_response(&self, body: &Value) -> Option<String> {
        let completion = ChatCompletion::deserialize(body).ok()?;
        let content = completion
            .choices?
            .into_iter()
            .next()?
            .message?
            .content;
        non_blank(content)
    }
}
