//! Guess relay for Doodle Guess
//!
//! Receives a canvas image, wraps it with a fixed instruction prompt into
//! a vendor-specific vision request, and maps the vendor's answer (or
//! failure) back into a normalized result.
//!
//! Vendor details live behind [`VisionAdapter`]; validation and error
//! shaping live in [`GuessRelay`] and never depend on the vendor.

pub mod adapter;
mod relay;
pub mod server;

pub use adapter::{GeminiAdapter, OpenAiCompatibleAdapter, VisionAdapter, adapter_for};
pub use relay::GuessRelay;
pub use server::router;

use doodle_ipc::ErrorResponse;
use thiserror::Error;

/// Instruction sent alongside every image
pub const GUESS_PROMPT: &str = "请仔细观察这张图片，描述你看到了什么。如果这是一幅画或涂鸦，请猜测画的是什么物体或场景。请用中文简洁地回答。(尽量缩短回答，最好不要超过10个字）";

/// Answer returned when the vendor responds without usable text
pub const FALLBACK_GUESS: &str = "无法识别图片内容";

const MSG_INVALID_INPUT: &str = "没有提供图片数据";
const MSG_MISCONFIGURED: &str = "API 密钥未配置";
const MSG_UPSTREAM: &str = "Vision API 调用失败";
const MSG_INTERNAL: &str = "服务器内部错误";

/// Sampling parameters shared by every vendor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_k: u32,
    pub top_p: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1024,
            top_k: 40,
            top_p: 0.95,
        }
    }
}

#[derive(Debug, Error)]
pub enum GuessError {
    /// No image in the request
    #[error("没有提供图片数据")]
    InvalidInput,

    /// Upstream credential not configured
    #[error("API 密钥未配置")]
    Misconfigured,

    /// The vision API answered with a non-success status
    #[error("Vision API 调用失败 ({status} {status_text})")]
    Upstream {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Anything else: transport failure, undecodable body, panicked task
    #[error("服务器内部错误: {0}")]
    Internal(String),
}

impl GuessError {
    /// HTTP status reported to the caller
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::Misconfigured | Self::Internal(_) => 500,
            Self::Upstream { status, .. } => *status,
        }
    }

    /// JSON body reported to the caller
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            Self::InvalidInput => ErrorResponse::new(MSG_INVALID_INPUT),
            Self::Misconfigured => ErrorResponse::new(MSG_MISCONFIGURED),
            Self::Upstream {
                status,
                status_text,
                body,
            } => ErrorResponse {
                error: MSG_UPSTREAM.to_string(),
                details: Some(body.clone()),
                status: Some(*status),
                status_text: Some(status_text.clone()),
            },
            Self::Internal(details) => ErrorResponse::new(MSG_INTERNAL).with_details(details),
        }
    }
}

/// Remove a `data:image/<type>;base64,` header if present
///
/// `<type>` must be word characters only; anything else is returned
/// unchanged, as is a raw base64 payload.
pub fn strip_data_uri_prefix(input: &str) -> &str {
    let Some(rest) = input.strip_prefix("data:image/") else {
        return input;
    };
    let Some((subtype, payload)) = rest.split_once(";base64,") else {
        return input;
    };
    let is_word = !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if is_word { payload } else { input }
}

/// Re-wrap a bare base64 payload as a PNG data URI
pub fn png_data_uri(image_base64: &str) -> String {
    format!("data:image/png;base64,{image_base64}")
}
