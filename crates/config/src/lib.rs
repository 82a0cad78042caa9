//! Shared configuration for Doodle Guess
//!
//! This crate provides the single source of truth for canvas dimensions,
//! brush limits, and the relay's upstream settings shared by the drawing
//! client and the relay server.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;

/// Default canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;

/// Smallest brush width the controls allow
pub const MIN_BRUSH_WIDTH: u32 = 1;

/// Largest brush width the controls allow
pub const MAX_BRUSH_WIDTH: u32 = 20;

/// Brush width at session start
pub const DEFAULT_BRUSH_WIDTH: u32 = 5;

/// Brush color at session start
pub const DEFAULT_BRUSH_COLOR: &str = "#000000";

/// Address the relay listens on when none is configured
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Canvas configuration for the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl CanvasConfig {
    /// Create a new canvas config with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total pixel count
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// Upstream vision API the relay talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VisionProvider {
    /// OpenAI-compatible chat-completions endpoint (OpenRouter by default)
    #[default]
    OpenAiCompatible,
    /// Native Gemini generate-content endpoint
    Gemini,
}

impl VisionProvider {
    /// Parse a provider name, falling back to the default on unknown input
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "openrouter" | "openai" | "openai-compatible" => Self::OpenAiCompatible,
            "gemini" | "google" => Self::Gemini,
            other => {
                warn!("Unknown vision provider {:?}, using default", other);
                Self::default()
            }
        }
    }
}

/// Relay configuration, read once at startup
#[derive(Debug, Clone, Default)]
pub struct RelayConfig {
    pub provider: VisionProvider,
    /// Upstream credential. Absence is reported per request, not at load.
    pub api_key: Option<String>,
    /// Overrides the provider's default endpoint
    pub endpoint: Option<String>,
    /// Overrides the provider's default model
    pub model: Option<String>,
    /// Application title sent to providers that accept one
    pub app_title: Option<String>,
    pub bind_addr: String,
    /// No timeout is enforced when unset
    pub upstream_timeout: Option<Duration>,
}

impl RelayConfig {
    /// Parse from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse using an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let upstream_timeout = get("DOODLE_UPSTREAM_TIMEOUT_SECS").and_then(|v| {
            match v.trim().parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    warn!("Ignoring invalid upstream timeout {:?}", v);
                    None
                }
            }
        });

        Self {
            provider: get("DOODLE_VISION_PROVIDER")
                .map(|v| VisionProvider::parse(&v))
                .unwrap_or_default(),
            api_key: get("DOODLE_VISION_API_KEY"),
            endpoint: get("DOODLE_VISION_ENDPOINT"),
            model: get("DOODLE_VISION_MODEL"),
            app_title: get("DOODLE_APP_TITLE"),
            bind_addr: get("DOODLE_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            upstream_timeout,
        }
    }

    /// Whether an upstream credential is present
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_canvas() {
        let config = CanvasConfig::default();
        assert_eq!(config.width, DEFAULT_CANVAS_WIDTH);
        assert_eq!(config.height, DEFAULT_CANVAS_HEIGHT);
        assert_eq!(config.pixel_count(), 480_000);
    }

    #[test]
    fn test_empty_environment() {
        let config = RelayConfig::from_lookup(lookup(&[]));
        assert_eq!(config.provider, VisionProvider::OpenAiCompatible);
        assert!(!config.has_credential());
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert!(config.upstream_timeout.is_none());
    }

    #[test]
    fn test_blank_key_is_absent() {
        let config = RelayConfig::from_lookup(lookup(&[("DOODLE_VISION_API_KEY", "   ")]));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_full_environment() {
        let config = RelayConfig::from_lookup(lookup(&[
            ("DOODLE_VISION_PROVIDER", "Gemini"),
            ("DOODLE_VISION_API_KEY", "secret"),
            ("DOODLE_VISION_MODEL", "gemini-2.0-flash"),
            ("DOODLE_BIND_ADDR", "0.0.0.0:8080"),
            ("DOODLE_UPSTREAM_TIMEOUT_SECS", "30"),
        ]));
        assert_eq!(config.provider, VisionProvider::Gemini);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model.as_deref(), Some("gemini-2.0-flash"));
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_invalid_timeout_ignored() {
        let config =
            RelayConfig::from_lookup(lookup(&[("DOODLE_UPSTREAM_TIMEOUT_SECS", "soon")]));
        assert!(config.upstream_timeout.is_none());
    }

    #[test]
    fn test_unknown_provider_falls_back() {
        assert_eq!(
            VisionProvider::parse("anthropic"),
            VisionProvider::OpenAiCompatible
        );
        assert_eq!(VisionProvider::parse("openrouter"), VisionProvider::OpenAiCompatible);
    }
}
