use crate::types::Color;

/// Canvas background. Clearing restores this, never transparency.
pub const BACKGROUND_COLOR: Color = Color::WHITE;

/// Header prepended to exported PNG payloads.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";
