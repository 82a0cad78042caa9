//! Image export

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;
use tracing::info;

use crate::constants::PNG_DATA_URI_PREFIX;
use crate::pipeline::DrawingSurface;
use crate::surface::CpuSurface;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

impl CpuSurface {
    /// Encode the surface as an RGBA PNG
    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(
            self.as_bytes(),
            self.width,
            self.height,
            ExtendedColorType::Rgba8,
        )?;
        Ok(png)
    }
}

impl DrawingSurface {
    /// Encode the current bitmap as PNG bytes. Does not modify the canvas.
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        self.surface().encode_png()
    }

    /// Encode the current bitmap as a `data:image/png;base64,...` URI
    pub fn export_data_uri(&self) -> Result<String, ExportError> {
        let png = self.export_png()?;
        info!(
            "Exported {}x{} canvas ({} PNG bytes)",
            self.width(),
            self.height(),
            png.len()
        );
        Ok(format!("{PNG_DATA_URI_PREFIX}{}", BASE64.encode(png)))
    }
}
