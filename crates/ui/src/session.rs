//! Drawing session: canvas, brush controls, and the guess action
//!
//! Pointer events arrive one at a time from the UI thread, so the session
//! is plain owned state passed by `&mut` to each handler.

use doodle_config::CanvasConfig;
use painting::{Color, ColorParseError, DrawingSurface, Point};
use tracing::{info, warn};

use crate::client::{ClientError, RelayClient};
use crate::state::GuessPanel;

/// An exported canvas waiting to be sent
#[derive(Debug, Clone)]
pub struct PendingGuess {
    image_data: String,
}

impl PendingGuess {
    /// PNG data URI of the canvas at the time of the request
    pub fn image_data(&self) -> &str {
        &self.image_data
    }

    pub async fn send(&self, client: &RelayClient) -> Result<String, ClientError> {
        client.request_guess(&self.image_data).await
    }
}

/// One user's drawing session
pub struct DrawingSession {
    canvas: DrawingSurface,
    panel: GuessPanel,
}

impl DrawingSession {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            canvas: DrawingSurface::from_config(config),
            panel: GuessPanel::new(),
        }
    }

    pub fn canvas(&self) -> &DrawingSurface {
        &self.canvas
    }

    pub fn panel(&self) -> &GuessPanel {
        &self.panel
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.canvas.begin_stroke(Point::new(x, y));
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.canvas.extend_stroke(Point::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        self.canvas.end_stroke();
    }

    pub fn pointer_leave(&mut self) {
        self.canvas.pointer_leave();
    }

    /// Brush size slider
    pub fn set_brush_width(&mut self, width: u32) {
        self.canvas.set_brush_width(width);
    }

    /// Color picker value, e.g. `#ff0000`
    pub fn set_brush_color(&mut self, hex: &str) -> Result<(), ColorParseError> {
        let color: Color = hex.parse()?;
        self.canvas.set_brush_color(color);
        Ok(())
    }

    /// Clear button
    pub fn clear(&mut self) {
        self.canvas.clear();
    }

    /// Export the canvas and enter the loading state
    ///
    /// Returns None while a previous request is still in flight, or if the
    /// export failed (the panel then shows the error).
    pub fn start_guess(&mut self) -> Option<PendingGuess> {
        if !self.panel.begin_request() {
            warn!("Guess already in flight, ignoring request");
            return None;
        }
        match self.canvas.export_data_uri() {
            Ok(image_data) => Some(PendingGuess { image_data }),
            Err(e) => {
                self.panel.finish::<ClientError>(Err(e.into()));
                None
            }
        }
    }

    /// Record the outcome of a request started with `start_guess`
    pub fn complete_guess(&mut self, result: Result<String, ClientError>) {
        match &result {
            Ok(guess) => info!(%guess, "Guess received"),
            Err(e) => warn!(error = %e, "Guess failed"),
        }
        self.panel.finish(result);
    }

    /// Export, send, and record the outcome in one awaited call
    pub async fn submit_guess(&mut self, client: &RelayClient) {
        let Some(pending) = self.start_guess() else {
            return;
        };
        let result = pending.send(client).await;
        self.complete_guess(result);
    }
}
