//! Doodle Guess painting system - raster drawing surface
//!
//! This crate provides the client-side canvas:
//! - [`types::Point`] and [`types::StrokeSegment`] - stroke geometry
//! - [`types::Color`] / [`validation`] - brush colors and hex parsing
//! - [`brush`] - bounded brush settings
//! - [`surface`] - CPU RGBA8 surface, initialized to opaque white
//! - [`stroke`] - round-capped segment rasterization
//! - [`pipeline`] - the drawing surface and its stroke state machine
//! - [`export`] - PNG / data URI export

pub mod brush;
pub mod constants;
pub mod export;
pub mod pipeline;
pub mod stroke;
pub mod surface;
pub mod types;
pub mod validation;

pub use brush::*;
pub use constants::*;
pub use export::*;
pub use pipeline::*;
pub use surface::*;
pub use types::*;
pub use validation::*;
