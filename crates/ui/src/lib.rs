//! Client-side model for Doodle Guess
//!
//! The UI framework owns layout and event dispatch; this crate owns what
//! those events do: the drawing session, the guess panel, and the call to
//! the relay.

pub mod client;
pub mod session;
pub mod state;

pub use client::{ClientError, RelayClient};
pub use session::{DrawingSession, PendingGuess};
pub use state::{GuessPanel, PanelStatus};
