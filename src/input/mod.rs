//! Host input handling for the diagram canvas.
//!
//! ## Architecture
//!
//! The host translates native pointer, wheel and key events into the types in
//! `events` and calls into an [`EditingSession`]. The session owns one
//! viewport, one drop-zone registry and one mode controller, and tracks the
//! pointer with an explicit state machine (`PointerState`).
//!
//! ## Modules
//!
//! - `events` - Host event types (buttons, wheel deltas)
//! - `state` - Pointer state machine
//! - `session` - Event routing into viewport, modes and drop zones

mod events;
mod session;
mod state;

pub use events::{PointerButton, WheelDelta, WheelEvent};
pub use session::EditingSession;
pub use state::PointerState;
