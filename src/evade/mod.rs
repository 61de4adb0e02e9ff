//! Decline-button evasion module
//!
//! Pure geometry and state for keeping the decline button out of reach of
//! the pointer. The TUI measures bounds and feeds events in; nothing here
//! touches the terminal.

pub mod controller;
pub mod geometry;

pub use controller::{EvadeSettings, EvasionController};
pub use geometry::{clamp_into_zone, Point, Rect};
