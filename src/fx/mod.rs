//! Visual effects module
//!
//! Confetti bursts, decorative hearts, the message box overlay, and the
//! celebration choreography that ties them together.

pub mod confetti;
pub mod hearts;
pub mod message;
pub mod sequencer;

pub use confetti::{BurstSink, BurstSpec, ConfettiEngine};
pub use hearts::HeartField;
pub use message::MessageBox;
pub use sequencer::CelebrationSequencer;
