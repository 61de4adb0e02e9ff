//! Background music module
//!
//! A small playback capability behind the `AudioBackend` trait, plus the
//! `MusicPlayer` that owns the autoplay fallback ladder. Playback initiation
//! is the only fallible operation in the whole application; failures are
//! logged and retried, never fatal.

pub mod player;
pub mod rodio;

pub use player::{AutoplayStrategy, MusicPlayer};
pub use self::rodio::RodioBackend;

use crate::Result;

/// Playback handle the player drives
///
/// `play` may fail when the output device is unavailable or the track cannot
/// be decoded; everything else is infallible. Implementations must report
/// real element state through `is_paused` so callers can avoid duplicate
/// play calls.
pub trait AudioBackend {
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    fn set_muted(&mut self, muted: bool);
    fn set_volume(&mut self, volume: f32);
    fn is_paused(&self) -> bool;
}
