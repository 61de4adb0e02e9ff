//! Music player with autoplay fallback ladder
//!
//! Platform policy can block playback until a user gesture, so autoplay is
//! attempted through an ordered list of strategies, retried at scheduled
//! delays after startup and again when the terminal regains focus. If every
//! strategy fails, the player arms itself and starts on the first
//! qualifying interaction. `is_playing` is the single source of truth for
//! playback state; every mutation checks it before touching the backend.

use crate::audio::AudioBackend;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Scheduled autoplay attempt delays after startup
pub const AUTOPLAY_DELAYS_MS: &[u64] = &[0, 100, 500, 1000, 2000, 3000];

/// Delay before the attempt fired on focus regain
const FOCUS_RETRY: Duration = Duration::from_millis(500);

/// One rung of the fallback ladder, tried in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayStrategy {
    /// Plain play call
    Direct,
    /// Play muted, then unmute shortly after
    MutedThenUnmute,
    /// Play at near-zero volume, then restore the configured volume
    LowVolume,
}

impl AutoplayStrategy {
    pub fn all() -> &'static [AutoplayStrategy] {
        &[
            AutoplayStrategy::Direct,
            AutoplayStrategy::MutedThenUnmute,
            AutoplayStrategy::LowVolume,
        ]
    }
}

/// Background music controller
pub struct MusicPlayer<B: AudioBackend> {
    backend: B,
    volume: f32,
    muted: bool,
    is_playing: bool,
    /// Set once the ladder is exhausted; cleared on first successful play
    armed: bool,
    /// Pending scheduled attempt deadlines
    pending: Vec<Instant>,
}

impl<B: AudioBackend> MusicPlayer<B> {
    pub fn new(mut backend: B, volume: f32) -> Self {
        backend.set_volume(volume);
        Self {
            backend,
            volume,
            muted: false,
            is_playing: false,
            armed: false,
            pending: Vec::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Whether the interaction fallback is armed
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Queue the startup attempt schedule relative to `now`
    pub fn schedule_startup_attempts(&mut self, now: Instant) {
        self.pending = AUTOPLAY_DELAYS_MS
            .iter()
            .map(|ms| now + Duration::from_millis(*ms))
            .collect();
    }

    /// Pop due deadlines; returns `true` if an attempt should run now
    pub fn attempt_due(&mut self, now: Instant) -> bool {
        let before = self.pending.len();
        self.pending.retain(|deadline| *deadline > now);
        before != self.pending.len() && !self.is_playing
    }

    /// Run the fallback ladder once, stopping at the first success.
    ///
    /// Each strategy's outcome is consumed before the next is tried; if all
    /// fail the one-shot interaction fallback is armed.
    pub async fn attempt_autoplay(&mut self) {
        if self.is_playing {
            return;
        }
        for strategy in AutoplayStrategy::all() {
            debug!(?strategy, "attempting autoplay");
            match self.try_strategy(*strategy).await {
                Ok(()) => {
                    info!(?strategy, "autoplay succeeded");
                    self.is_playing = true;
                    self.armed = false;
                    return;
                }
                Err(err) => {
                    debug!(?strategy, %err, "autoplay strategy failed");
                }
            }
        }
        if !self.armed {
            warn!("all autoplay strategies failed, arming interaction fallback");
            self.armed = true;
        }
    }

    async fn try_strategy(&mut self, strategy: AutoplayStrategy) -> crate::Result<()> {
        match strategy {
            AutoplayStrategy::Direct => self.try_play(),
            AutoplayStrategy::MutedThenUnmute => {
                self.backend.set_muted(true);
                let result = self.try_play();
                if result.is_ok() {
                    sleep(Duration::from_millis(100)).await;
                }
                self.backend.set_muted(self.muted);
                result
            }
            AutoplayStrategy::LowVolume => {
                self.backend.set_volume(0.01);
                let result = self.try_play();
                if result.is_ok() {
                    sleep(Duration::from_millis(200)).await;
                }
                self.backend.set_volume(self.volume);
                result
            }
        }
    }

    /// Play unless the element already reports playing
    fn try_play(&mut self) -> crate::Result<()> {
        if !self.backend.is_paused() {
            return Ok(());
        }
        self.backend.play()
    }

    /// A qualifying user interaction occurred (key press, button press).
    ///
    /// Starts playback on the first such event after a failed ladder and
    /// then effectively detaches: once playing, further events are no-ops.
    pub fn on_interaction(&mut self) {
        if self.is_playing {
            return;
        }
        match self.try_play() {
            Ok(()) => {
                info!("music started via user interaction");
                self.is_playing = true;
                self.armed = false;
            }
            Err(err) => {
                debug!(%err, "play on interaction failed");
            }
        }
    }

    /// The terminal regained focus; schedule one more attempt
    pub fn on_focus_gained(&mut self, now: Instant) {
        if !self.is_playing {
            self.pending.push(now + FOCUS_RETRY);
        }
    }

    /// Make sure music is running (called at accept activation)
    pub fn ensure_playing(&mut self) {
        self.on_interaction();
    }

    /// Toggle play/pause from the music control key.
    ///
    /// An explicit pause sticks: any queued startup or focus retries are
    /// dropped so they cannot silently restart playback.
    pub fn toggle_play(&mut self) {
        if self.is_playing {
            self.backend.pause();
            self.is_playing = false;
            self.pending.clear();
        } else if self.try_play().is_ok() {
            self.is_playing = true;
        }
    }

    /// Toggle mute from the music control key
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.backend.set_muted(self.muted);
    }
}
