//! Celebration sequencer
//!
//! Schedules the burst choreography relative to accept-activation time:
//! a rapid-fire stream of small bursts for a fixed window, a large central
//! burst, and two secondary off-center bursts. All steps are fire-and-forget
//! against any `BurstSink`; nothing blocks the UI loop.

use crate::fx::confetti::{BurstSink, BurstSpec, DEFAULT_PALETTE};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Delay before the stream of small bursts begins
const STREAM_START: Duration = Duration::from_millis(50);
/// Length of the small-burst stream window
const STREAM_LEN: Duration = Duration::from_millis(1800);
/// Offset of the large central burst
const LARGE_AT: Duration = Duration::from_millis(300);
/// Offsets of the secondary off-center bursts
const SECOND_AT: Duration = Duration::from_millis(600);
const THIRD_AT: Duration = Duration::from_millis(900);

/// Timed burst choreography after accept activation
#[derive(Debug)]
pub struct CelebrationSequencer {
    activated_at: Option<Instant>,
    large_fired: bool,
    second_fired: bool,
    third_fired: bool,
    rng: SmallRng,
}

impl CelebrationSequencer {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            activated_at: None,
            large_fired: false,
            second_fired: false,
            third_fired: false,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Arm the sequence at `t0`. Returns `false` if already activated; a
    /// second activation never re-triggers the choreography.
    pub fn activate(&mut self, t0: Instant) -> bool {
        if self.activated_at.is_some() {
            return false;
        }
        self.activated_at = Some(t0);
        true
    }

    pub fn is_activated(&self) -> bool {
        self.activated_at.is_some()
    }

    /// Whether any scheduled step can still fire. A sparse tick cadence may
    /// leave one-shot bursts owed past the stream window; they keep the
    /// sequence running until delivered.
    pub fn is_running(&self, now: Instant) -> bool {
        match self.activated_at {
            Some(t0) => {
                now.duration_since(t0) < STREAM_START + STREAM_LEN
                    || !(self.large_fired && self.second_fired && self.third_fired)
            }
            None => false,
        }
    }

    /// Fire whatever is due at `now` into the sink.
    ///
    /// Called once per display-refresh tick; during the stream window every
    /// call emits one small burst at a randomized horizontal position with a
    /// vertically-biased origin band. One-shot bursts fire exactly once.
    pub fn tick(&mut self, now: Instant, sink: &mut impl BurstSink) {
        let Some(t0) = self.activated_at else {
            return;
        };
        let elapsed = now.duration_since(t0);

        if elapsed >= STREAM_START && elapsed < STREAM_START + STREAM_LEN {
            sink.burst(BurstSpec {
                origin: (self.rng.gen_range(0.0..1.0), self.rng.gen_range(0.0..0.3)),
                spread_deg: 90.0,
                velocity: 45.0,
                count: 12,
                ticks: 180,
                palette: DEFAULT_PALETTE,
            });
        }

        if elapsed >= LARGE_AT && !self.large_fired {
            self.large_fired = true;
            sink.burst(BurstSpec {
                origin: (0.5, 0.55),
                spread_deg: 140.0,
                velocity: 60.0,
                count: 300,
                ticks: 220,
                palette: DEFAULT_PALETTE,
            });
        }
        if elapsed >= SECOND_AT && !self.second_fired {
            self.second_fired = true;
            sink.burst(BurstSpec {
                origin: (0.25, 0.5),
                spread_deg: 120.0,
                velocity: 55.0,
                count: 150,
                ticks: 200,
                palette: DEFAULT_PALETTE,
            });
        }
        if elapsed >= THIRD_AT && !self.third_fired {
            self.third_fired = true;
            sink.burst(BurstSpec {
                origin: (0.75, 0.5),
                spread_deg: 120.0,
                velocity: 55.0,
                count: 150,
                ticks: 200,
                palette: DEFAULT_PALETTE,
            });
        }
    }
}

impl Default for CelebrationSequencer {
    fn default() -> Self {
        Self::new()
    }
}
