//! Integration tests for the audio autoplay fallback ladder

use smitten::audio::{AudioBackend, MusicPlayer};
use smitten::{Result, SmittenError};
use std::time::{Duration, Instant};

/// Backend that rejects the first `fail_count` play calls, like a platform
/// blocking autoplay until a user gesture.
struct BlockedBackend {
    fail_count: usize,
    play_calls: usize,
    paused: bool,
    muted: bool,
    volume: f32,
}

impl BlockedBackend {
    fn new(fail_count: usize) -> Self {
        Self {
            fail_count,
            play_calls: 0,
            paused: true,
            muted: false,
            volume: 1.0,
        }
    }
}

impl AudioBackend for BlockedBackend {
    fn play(&mut self) -> Result<()> {
        self.play_calls += 1;
        if self.play_calls <= self.fail_count {
            return Err(SmittenError::AudioError("autoplay blocked".into()));
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

#[tokio::test]
async fn test_blocked_autoplay_degrades_to_interaction_start() {
    // Every ladder strategy fails
    let mut player = MusicPlayer::new(BlockedBackend::new(usize::MAX), 0.3);

    let t0 = Instant::now();
    player.schedule_startup_attempts(t0);

    // Drain the whole retry schedule; playback never starts and nothing
    // panics or propagates
    let mut now = t0;
    for _ in 0..8 {
        now += Duration::from_millis(600);
        if player.attempt_due(now) {
            player.attempt_autoplay().await;
        }
    }
    assert!(!player.is_playing());
    assert!(player.is_armed());
}

#[tokio::test]
async fn test_interaction_after_block_starts_playback_exactly_once() {
    // Ladder fails, but the block lifts afterwards (user gesture arrived)
    let mut player = MusicPlayer::new(BlockedBackend::new(3), 0.3);
    player.attempt_autoplay().await;
    assert!(!player.is_playing());
    assert!(player.is_armed());

    player.on_interaction();
    assert!(player.is_playing());
    assert!(!player.is_armed());
}

#[tokio::test]
async fn test_successful_autoplay_restores_volume_and_mute() {
    // Direct fails; the muted rung succeeds
    let mut player = MusicPlayer::new(BlockedBackend::new(1), 0.3);
    player.attempt_autoplay().await;
    assert!(player.is_playing());
    assert!(!player.is_muted());
}

#[tokio::test]
async fn test_focus_regain_retries_playback() {
    let mut player = MusicPlayer::new(BlockedBackend::new(3), 0.3);
    player.attempt_autoplay().await;
    assert!(!player.is_playing());

    let now = Instant::now();
    player.on_focus_gained(now);
    let later = now + Duration::from_secs(1);
    assert!(player.attempt_due(later));
    player.attempt_autoplay().await;
    assert!(player.is_playing());
}
