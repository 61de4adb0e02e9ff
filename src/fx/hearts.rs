//! Decorative floating hearts
//!
//! Ephemeral particles spawned on a fixed cadence while the choice view is
//! up. The retained list is capped; hearts are evicted once their float
//! animation completes or when the cap pushes out the oldest.

use crate::MAX_HEARTS;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

/// Seconds between spawns
const SPAWN_EVERY: f32 = 0.4;
/// Seconds a heart takes to float from bottom to top
const FLOAT_SECS: f32 = 4.0;

#[derive(Debug, Clone)]
pub struct HeartParticle {
    pub id: u64,
    /// Horizontal position, normalized 0..1
    pub x: f32,
    /// Delay before the float animation starts
    pub delay: f32,
    /// Size bucket, 0 = small
    pub size: u8,
    age: f32,
}

impl HeartParticle {
    fn finished(&self) -> bool {
        self.age >= self.delay + FLOAT_SECS
    }
}

/// Capped collection of floating hearts
#[derive(Debug)]
pub struct HeartField {
    hearts: Vec<HeartParticle>,
    rng: SmallRng,
    next_id: u64,
    spawn_accum: f32,
}

impl HeartField {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            hearts: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
            next_id: 0,
            spawn_accum: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.hearts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hearts.is_empty()
    }

    /// Advance animations and spawn on cadence
    pub fn tick(&mut self, dt: f32) {
        self.spawn_accum += dt;
        while self.spawn_accum >= SPAWN_EVERY {
            self.spawn_accum -= SPAWN_EVERY;
            self.spawn();
        }
        for h in &mut self.hearts {
            h.age += dt;
        }
        self.hearts.retain(|h| !h.finished());
    }

    fn spawn(&mut self) {
        let heart = HeartParticle {
            id: self.next_id,
            x: self.rng.gen_range(0.0..1.0),
            delay: self.rng.gen_range(0.0..0.8),
            size: self.rng.gen_range(0..2),
            age: 0.0,
        };
        self.next_id += 1;
        self.hearts.push(heart);
        // Cap the retained list, oldest first
        if self.hearts.len() > MAX_HEARTS {
            let excess = self.hearts.len() - MAX_HEARTS;
            self.hearts.drain(..excess);
        }
    }
}

impl Default for HeartField {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &HeartField {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for h in &self.hearts {
            if h.age < h.delay {
                continue;
            }
            let progress = ((h.age - h.delay) / FLOAT_SECS).min(1.0);
            let sway = (h.age * 3.0).sin() * 1.5;
            let col = (h.x * area.width as f32 + sway).round();
            let row = area.bottom() as f32 - 1.0 - progress * area.height as f32;
            if col < area.x as f32 || row < area.y as f32 {
                continue;
            }
            let (col, row) = (col as u16, row as u16);
            if col >= area.right() || row >= area.bottom() {
                continue;
            }
            let glyph = if h.size == 0 { '♡' } else { '♥' };
            let color = if h.size == 0 {
                Color::LightMagenta
            } else {
                Color::Magenta
            };
            buf.get_mut(col, row).set_char(glyph).set_fg(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_cadence() {
        let mut field = HeartField::with_seed(3);
        field.tick(1.2);
        assert_eq!(field.len(), 3);
    }

    #[test]
    fn test_retained_count_is_capped() {
        let mut field = HeartField::with_seed(3);
        // Spawn far more than the cap allows within one animation lifetime
        for _ in 0..60 {
            field.tick(SPAWN_EVERY);
        }
        assert!(field.len() <= MAX_HEARTS);
        assert!(!field.is_empty());
    }

    #[test]
    fn test_hearts_evicted_after_animation() {
        let mut field = HeartField::with_seed(3);
        field.tick(SPAWN_EVERY);
        assert_eq!(field.len(), 1);
        // Stop spawning by ticking past the full lifetime in one step
        field.tick(FLOAT_SECS + 1.0);
        // The one big tick spawns more, but the original heart is gone
        assert!(field.hearts.iter().all(|h| h.id != 0));
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut field = HeartField::with_seed(3);
        field.tick(SPAWN_EVERY * 5.0);
        let ids: Vec<u64> = field.hearts.iter().map(|h| h.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(ids.len(), sorted.len());
    }
}
