//! Confetti burst engine
//!
//! A fire-and-forget particle capability: callers describe a burst and the
//! engine animates it in normalized [0,1] viewport space, rendered as
//! colored glyphs over whatever is beneath it. Particle counts and
//! velocities are cosmetic tuning, not behavior.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

/// Default confetti colors
pub const DEFAULT_PALETTE: &[Color] = &[
    Color::Magenta,
    Color::LightMagenta,
    Color::Red,
    Color::LightRed,
    Color::Yellow,
    Color::Cyan,
    Color::White,
];

const GLYPHS: &[char] = &['*', 'o', '+', '.', '~'];

/// Downward pull in normalized units per second squared
const GRAVITY: f32 = 0.35;

/// One burst request
#[derive(Debug, Clone)]
pub struct BurstSpec {
    /// Launch origin in normalized viewport coordinates (0..1 each axis)
    pub origin: (f32, f32),
    /// Cone width in degrees, centered on straight up
    pub spread_deg: f32,
    /// Initial speed scale
    pub velocity: f32,
    /// Number of particles
    pub count: usize,
    /// Lifetime budget in animation ticks (~60/s)
    pub ticks: u16,
    /// Colors drawn from uniformly
    pub palette: &'static [Color],
}

/// Burst capability consumed by the celebration sequencer
pub trait BurstSink {
    fn burst(&mut self, spec: BurstSpec);
}

#[derive(Debug, Clone)]
struct Confetto {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    ticks_left: f32,
    color: Color,
    glyph: char,
}

/// Particle system holding all live confetti
#[derive(Debug)]
pub struct ConfettiEngine {
    particles: Vec<Confetto>,
    rng: SmallRng,
}

impl ConfettiEngine {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Number of live particles
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.vy += GRAVITY * dt;
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            p.ticks_left -= dt * 60.0;
        }
        self.particles
            .retain(|p| p.ticks_left > 0.0 && p.y <= 1.1 && p.x >= -0.1 && p.x <= 1.1);
    }
}

impl Default for ConfettiEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BurstSink for ConfettiEngine {
    fn burst(&mut self, spec: BurstSpec) {
        let palette = if spec.palette.is_empty() {
            DEFAULT_PALETTE
        } else {
            spec.palette
        };
        for _ in 0..spec.count {
            // Angle within the cone, measured from straight up
            let half = spec.spread_deg / 2.0;
            let angle = (-90.0 + self.rng.gen_range(-half..=half)).to_radians();
            let speed = spec.velocity * self.rng.gen_range(0.4..=1.0) / 120.0;
            self.particles.push(Confetto {
                x: spec.origin.0,
                y: spec.origin.1,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                ticks_left: spec.ticks as f32 * self.rng.gen_range(0.5..=1.0),
                color: palette[self.rng.gen_range(0..palette.len())],
                glyph: GLYPHS[self.rng.gen_range(0..GLYPHS.len())],
            });
        }
    }
}

impl Widget for &ConfettiEngine {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for p in &self.particles {
            if !(0.0..1.0).contains(&p.x) || !(0.0..1.0).contains(&p.y) {
                continue;
            }
            let col = area.x + (p.x * area.width as f32) as u16;
            let row = area.y + (p.y * area.height as f32) as u16;
            if col < area.right() && row < area.bottom() {
                buf.get_mut(col, row).set_char(p.glyph).set_fg(p.color);
            }
        }
    }
}
