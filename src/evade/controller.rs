//! Evasion controller
//!
//! Tracks the decline button's position inside its containment zone, dodging
//! away from the pointer on proximity and relocating on an idle cadence.
//! Every dodge also grows the accept button, capped at a maximum.

use crate::evade::geometry::{clamp_into_zone, Point, Rect};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for the evasion behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvadeSettings {
    /// Pointer distance (layout units) below which a dodge triggers
    pub detection_radius: f32,
    /// Minimum escape displacement per dodge
    pub escape_min: f32,
    /// Maximum escape displacement per dodge
    pub escape_max: f32,
    /// Per-axis random jitter added to each dodge
    pub jitter: f32,
    /// Inset from the zone edges the button may never cross
    pub padding: f32,
    /// Accept-button scale increment per dodge
    pub scale_step: f32,
    /// Accept-button scale ceiling
    pub scale_max: f32,
    /// Shortest idle-reposition interval in seconds
    pub idle_min_secs: f32,
    /// Longest idle-reposition interval in seconds
    pub idle_max_secs: f32,
}

impl Default for EvadeSettings {
    fn default() -> Self {
        Self {
            detection_radius: 160.0,
            escape_min: 150.0,
            escape_max: 230.0,
            jitter: 15.0,
            padding: 15.0,
            scale_step: 0.1,
            scale_max: 2.2,
            idle_min_secs: 2.0,
            idle_max_secs: 3.0,
        }
    }
}

/// Evasion state machine for the decline button
///
/// Positions are zone-local top-left offsets in layout units. `None` is the
/// sentinel centered placement before the first movement; the switch to an
/// absolute offset happens on the first dodge or idle reposition and is
/// never undone.
#[derive(Debug)]
pub struct EvasionController {
    settings: EvadeSettings,
    rng: SmallRng,
    position: Option<Point>,
    accept_scale: f32,
}

impl EvasionController {
    /// Create a controller with entropy-seeded randomness
    pub fn new(settings: EvadeSettings) -> Self {
        Self::with_rng(settings, SmallRng::from_entropy())
    }

    /// Create a controller with a fixed seed (deterministic, for tests)
    pub fn with_seed(settings: EvadeSettings, seed: u64) -> Self {
        Self::with_rng(settings, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(settings: EvadeSettings, rng: SmallRng) -> Self {
        Self {
            settings,
            rng,
            position: None,
            accept_scale: 1.0,
        }
    }

    /// Current zone-local offset, or `None` while still centered
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Current accept-button magnification
    pub fn accept_scale(&self) -> f32 {
        self.accept_scale
    }

    pub fn settings(&self) -> &EvadeSettings {
        &self.settings
    }

    /// Handle a pointer-move event against freshly measured bounds.
    ///
    /// `zone` and `control` are absolute rectangles from the current layout.
    /// Returns `true` if the proximity check tripped and a dodge was
    /// committed. Each event is evaluated independently against the latest
    /// control rectangle, so dodges chain while the pointer gives chase.
    pub fn on_pointer_move(&mut self, pointer: Point, zone: Rect, control: Rect) -> bool {
        if pointer.distance_to(control.center()) >= self.settings.detection_radius {
            return false;
        }
        self.dodge(pointer, zone, control);
        true
    }

    /// Displace the decline button away from the pointer and grow accept.
    pub fn dodge(&mut self, pointer: Point, zone: Rect, control: Rect) {
        let center = control.center();
        let mut dx = center.x - pointer.x;
        let mut dy = center.y - pointer.y;
        let mag = dx.hypot(dy);
        if mag == 0.0 {
            // Pointer exactly on center: fixed fallback direction
            dx = 1.0;
            dy = 0.0;
        } else {
            dx /= mag;
            dy /= mag;
        }

        let escape = self
            .rng
            .gen_range(self.settings.escape_min..=self.settings.escape_max);
        let jx = self.rng.gen_range(-self.settings.jitter..=self.settings.jitter);
        let jy = self.rng.gen_range(-self.settings.jitter..=self.settings.jitter);

        let local = Point::new(control.left - zone.left, control.top - zone.top);
        let target = Point::new(local.x + dx * escape + jx, local.y + dy * escape + jy);

        self.commit(target, zone, control);
        self.grow_accept();
    }

    /// Relocate the decline button to a uniformly random padded position.
    ///
    /// Driven by the app's idle timer; shares the containment rule with
    /// pointer-triggered dodges but does not grow the accept button.
    pub fn idle_reposition(&mut self, zone: Rect, control: Rect) {
        let max_x = (zone.width - control.width - self.settings.padding).max(self.settings.padding);
        let max_y =
            (zone.height - control.height - self.settings.padding).max(self.settings.padding);
        let target = Point::new(
            self.rng.gen_range(self.settings.padding..=max_x),
            self.rng.gen_range(self.settings.padding..=max_y),
        );
        self.commit(target, zone, control);
    }

    /// Draw the next idle-reposition delay, randomized per cycle
    pub fn next_idle_delay(&mut self) -> Duration {
        let secs = self
            .rng
            .gen_range(self.settings.idle_min_secs..=self.settings.idle_max_secs);
        Duration::from_secs_f32(secs)
    }

    fn commit(&mut self, target: Point, zone: Rect, control: Rect) {
        self.position = Some(clamp_into_zone(
            target,
            zone.width,
            zone.height,
            control.width,
            control.height,
            self.settings.padding,
        ));
    }

    fn grow_accept(&mut self) {
        self.accept_scale = (self.accept_scale + self.settings.scale_step).min(self.settings.scale_max);
    }
}
