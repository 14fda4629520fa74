// Spring animation that returns the modal sheet to its rest position

use egui::Vec2;

const STIFFNESS: f32 = 230.0;
const DAMPING: f32 = 22.0;
const REST_DISPLACEMENT: f32 = 0.001;
const REST_SPEED: f32 = 0.001;
/// Integration step; larger frame deltas are split into several of these
const STEP: f32 = 1.0 / 240.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringBack {
    offset: Vec2,
    velocity: Vec2,
}

impl Default for SpringBack {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            velocity: Vec2::ZERO,
        }
    }
}

impl SpringBack {
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn is_settled(&self) -> bool {
        self.offset == Vec2::ZERO && self.velocity == Vec2::ZERO
    }

    /// Begin animating back to the origin from `from`
    pub fn start(&mut self, from: Vec2) {
        self.offset = from;
        self.velocity = Vec2::ZERO;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance by `dt` seconds and return the new offset.
    /// Snaps to exactly zero once both displacement and speed are negligible.
    pub fn tick(&mut self, dt: f32) -> Vec2 {
        if self.is_settled() {
            return self.offset;
        }

        let mut remaining = dt.max(0.0);
        while remaining > 0.0 {
            let step = remaining.min(STEP);
            let accel = -STIFFNESS * self.offset - DAMPING * self.velocity;
            self.velocity += accel * step;
            self.offset += self.velocity * step;
            remaining -= step;
        }

        if self.offset.length() < REST_DISPLACEMENT && self.velocity.length() < REST_SPEED {
            self.reset();
        }

        self.offset
    }
}
