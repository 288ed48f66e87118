// Tilt → shine center. Holds the only state that changes between frames.
// Visual: tilting (or moving the mouse) slides the highlight across the card,
// lagging a little behind so it feels like it has weight.

use crate::config::{BETA_RANGE, GAMMA_RANGE, SMOOTHING, TARGET_SPAN};
use crate::sensor::TiltSample;
use crate::types::CardSurface;

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear map of `v` from [in_lo, in_hi] to [out_lo, out_hi] (no clamping).
#[inline]
pub fn map_range(v: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
    out_lo + (v - in_lo) / (in_hi - in_lo) * (out_hi - out_lo)
}

/// Tilt angles plus the smoothed shine center, passed explicitly to update and draw.
pub struct ShineContext {
    card: CardSurface,
    surface: (usize, usize), // display size, for pointer mapping
    gamma: f32,
    beta: f32,
    center: (f32, f32),
    orientation_active: bool, // set by the first orientation sample; pointer is ignored afterward
    touch_capable: bool,      // hosts with touch never take pointer control
}

impl ShineContext {
    pub fn new(card: CardSurface, surface: (usize, usize), touch_capable: bool) -> Self {
        Self {
            card,
            surface,
            gamma: 0.0,
            beta: 0.0,
            center: card.center(),
            orientation_active: false,
            touch_capable,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        self.center
    }

    pub fn tilt(&self) -> (f32, f32) {
        (self.gamma, self.beta)
    }

    pub fn pointer_enabled(&self) -> bool {
        !self.touch_capable && !self.orientation_active
    }

    /// Returns false (and changes nothing) for non-finite angles.
    pub fn set_tilt(&mut self, gamma: f32, beta: f32) -> bool {
        if !gamma.is_finite() || !beta.is_finite() { return false; }
        self.gamma = gamma.clamp(-GAMMA_RANGE, GAMMA_RANGE);
        self.beta = beta.clamp(-BETA_RANGE, BETA_RANGE);
        true
    }

    /// Apply one input sample. Last sample wins.
    pub fn apply(&mut self, sample: TiltSample) {
        match sample {
            TiltSample::Orientation { gamma: Some(g), beta: Some(b) } => {
                if self.set_tilt(g, b) {
                    self.orientation_active = true;
                }
            }
            TiltSample::Orientation { .. } => {} // incomplete reading
            TiltSample::Pointer { x, y } => {
                if !self.pointer_enabled() { return; }
                let (w, h) = self.surface;
                let g = map_range(x, 0.0, w as f32, -GAMMA_RANGE, GAMMA_RANGE);
                let b = map_range(y, 0.0, h as f32, -BETA_RANGE, BETA_RANGE);
                self.set_tilt(g, b);
            }
        }
    }

    /// Where the center is heading for the current tilt (display coordinates).
    pub fn target(&self) -> (f32, f32) {
        let (lo, hi) = TARGET_SPAN;
        let w = self.card.width as f32;
        let h = self.card.height as f32;
        (
            self.card.origin_x as f32 + map_range(self.gamma, -GAMMA_RANGE, GAMMA_RANGE, w * lo, w * hi),
            self.card.origin_y as f32 + map_range(self.beta, -BETA_RANGE, BETA_RANGE, h * lo, h * hi),
        )
    }

    /// One frame of easing toward the target.
    pub fn step(&mut self) {
        let (tx, ty) = self.target();
        self.center = (lerp(self.center.0, tx, SMOOTHING), lerp(self.center.1, ty, SMOOTHING));
    }
}
