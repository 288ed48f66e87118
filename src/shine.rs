// The two glow layers: a broad shine over everything, and a brighter
// "lacquer" shine that only shows up on the glossy parts of the card.
// Visual: a soft white hotspot follows the tilt; inside it, the lacquered
// artwork lights up sharply while matte areas stay dim.

use crate::config::{SHINE_ALPHA_LACQ, SHINE_ALPHA_MAIN, SHINE_R_LACQ, SHINE_R_MAIN};
use crate::raster::{add_white, composite_additive};
use crate::types::{BinaryMask, CardSurface, FrameBuffer, GlowLayer};

/// White radial gradient: `inner_alpha` at the center, fading linearly to 0 at `radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialGradient {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub inner_alpha: f32,
}

impl RadialGradient {
    /// Non-finite centers and non-positive radii draw nothing.
    pub fn is_drawable(&self) -> bool {
        self.cx.is_finite()
            && self.cy.is_finite()
            && self.radius.is_finite()
            && self.radius > 0.0
    }

    #[inline]
    pub fn alpha_at_distance(&self, d: f32) -> f32 {
        if d >= self.radius { 0.0 } else { self.inner_alpha * (1.0 - d / self.radius) }
    }

    /// Alpha at the center of pixel (px, py).
    #[inline]
    pub fn alpha_at_pixel(&self, px: usize, py: usize) -> f32 {
        let dx = px as f32 + 0.5 - self.cx;
        let dy = py as f32 + 0.5 - self.cy;
        self.alpha_at_distance((dx * dx + dy * dy).sqrt())
    }

    /// Pixel rows/cols the gradient can touch, clipped to a w×h surface.
    fn bounds(&self, w: usize, h: usize) -> Option<(usize, usize, usize, usize)> {
        let x0 = (self.cx - self.radius).floor().max(0.0);
        let y0 = (self.cy - self.radius).floor().max(0.0);
        let x1 = (self.cx + self.radius).ceil().min(w as f32);
        let y1 = (self.cy + self.radius).ceil().min(h as f32);
        if x0 >= x1 || y0 >= y1 { return None; }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }
}

/// Paint additively straight onto the display. No-op for degenerate input.
pub fn draw_radial(fb: &mut FrameBuffer, g: &RadialGradient) {
    if !g.is_drawable() { return; }
    let Some((x0, y0, x1, y1)) = g.bounds(fb.width, fb.height) else { return };
    for y in y0..y1 {
        for x in x0..x1 {
            let a = g.alpha_at_pixel(x, y);
            if a > 0.0 { add_white(fb, x as i32, y as i32, a); }
        }
    }
}

/// Paint into a cleared glow layer (alpha replaces, as on a fresh canvas).
pub fn paint_radial(layer: &mut GlowLayer, g: &RadialGradient) {
    if !g.is_drawable() { return; }
    let Some((x0, y0, x1, y1)) = g.bounds(layer.width, layer.height) else { return };
    for y in y0..y1 {
        let row = y * layer.width;
        for x in x0..x1 {
            let a = g.alpha_at_pixel(x, y);
            if a > 0.0 {
                let dst = &mut layer.alpha[row + x];
                *dst = (a + *dst * (1.0 - a)).min(1.0); // source-over on white
            }
        }
    }
}

/// Force alpha to 0 wherever the mask says "matte".
/// Visual: hard edge between glossy and matte artwork.
pub fn clip_to_mask(layer: &mut GlowLayer, mask: &BinaryMask) {
    for (a, &bit) in layer.alpha.iter_mut().zip(&mask.bits) {
        if bit == 0 { *a = 0.0; }
    }
}

/// Draws both shine layers each frame; owns the card-sized scratch buffer.
pub struct ShineRenderer {
    lacquer: GlowLayer,
}

impl ShineRenderer {
    pub fn new(card: &CardSurface) -> Self {
        Self { lacquer: GlowLayer::new(card.width, card.height) }
    }

    /// Broad glow, then the mask-clipped lacquer glow, both at `center` (display coords).
    pub fn draw(&mut self, fb: &mut FrameBuffer, card: &CardSurface, mask: &BinaryMask, center: (f32, f32)) {
        let (cx, cy) = center;

        draw_radial(fb, &RadialGradient { cx, cy, radius: SHINE_R_MAIN, inner_alpha: SHINE_ALPHA_MAIN });

        self.lacquer.clear();
        paint_radial(&mut self.lacquer, &RadialGradient {
            cx: cx - card.origin_x as f32,
            cy: cy - card.origin_y as f32,
            radius: SHINE_R_LACQ,
            inner_alpha: SHINE_ALPHA_LACQ,
        });
        clip_to_mask(&mut self.lacquer, mask);
        composite_additive(fb, &self.lacquer, card.origin_x, card.origin_y);
    }
}
