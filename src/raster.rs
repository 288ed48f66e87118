// Pixel-level helpers shared by the renderers: additive white light and
// plain image blits. Everything here clips silently at the surface edges.

use crate::types::{FrameBuffer, GlowLayer};
use image::RgbaImage;

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[inline]
pub fn unpack_rgb(px: u32) -> (u8, u8, u8) {
    (((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8)
}

/// Add white light of strength `alpha` at (x,y), saturating at 255.
/// Visual: the pixel brightens toward white; repeated draws stack.
#[inline]
pub fn add_white(fb: &mut FrameBuffer, x: i32, y: i32, alpha: f32) {
    if x < 0 || y < 0 { return; }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height { return; }

    let add = (255.0 * alpha).round().clamp(0.0, 255.0) as u16;
    if add == 0 { return; }

    let idx = y * fb.width + x;
    let (r, g, b) = unpack_rgb(fb.pixels[idx]);
    fb.pixels[idx] = pack_rgb(
        (r as u16 + add).min(255) as u8,
        (g as u16 + add).min(255) as u8,
        (b as u16 + add).min(255) as u8,
    );
}

/// Additively composite a glow layer onto `fb` with its top-left at (ox, oy).
pub fn composite_additive(fb: &mut FrameBuffer, layer: &GlowLayer, ox: i32, oy: i32) {
    for ly in 0..layer.height {
        let row = ly * layer.width;
        for lx in 0..layer.width {
            let a = layer.alpha[row + lx];
            if a <= 0.0 { continue; }
            add_white(fb, ox + lx as i32, oy + ly as i32, a);
        }
    }
}

/// Copy an opaque raster into `fb` (sizes must match; the background defines the surface).
pub fn copy_image(fb: &mut FrameBuffer, img: &RgbaImage) {
    for (dst, px) in fb.pixels.iter_mut().zip(img.pixels()) {
        *dst = pack_rgb(px.0[0], px.0[1], px.0[2]);
    }
}

/// Source-over blend `img` onto `fb` at (ox, oy) using the image's alpha.
/// Visual: the card artwork sits on top of the background.
pub fn blit_over(fb: &mut FrameBuffer, img: &RgbaImage, ox: i32, oy: i32) {
    for (x, y, px) in img.enumerate_pixels() {
        let (sx, sy) = (ox + x as i32, oy + y as i32);
        if sx < 0 || sy < 0 || sx as usize >= fb.width || sy as usize >= fb.height { continue; }
        let a = px.0[3] as u16;
        if a == 0 { continue; }

        let idx = sy as usize * fb.width + sx as usize;
        if a == 255 {
            fb.pixels[idx] = pack_rgb(px.0[0], px.0[1], px.0[2]);
            continue;
        }
        let (dr, dg, db) = unpack_rgb(fb.pixels[idx]);
        let mix = |s: u8, d: u8| ((s as u16 * a + d as u16 * (255 - a) + 127) / 255) as u8;
        fb.pixels[idx] = pack_rgb(mix(px.0[0], dr), mix(px.0[1], dg), mix(px.0[2], db));
    }
}
