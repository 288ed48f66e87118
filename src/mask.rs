// Builds the lacquer mask: one 0/1 flag per card pixel, taken from a
// higher-resolution mask image by nearest-pixel sampling.
// Visual: unseen directly; white areas of the mask image become the glossy region.

use crate::config::MASK_THRESHOLD;
use crate::types::{BinaryMask, CardSurface};
use image::RgbaImage;

/// Downsample `img` to card size. Assumes `img.width()` is an integer multiple
/// of the card width; other ratios sample slightly off-center without complaint.
pub fn build_mask(img: &RgbaImage, card: &CardSurface) -> BinaryMask {
    let (img_w, img_h) = img.dimensions();
    let d = img_w as f32 / card.width as f32; // source pixels per card pixel
    let max_x = img_w.saturating_sub(1);
    let max_y = img_h.saturating_sub(1);

    let mut bits = Vec::with_capacity(card.width * card.height);
    for y in 0..card.height {
        let src_y = ((y as f32 * d + d / 2.0).floor() as u32).min(max_y);
        for x in 0..card.width {
            let src_x = ((x as f32 * d + d / 2.0).floor() as u32).min(max_x);
            let px = img.get_pixel(src_x, src_y);
            bits.push(if px.0[0] > MASK_THRESHOLD { 1 } else { 0 });
        }
    }

    BinaryMask { width: card.width, height: card.height, bits }
}
