// Sparkles: tiny fixed points of light scattered over the lacquer.
// Visual: glitter that twinkles and brightens as the shine passes over it.

use crate::config::{
    SEED_ATTEMPTS_PER_SPARKLE, SPARKLE_BASE, SPARKLE_FALLOFF, SPARKLE_MIN_INTENSITY,
    SPARKLE_RADIUS, TWINKLE_RATE,
};
use crate::error::Error;
use crate::raster::add_white;
use crate::types::{BinaryMask, CardSurface, FrameBuffer, Sparkle};
use rand::Rng;
use std::f32::consts::TAU;

/// Rejection-sample `count` sparkles onto lacquered pixels.
/// Fails with `EmptyMask` instead of spinning forever when the mask has nowhere to put them.
pub fn seed_sparkles<R: Rng>(
    mask: &BinaryMask,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Sparkle>, Error> {
    let mut sparkles = Vec::with_capacity(count.min(mask.bits.len()));
    if count == 0 { return Ok(sparkles); }
    if mask.width == 0 || mask.height == 0 || mask.coverage() == 0 {
        return Err(Error::EmptyMask { attempts: 0 });
    }

    let max_attempts = count.saturating_mul(SEED_ATTEMPTS_PER_SPARKLE);
    let mut attempts = 0;
    while sparkles.len() < count {
        if attempts == max_attempts {
            return Err(Error::EmptyMask { attempts });
        }
        attempts += 1;

        let x = rng.random_range(0..mask.width);
        let y = rng.random_range(0..mask.height);
        if !mask.is_set(x, y) { continue; } // matte pixel: draw again

        sparkles.push(Sparkle {
            x,
            y,
            radius: rng.random_range(SPARKLE_RADIUS.0..SPARKLE_RADIUS.1),
            base_intensity: rng.random_range(SPARKLE_BASE.0..SPARKLE_BASE.1),
            phase: rng.random_range(0.0..TAU),
        });
    }
    Ok(sparkles)
}

/// Brightness before twinkle: full at the shine center, gone at SPARKLE_FALLOFF px.
#[inline]
pub fn proximity(base_intensity: f32, distance: f32) -> f32 {
    base_intensity * (1.0 - distance / SPARKLE_FALLOFF).max(0.0)
}

/// Final brightness of one sparkle this frame.
pub fn intensity(s: &Sparkle, card: &CardSurface, center: (f32, f32), frame: u64) -> f32 {
    let sx = card.origin_x as f32 + s.x as f32;
    let sy = card.origin_y as f32 + s.y as f32;
    let d = ((sx - center.0).powi(2) + (sy - center.1).powi(2)).sqrt();
    let twinkle = 0.7 + 0.3 * (frame as f32 * TWINKLE_RATE + s.phase).sin();
    proximity(s.base_intensity, d) * twinkle
}

/// Filled disc of white light centered on pixel (cx, cy).
fn fill_disc(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: f32, alpha: f32) {
    let r = radius.ceil() as i32;
    let r2 = radius * radius;
    for dy in -r..=r {
        for dx in -r..=r {
            if (dx * dx + dy * dy) as f32 > r2 { continue; }
            add_white(fb, cx + dx, cy + dy, alpha);
        }
    }
}

pub fn draw_sparkles(
    fb: &mut FrameBuffer,
    sparkles: &[Sparkle],
    card: &CardSurface,
    center: (f32, f32),
    frame: u64,
) {
    for s in sparkles {
        let a = intensity(s, card, center, frame);
        if a <= SPARKLE_MIN_INTENSITY { continue; } // too faint to see
        fill_disc(
            fb,
            card.origin_x + s.x as i32,
            card.origin_y + s.y as i32,
            s.radius,
            a.min(1.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn full_mask(w: usize, h: usize) -> BinaryMask {
        BinaryMask { width: w, height: h, bits: vec![1; w * h] }
    }

    fn sparkle_at(x: usize, y: usize) -> Sparkle {
        Sparkle { x, y, radius: 1.0, base_intensity: 1.0, phase: 0.0 }
    }

    #[test]
    fn full_mask_yields_exact_count_in_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let sparkles = seed_sparkles(&full_mask(100, 100), 200, &mut rng).unwrap();
        assert_eq!(sparkles.len(), 200);
        for s in &sparkles {
            assert!(s.x < 100 && s.y < 100);
            assert!((0.5..=1.5).contains(&s.radius));
            assert!((0.4..=1.0).contains(&s.base_intensity));
            assert!((0.0..TAU).contains(&s.phase));
        }
    }

    #[test]
    fn sparkles_only_land_on_lacquer() {
        // Sparse diagonal stripes.
        let (w, h) = (64, 32);
        let bits = (0..w * h).map(|i| if (i % w + i / w) % 7 == 0 { 1 } else { 0 }).collect();
        let mask = BinaryMask { width: w, height: h, bits };
        let mut rng = StdRng::seed_from_u64(99);
        let sparkles = seed_sparkles(&mask, 150, &mut rng).unwrap();
        assert_eq!(sparkles.len(), 150);
        assert!(sparkles.iter().all(|s| mask.bits[s.y * w + s.x] == 1));
    }

    #[test]
    fn empty_mask_fails_instead_of_hanging() {
        let mask = BinaryMask { width: 50, height: 50, bits: vec![0; 2500] };
        let mut rng = StdRng::seed_from_u64(3);
        let err = seed_sparkles(&mask, 10, &mut rng).unwrap_err();
        assert!(matches!(err, Error::EmptyMask { .. }));
        assert!(err.to_string().contains("No eligible region"));
    }

    #[test]
    fn zero_count_needs_no_lacquer() {
        let mask = BinaryMask { width: 4, height: 4, bits: vec![0; 16] };
        let mut rng = StdRng::seed_from_u64(3);
        assert!(seed_sparkles(&mask, 0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn huge_count_on_tiny_mask_does_not_overallocate() {
        // 16 pixels can't hold usize::MAX / 8 sparkles; the attempt cap ends it.
        let mask = BinaryMask { width: 4, height: 4, bits: vec![0; 16] };
        let mut rng = StdRng::seed_from_u64(5);
        let err = seed_sparkles(&mask, usize::MAX / 8, &mut rng).unwrap_err();
        assert!(matches!(err, Error::EmptyMask { .. }));

        let mut sparse = mask.clone();
        sparse.bits[5] = 1;
        let sparkles = seed_sparkles(&sparse, 40, &mut rng).unwrap();
        assert_eq!(sparkles.len(), 40);
        assert!(sparkles.iter().all(|s| (s.x, s.y) == (1, 1)));
    }

    #[test]
    fn same_seed_same_sparkles() {
        let mask = full_mask(30, 30);
        let a = seed_sparkles(&mask, 20, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = seed_sparkles(&mask, 20, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn intensity_vanishes_beyond_falloff() {
        let card = CardSurface { width: 400, height: 10, origin_x: 0, origin_y: 0 };
        let s = sparkle_at(0, 0);
        for frame in [0, 7, 100] {
            assert_eq!(intensity(&s, &card, (SPARKLE_FALLOFF, 0.0), frame), 0.0);
            assert_eq!(intensity(&s, &card, (300.0, 0.0), frame), 0.0);
        }
        assert_eq!(proximity(0.9, SPARKLE_FALLOFF), 0.0);
    }

    #[test]
    fn twinkle_stays_between_forty_and_one_hundred_percent() {
        let card = CardSurface { width: 10, height: 10, origin_x: 0, origin_y: 0 };
        let s = sparkle_at(0, 0);
        for frame in 0..200 {
            let a = intensity(&s, &card, (0.0, 0.0), frame);
            assert!((0.4 - 1e-5..=1.0 + 1e-5).contains(&a));
        }
    }

    #[test]
    fn faint_and_distant_sparkles_are_skipped() {
        let card = CardSurface { width: 300, height: 10, origin_x: 0, origin_y: 0 };
        let sparkles = [sparkle_at(5, 5), sparkle_at(250, 5)];
        let mut fb = FrameBuffer::new(300, 10);
        draw_sparkles(&mut fb, &sparkles, &card, (5.0, 5.0), 0);
        assert!(fb.pixels[5 * 300 + 5] != 0);
        assert_eq!(fb.pixels[5 * 300 + 250], 0);
    }

    #[test]
    fn disc_covers_radius_in_pixels() {
        let mut fb = FrameBuffer::new(5, 5);
        fill_disc(&mut fb, 2, 2, 1.0, 1.0);
        let lit: Vec<usize> = (0..25).filter(|&i| fb.pixels[i] != 0).collect();
        assert_eq!(lit, vec![7, 11, 12, 13, 17]); // plus-shaped

        let mut fb = FrameBuffer::new(5, 5);
        fill_disc(&mut fb, 2, 2, 0.5, 1.0);
        assert_eq!(fb.pixels.iter().filter(|&&p| p != 0).count(), 1);
    }
}
