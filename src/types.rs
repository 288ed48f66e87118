// Core types shared by the mask builder, the seeder and the renderers.

/// The window's pixels. Visual: exactly what you see each frame.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // surface width (pixels), defined by the background raster
    pub height: usize,     // surface height (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// Where the card sits on the display surface. Fixed after startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardSurface {
    pub width: usize,
    pub height: usize,
    pub origin_x: i32, // top-left corner on the display surface
    pub origin_y: i32,
}

impl CardSurface {
    /// Card center in display coordinates (where the shine starts).
    pub fn center(&self) -> (f32, f32) {
        (
            self.origin_x as f32 + self.width as f32 / 2.0,
            self.origin_y as f32 + self.height as f32 / 2.0,
        )
    }
}

/// 0/1 per card pixel, row-major; 1 = lacquered (glossy).
/// Visual: unseen directly; it decides where the lacquer glow and sparkles may appear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    pub width: usize,
    pub height: usize,
    pub bits: Vec<u8>, // length = width * height
}

impl BinaryMask {
    #[inline]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.bits[y * self.width + x] != 0
    }

    /// Number of lacquered pixels.
    pub fn coverage(&self) -> usize {
        self.bits.iter().filter(|&&b| b != 0).count()
    }
}

/// White light with per-pixel alpha in [0,1], sized to the card.
/// Visual: the off-screen buffer the lacquer glow is painted into before clipping.
pub struct GlowLayer {
    pub width: usize,
    pub height: usize,
    pub alpha: Vec<f32>,
}

impl GlowLayer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, alpha: vec![0.0; width * height] }
    }

    pub fn clear(&mut self) {
        for a in &mut self.alpha { *a = 0.0; }
    }
}

/// One point of light on the lacquer. Never moves; only its brightness changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Sparkle {
    pub x: usize, // card-space pixel, always on a lacquered pixel
    pub y: usize,
    pub radius: f32,
    pub base_intensity: f32,
    pub phase: f32, // twinkle offset in [0, 2π)
}
