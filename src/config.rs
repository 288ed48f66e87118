// Rendering constants + the optional holocard.ini settings file.
// Visual: the constants decide how big/bright the shine and sparkles look;
// the settings pick which images are shown and where the card sits.

use crate::error::Error;
use crate::types::CardSurface;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::Path;

// Window
pub const WINDOW_TITLE: &str = "Holo Card";
pub const DEFAULT_SETTINGS_PATH: &str = "holocard.ini";
pub const SETTINGS_PATH_ENV: &str = "HOLOCARD_CONFIG";

// Card placement (360x220 artwork shown at 87%)
pub const CARD_W: usize = 313;
pub const CARD_H: usize = 191;
pub const CARD_X: i32 = 35;
pub const CARD_Y: i32 = 112;

// Shine
pub const SHINE_R_MAIN: f32 = 160.0;
pub const SHINE_ALPHA_MAIN: f32 = 0.35;
pub const SHINE_R_LACQ: f32 = 120.0;
pub const SHINE_ALPHA_LACQ: f32 = 0.8;

// Tilt
pub const GAMMA_RANGE: f32 = 45.0; // degrees, left/right
pub const BETA_RANGE: f32 = 45.0;  // degrees, front/back
pub const TARGET_SPAN: (f32, f32) = (0.2, 0.8); // fraction of the card the center may travel
pub const SMOOTHING: f32 = 0.1;
pub const KEY_TILT_STEP: f32 = 1.5;    // degrees per frame while an arrow is held
pub const KEY_TILT_RELAX: f32 = 0.92;  // per-frame decay back to level when released

// Sparkles
pub const NUM_SPARKLES: usize = 200;
pub const MAX_SPARKLES: usize = 1_000_000;
pub const SPARKLE_RADIUS: (f32, f32) = (0.5, 1.5);
pub const SPARKLE_BASE: (f32, f32) = (0.4, 1.0);
pub const SPARKLE_FALLOFF: f32 = 140.0;
pub const TWINKLE_RATE: f32 = 0.08;
pub const SPARKLE_MIN_INTENSITY: f32 = 0.01;
pub const SEED_ATTEMPTS_PER_SPARKLE: usize = 10_000;

// Mask
pub const MASK_THRESHOLD: u8 = 127;

/// Which desktop stand-in feeds orientation samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionSource {
    Keyboard, // arrow keys tilt the card
    None,     // pointer only
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub background_path: String,
    pub card_path: String,
    pub mask_path: String,
    pub card: CardSurface,
    pub sparkle_count: usize,
    pub seed: Option<u64>,
    pub motion: MotionSource,
    pub touch: bool,
    pub fps: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background_path: "assets/bg.png".to_string(),
            card_path: "assets/card.png".to_string(),
            mask_path: "assets/lacquerMask.png".to_string(),
            card: CardSurface { width: CARD_W, height: CARD_H, origin_x: CARD_X, origin_y: CARD_Y },
            sparkle_count: NUM_SPARKLES,
            seed: None,
            motion: MotionSource::Keyboard,
            touch: false,
            fps: 60,
        }
    }
}

impl Settings {
    /// Path from HOLOCARD_CONFIG, else holocard.ini in the working directory.
    pub fn path_from_env() -> String {
        std::env::var(SETTINGS_PATH_ENV).unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string())
    }

    /// Load settings; a missing file means defaults.
    pub fn load(path: &str) -> Result<Self, Error> {
        if !Path::new(path).exists() {
            warn!("Settings file '{}' not found, using defaults.", path);
            return Ok(Self::default());
        }
        let mut ini = Ini::new();
        ini.load(path).map_err(|e| Error::Config(format!("{path}: {e}")))?;
        let settings = Self::from_ini(&ini)?;
        info!("Loaded settings from '{}'.", path);
        Ok(settings)
    }

    pub fn from_ini(ini: &Ini) -> Result<Self, Error> {
        let mut s = Self::default();

        if let Some(v) = ini.get("assets", "background") { s.background_path = v; }
        if let Some(v) = ini.get("assets", "card") { s.card_path = v; }
        if let Some(v) = ini.get("assets", "mask") { s.mask_path = v; }

        if let Some(v) = get_usize(ini, "card", "width")? { s.card.width = v; }
        if let Some(v) = get_usize(ini, "card", "height")? { s.card.height = v; }
        if let Some(v) = get_i32(ini, "card", "x")? { s.card.origin_x = v; }
        if let Some(v) = get_i32(ini, "card", "y")? { s.card.origin_y = v; }
        if s.card.width == 0 || s.card.height == 0 {
            return Err(Error::Config("[card] width and height must be non-zero".into()));
        }

        if let Some(v) = get_usize(ini, "sparkles", "count")? { s.sparkle_count = v; }
        if s.sparkle_count > MAX_SPARKLES {
            return Err(Error::Config(format!("[sparkles] count: at most {MAX_SPARKLES}")));
        }
        s.seed = get_uint(ini, "sparkles", "seed")?;

        if let Some(v) = ini.get("input", "motion") {
            s.motion = match v.trim().to_ascii_lowercase().as_str() {
                "keyboard" => MotionSource::Keyboard,
                "none" => MotionSource::None,
                other => return Err(Error::Config(format!("[input] motion: unknown source '{other}'"))),
            };
        }
        if let Some(v) = ini.getbool("input", "touch").map_err(|e| key_error("input", "touch", e))? {
            s.touch = v;
        }

        if let Some(v) = get_usize(ini, "display", "fps")? { s.fps = v; }

        Ok(s)
    }
}

fn get_uint(ini: &Ini, section: &str, key: &str) -> Result<Option<u64>, Error> {
    ini.getuint(section, key).map_err(|e| key_error(section, key, e))
}

fn get_usize(ini: &Ini, section: &str, key: &str) -> Result<Option<usize>, Error> {
    get_uint(ini, section, key)?
        .map(|v| usize::try_from(v).map_err(|e| key_error(section, key, e.to_string())))
        .transpose()
}

fn get_i32(ini: &Ini, section: &str, key: &str) -> Result<Option<i32>, Error> {
    ini.getint(section, key)
        .map_err(|e| key_error(section, key, e))?
        .map(|v| i32::try_from(v).map_err(|e| key_error(section, key, e.to_string())))
        .transpose()
}

fn key_error(section: &str, key: &str, e: String) -> Error {
    Error::Config(format!("[{section}] {key}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ini(text: &str) -> Ini {
        let mut ini = Ini::new();
        ini.read(text.to_string()).unwrap();
        ini
    }

    #[test]
    fn empty_file_keeps_defaults() {
        let s = Settings::from_ini(&ini("")).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.card.width, CARD_W);
        assert_eq!(s.sparkle_count, NUM_SPARKLES);
    }

    #[test]
    fn overrides_are_applied() {
        let s = Settings::from_ini(&ini(
            "[card]\nwidth=100\nheight=50\nx=-4\ny=8\n\
             [sparkles]\ncount=12\nseed=7\n\
             [input]\nmotion=none\ntouch=true\n\
             [assets]\nmask=m.png\n",
        ))
        .unwrap();
        assert_eq!(s.card, CardSurface { width: 100, height: 50, origin_x: -4, origin_y: 8 });
        assert_eq!(s.sparkle_count, 12);
        assert_eq!(s.seed, Some(7));
        assert_eq!(s.motion, MotionSource::None);
        assert!(s.touch);
        assert_eq!(s.mask_path, "m.png");
    }

    #[test]
    fn malformed_values_name_the_key() {
        let err = Settings::from_ini(&ini("[sparkles]\ncount=lots\n")).unwrap_err();
        assert!(err.to_string().contains("[sparkles] count"));

        let err = Settings::from_ini(&ini("[input]\nmotion=gyro\n")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn out_of_range_numbers_are_rejected_not_truncated() {
        let err = Settings::from_ini(&ini("[card]\nx=4294967296\n")).unwrap_err();
        assert!(err.to_string().contains("[card] x"));

        let err = Settings::from_ini(&ini("[card]\ny=-2147483649\n")).unwrap_err();
        assert!(err.to_string().contains("[card] y"));

        let err = Settings::from_ini(&ini("[sparkles]\ncount=2305843009213693951\n")).unwrap_err();
        assert!(err.to_string().contains("[sparkles] count"));

        let s = Settings::from_ini(&ini("[card]\nx=-2147483648\n")).unwrap();
        assert_eq!(s.card.origin_x, i32::MIN);
    }

    #[test]
    fn zero_sized_card_is_rejected() {
        assert!(Settings::from_ini(&ini("[card]\nwidth=0\n")).is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let s = Settings::load("definitely/not/here/holocard.ini").unwrap();
        assert_eq!(s, Settings::default());
    }
}
