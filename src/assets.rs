// Decodes the three rasters the renderer needs. All three must load before
// the first frame; any failure stops startup.

use crate::error::Error;
use crate::types::CardSurface;
use image::RgbaImage;
use image::imageops::{self, FilterType};
use log::info;

pub struct Assets {
    pub background: RgbaImage, // defines the window size
    pub card: RgbaImage,       // already scaled to the card surface
    pub mask: RgbaImage,       // full resolution; downsampled by mask::build_mask
}

fn load_rgba(path: &str) -> Result<RgbaImage, Error> {
    let img = image::open(path)
        .map_err(|source| Error::Asset { path: path.to_string(), source })?
        .to_rgba8();
    info!("Loaded '{}' ({}x{}).", path, img.width(), img.height());
    Ok(img)
}

impl Assets {
    pub fn load(background: &str, card: &str, mask: &str, surface: &CardSurface) -> Result<Self, Error> {
        let background = load_rgba(background)?;
        let card_img = load_rgba(card)?;
        let card_img = if card_img.dimensions() == (surface.width as u32, surface.height as u32) {
            card_img
        } else {
            imageops::resize(&card_img, surface.width as u32, surface.height as u32, FilterType::Triangle)
        };
        let mask = load_rgba(mask)?;
        Ok(Self { background, card: card_img, mask })
    }
}
