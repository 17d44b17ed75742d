use arcade_core::catalog::Catalog;
use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions, Vec2};
use image::{RgbaImage, imageops::FilterType};
use log::{debug, error};
use std::path::Path;

pub const COVER_WIDTH: u32 = 200;
pub const COVER_HEIGHT: u32 = 262;
pub const COVER_RADIUS: u32 = 12;

pub fn cover_size() -> Vec2 {
    egui::vec2(COVER_WIDTH as f32, COVER_HEIGHT as f32)
}

/// A decoded, uploaded cover.
#[derive(Clone)]
pub struct Cover {
    pub texture: TextureHandle,
    /// Size of the scaled image, at most `COVER_WIDTH` x `COVER_HEIGHT`.
    pub size: Vec2,
}

/// Read `path` and scale it to fit the tile, keeping its aspect ratio.
pub fn decode_cover(path: &Path) -> image::ImageResult<RgbaImage> {
    let img = image::open(path)?;
    let scaled = img.resize(COVER_WIDTH, COVER_HEIGHT, FilterType::Lanczos3);
    Ok(scaled.to_rgba8())
}

/// Fade out the pixels outside a rounded rectangle spanning the whole image.
/// Edge pixels get partial alpha from a 4x4 supersample.
pub fn round_corners(img: &mut RgbaImage, radius: u32) {
    let (w, h) = img.dimensions();
    let r = radius.min(w / 2).min(h / 2);
    if r == 0 {
        return;
    }
    let rf = r as f32;

    for y in 0..h {
        for x in 0..w {
            let in_x = x < r || x >= w - r;
            let in_y = y < r || y >= h - r;
            if !(in_x && in_y) {
                continue;
            }

            // Centre of the corner circle this pixel belongs to.
            let cx = if x < r { rf } else { (w - r) as f32 };
            let cy = if y < r { rf } else { (h - r) as f32 };

            let mut inside = 0u32;
            for sy in 0..4 {
                for sx in 0..4 {
                    let px = x as f32 + (sx as f32 + 0.5) / 4.0;
                    let py = y as f32 + (sy as f32 + 0.5) / 4.0;
                    let (dx, dy) = (px - cx, py - cy);
                    if dx * dx + dy * dy <= rf * rf {
                        inside += 1;
                    }
                }
            }

            let pixel = img.get_pixel_mut(x, y);
            pixel[3] = ((pixel[3] as u32 * inside) / 16) as u8;
        }
    }
}

pub fn to_color_image(img: &RgbaImage) -> ColorImage {
    let size = [img.width() as usize, img.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, img.as_raw())
}

fn load_cover(ctx: &egui::Context, name: &str, path: &Path) -> Option<Cover> {
    let mut img = match decode_cover(path) {
        Ok(img) => img,
        Err(e) => {
            error!("Failed to load cover {} for {name}: {e}", path.display());
            return None;
        }
    };
    round_corners(&mut img, COVER_RADIUS);

    let size = egui::vec2(img.width() as f32, img.height() as f32);
    let texture = ctx.load_texture(
        format!("cover:{}", path.display()),
        to_color_image(&img),
        TextureOptions::LINEAR,
    );
    debug!("Loaded cover for {name} ({}x{})", size.x, size.y);
    Some(Cover { texture, size })
}

/// One optional cover per catalog entry, index-aligned with the catalog.
#[derive(Default)]
pub struct CoverCache {
    covers: Vec<Option<Cover>>,
}

impl CoverCache {
    pub fn load(ctx: &egui::Context, catalog: &Catalog) -> Self {
        let covers = catalog
            .iter()
            .enumerate()
            .map(|(index, game)| {
                let path = catalog.cover_path(index)?;
                load_cover(ctx, &game.name, &path)
            })
            .collect();
        Self { covers }
    }

    pub fn get(&self, index: usize) -> Option<&Cover> {
        self.covers.get(index).and_then(Option::as_ref)
    }

    pub fn has_cover(&self, index: usize) -> bool {
        self.get(index).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn rounding_clears_corners_and_keeps_centre() {
        let mut img = RgbaImage::from_pixel(40, 60, Rgba([200, 10, 10, 255]));
        round_corners(&mut img, 12);

        for (x, y) in [(0, 0), (39, 0), (0, 59), (39, 59)] {
            assert_eq!(img.get_pixel(x, y)[3], 0, "corner ({x},{y})");
        }
        assert_eq!(img.get_pixel(20, 30)[3], 255);
        // Straight edges away from the corners stay opaque.
        assert_eq!(img.get_pixel(20, 0)[3], 255);
        assert_eq!(img.get_pixel(0, 30)[3], 255);
        // Colour is untouched.
        assert_eq!(img.get_pixel(0, 0)[0], 200);
    }

    #[test]
    fn zero_radius_is_a_no_op() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
        round_corners(&mut img, 0);
        assert!(img.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn decode_scales_to_fit_the_tile() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbaImage::from_pixel(800, 400, Rgba([0, 0, 255, 255]))
            .save(&path)
            .unwrap();

        let img = decode_cover(&path).unwrap();
        assert_eq!(img.width(), COVER_WIDTH);
        assert_eq!(img.height(), 100);
    }

    #[test]
    fn unreadable_cover_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cover.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(decode_cover(&path).is_err());
        assert!(decode_cover(&dir.path().join("absent.png")).is_err());
    }
}
