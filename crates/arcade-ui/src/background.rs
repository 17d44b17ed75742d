use crate::covers::to_color_image;
use eframe::egui::{self, Color32, Rect, TextureHandle, TextureOptions, pos2};
use image::{AnimationDecoder, codecs::gif::GifDecoder};
use log::{info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

/// Shown when no background image is available.
pub const FALLBACK_FILL: Color32 = Color32::from_rgb(0x0d, 0x1b, 0x2a);

// GIFs with a zero delay would otherwise spin as fast as the UI repaints.
const MIN_FRAME_DELAY: Duration = Duration::from_millis(20);

struct Frame {
    texture: TextureHandle,
    delay: Duration,
}

/// Static image or looping animation drawn behind the grid.
pub struct Background {
    frames: Vec<Frame>,
    size: egui::Vec2,
    total: Duration,
}

impl Background {
    pub fn load(ctx: &egui::Context, path: &Path) -> Option<Self> {
        if !path.exists() {
            warn!("Background image not found at {}", path.display());
            return None;
        }

        let is_gif = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"));

        let loaded = if is_gif {
            Self::load_gif(ctx, path)
        } else {
            Self::load_static(ctx, path)
        };

        match loaded {
            Ok(bg) => {
                info!(
                    "Loaded background {} ({} frame(s))",
                    path.display(),
                    bg.frames.len()
                );
                Some(bg)
            }
            Err(e) => {
                warn!("Failed to load background {}: {e}", path.display());
                None
            }
        }
    }

    fn load_static(ctx: &egui::Context, path: &Path) -> image::ImageResult<Self> {
        let img = image::open(path)?.to_rgba8();
        let size = egui::vec2(img.width() as f32, img.height() as f32);
        let texture = ctx.load_texture("background", to_color_image(&img), TextureOptions::LINEAR);
        Ok(Self {
            frames: vec![Frame {
                texture,
                delay: Duration::ZERO,
            }],
            size,
            total: Duration::ZERO,
        })
    }

    fn load_gif(ctx: &egui::Context, path: &Path) -> image::ImageResult<Self> {
        let file = File::open(path).map_err(image::ImageError::IoError)?;
        let decoder = GifDecoder::new(BufReader::new(file))?;
        let decoded = decoder.into_frames().collect_frames()?;

        let mut frames = Vec::with_capacity(decoded.len());
        let mut size = egui::Vec2::ZERO;
        for (i, frame) in decoded.into_iter().enumerate() {
            let delay = Duration::from(frame.delay()).max(MIN_FRAME_DELAY);
            let buffer = frame.into_buffer();
            size = egui::vec2(buffer.width() as f32, buffer.height() as f32);
            let texture = ctx.load_texture(
                format!("background:{i}"),
                to_color_image(&buffer),
                TextureOptions::LINEAR,
            );
            frames.push(Frame { texture, delay });
        }

        if frames.is_empty() {
            return Err(image::ImageError::IoError(std::io::Error::other(
                "GIF has no frames",
            )));
        }

        let total = if frames.len() > 1 {
            frames.iter().map(|f| f.delay).sum()
        } else {
            Duration::ZERO
        };
        Ok(Self {
            frames,
            size,
            total,
        })
    }

    pub fn is_animated(&self) -> bool {
        !self.total.is_zero()
    }

    /// Frame to show `elapsed` after start, and how long until the next one.
    fn frame_at(&self, elapsed: Duration) -> (&Frame, Option<Duration>) {
        if !self.is_animated() {
            return (&self.frames[0], None);
        }

        let total = self.total.as_nanos();
        let mut t = elapsed.as_nanos() % total;
        for frame in &self.frames {
            let d = frame.delay.as_nanos();
            if t < d {
                let left = Duration::from_nanos((d - t) as u64);
                return (frame, Some(left));
            }
            t -= d;
        }
        (&self.frames[0], Some(self.frames[0].delay))
    }

    /// Fill `screen` keeping the aspect ratio, cropping whatever overflows.
    /// Returns when the next animation frame is due.
    pub fn paint(&self, painter: &egui::Painter, screen: Rect, elapsed: Duration) -> Option<Duration> {
        let (frame, next) = self.frame_at(elapsed);
        let uv = cover_uv(self.size, screen.size());
        painter.image(frame.texture.id(), screen, uv, Color32::WHITE);
        next
    }
}

/// UV sub-rectangle of an image of `image` size that, stretched over a
/// `target` area, fills it without distortion.
pub fn cover_uv(image: egui::Vec2, target: egui::Vec2) -> Rect {
    let full = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
    if image.x <= 0.0 || image.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return full;
    }

    let image_aspect = image.x / image.y;
    let target_aspect = target.x / target.y;
    if image_aspect > target_aspect {
        let visible = target_aspect / image_aspect;
        let margin = (1.0 - visible) * 0.5;
        Rect::from_min_max(pos2(margin, 0.0), pos2(1.0 - margin, 1.0))
    } else {
        let visible = image_aspect / target_aspect;
        let margin = (1.0 - visible) * 0.5;
        Rect::from_min_max(pos2(0.0, margin), pos2(1.0, 1.0 - margin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_aspect_uses_whole_image() {
        let uv = cover_uv(egui::vec2(1920.0, 1080.0), egui::vec2(1280.0, 720.0));
        assert_eq!(uv, Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)));
    }

    #[test]
    fn wide_image_is_cropped_horizontally() {
        let uv = cover_uv(egui::vec2(400.0, 100.0), egui::vec2(200.0, 100.0));
        assert_eq!(uv.min.y, 0.0);
        assert_eq!(uv.max.y, 1.0);
        assert_eq!(uv.min.x, 0.25);
        assert_eq!(uv.max.x, 0.75);
    }

    #[test]
    fn tall_image_is_cropped_vertically() {
        let uv = cover_uv(egui::vec2(100.0, 400.0), egui::vec2(100.0, 200.0));
        assert_eq!(uv.min.x, 0.0);
        assert_eq!(uv.min.y, 0.25);
        assert_eq!(uv.max.y, 0.75);
    }
}
