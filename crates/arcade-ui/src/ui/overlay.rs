use crate::covers::{COVER_RADIUS, COVER_WIDTH, Cover};
use crate::ui::grid_view::{centered, full_uv};
use arcade_core::{anim, zoom::OverlayFrame};
use eframe::egui::{self, Color32, CornerRadius, Id, LayerId, Order, Shadow, pos2, vec2};

pub const GLOW_COLOR: Color32 = Color32::from_rgb(0, 220, 255);

pub fn to_egui(rect: anim::Rect) -> egui::Rect {
    egui::Rect::from_min_size(pos2(rect.x, rect.y), vec2(rect.w, rect.h))
}

pub fn from_egui(rect: egui::Rect) -> anim::Rect {
    anim::Rect::new(rect.min.x, rect.min.y, rect.width(), rect.height())
}

/// Painter on a layer above every panel. Nothing painted here takes input.
pub fn overlay_painter(ctx: &egui::Context) -> egui::Painter {
    ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("cover_overlays")))
}

/// Paint one enlarged cover with its glow.
pub fn paint(painter: &egui::Painter, cover: &Cover, frame: &OverlayFrame) {
    let area = to_egui(frame.rect);
    let scale = area.width() / COVER_WIDTH as f32;
    let image_rect = centered(area, cover.size * scale);
    let radius = (COVER_RADIUS as f32 * scale).round().min(u8::MAX as f32) as u8;

    let blur = frame.glow.round().clamp(0.0, u8::MAX as f32) as u8;
    if blur > 0 {
        let glow = Shadow {
            offset: [0, 0],
            blur,
            spread: 0,
            color: GLOW_COLOR,
        };
        painter.add(glow.as_shape(image_rect, CornerRadius::same(radius)));
    }

    painter.image(cover.texture.id(), image_rect, full_uv(), Color32::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_conversion_roundtrips() {
        let rect = anim::Rect::new(12.5, -4.0, 200.0, 262.0);
        assert_eq!(from_egui(to_egui(rect)), rect);
    }
}
