use crate::covers::{Cover, CoverCache, cover_size};
use arcade_core::catalog::Catalog;
use eframe::egui::{
    self, Align2, Color32, CornerRadius, CursorIcon, FontId, Rect, Sense, Stroke, StrokeKind, pos2,
};

pub const GRID_SPACING: f32 = 20.0;
pub const TILE_RADIUS: u8 = 12;
pub const FOCUS_BORDER: Color32 = Color32::from_rgb(0x00, 0x78, 0xd7);
pub const TEXT_COLOR: Color32 = Color32::from_gray(0xf0);
const PLACEHOLDER_FILL: Color32 = Color32::from_rgba_premultiplied(0x20, 0x20, 0x20, 0xc0);

/// Inputs for one frame of the grid.
pub struct GridView<'a> {
    pub catalog: &'a Catalog,
    pub covers: &'a CoverCache,
    pub columns: usize,
    pub focus: Option<usize>,
    /// Tile that should be scrolled into view this frame.
    pub scroll_to: Option<usize>,
}

#[derive(Default)]
pub struct GridResponse {
    /// Screen rect of every tile, index-aligned with the catalog.
    pub tiles: Vec<Rect>,
    pub clicked: Option<usize>,
}

impl GridView<'_> {
    pub fn show(&self, ui: &mut egui::Ui) -> GridResponse {
        let mut out = GridResponse {
            tiles: Vec::with_capacity(self.catalog.len()),
            clicked: None,
        };

        ui.label(
            egui::RichText::new(format!("ALL GAMES ({})", self.catalog.len()))
                .size(20.0)
                .strong()
                .color(TEXT_COLOR),
        );
        ui.add_space(15.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("game_grid")
                    .spacing(egui::vec2(GRID_SPACING, GRID_SPACING))
                    .show(ui, |ui| {
                        for (index, game) in self.catalog.iter().enumerate() {
                            let response = self.tile(ui, index, &game.name);
                            if response.clicked() {
                                out.clicked = Some(index);
                            }
                            out.tiles.push(response.rect);

                            if (index + 1) % self.columns.max(1) == 0 {
                                ui.end_row();
                            }
                        }
                    });
            });

        out
    }

    fn tile(&self, ui: &mut egui::Ui, index: usize, name: &str) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(cover_size(), Sense::click());
        let response = response.on_hover_cursor(CursorIcon::PointingHand);

        if self.scroll_to == Some(index) {
            response.scroll_to_me(None);
        }

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            match self.covers.get(index) {
                Some(cover) => paint_cover(painter, cover, rect),
                None => paint_placeholder(painter, name, rect),
            }

            if self.focus == Some(index) {
                painter.rect_stroke(
                    rect,
                    CornerRadius::same(TILE_RADIUS),
                    Stroke::new(4.0, FOCUS_BORDER),
                    StrokeKind::Inside,
                );
            }
        }

        response
    }
}

/// Centre `size` inside `outer`.
pub fn centered(outer: Rect, size: egui::Vec2) -> Rect {
    Rect::from_center_size(outer.center(), size)
}

pub fn full_uv() -> Rect {
    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0))
}

fn paint_cover(painter: &egui::Painter, cover: &Cover, tile: Rect) {
    painter.image(
        cover.texture.id(),
        centered(tile, cover.size),
        full_uv(),
        Color32::WHITE,
    );
}

fn paint_placeholder(painter: &egui::Painter, name: &str, tile: Rect) {
    painter.rect_filled(tile, CornerRadius::same(TILE_RADIUS), PLACEHOLDER_FILL);
    let galley = painter.layout(
        name.to_owned(),
        FontId::proportional(18.0),
        TEXT_COLOR,
        tile.width() - 24.0,
    );
    let pos = tile.center() - galley.size() * 0.5;
    painter.galley(pos, galley, TEXT_COLOR);
    painter.text(
        tile.center_bottom() - egui::vec2(0.0, 16.0),
        Align2::CENTER_BOTTOM,
        "no cover",
        FontId::proportional(12.0),
        TEXT_COLOR.gamma_multiply(0.5),
    );
}
