//! Board rendering: background tile grid and building sprites.
//!
//! Everything is projected with the isometric projection, then placed on screen
//! through the board view's viewport transform. The board's bounding box is centred
//! in the canvas before pan and zoom are applied.

use super::state::BoardViewState;
use crate::projection::{board_bounds, depth_sorted, grid_diamonds, project, sprite_rect, tile_diamond};
use crate::types::*;
use eframe::egui;
use eframe::epaint::StrokeKind;

impl BoardViewState {
    /// Converts a projected board point to a screen position inside `canvas_rect`.
    pub fn board_to_screen(
        &self,
        point: ScreenOffset,
        canvas_rect: egui::Rect,
        config: BoardConfig,
    ) -> egui::Pos2 {
        let (min, max) = board_bounds(config);
        let pivot = ScreenOffset::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0);
        let center = canvas_rect.center();
        let screen = self
            .viewport
            .to_screen(point, pivot, ScreenOffset::new(center.x, center.y));
        egui::pos2(screen.x, screen.y)
    }

    /// Renders the board in layers: grid first, then buildings back to front.
    pub fn render_board(
        &self,
        painter: &egui::Painter,
        canvas_rect: egui::Rect,
        objects: &[PlacedObject],
        show_grid: bool,
        config: BoardConfig,
    ) {
        if show_grid {
            self.draw_grid(painter, canvas_rect, config);
        }
        for object in depth_sorted(objects) {
            self.draw_building(painter, canvas_rect, config, object);
        }
    }

    /// Draws one outlined diamond per cell. Purely decorative.
    pub fn draw_grid(&self, painter: &egui::Painter, canvas_rect: egui::Rect, config: BoardConfig) {
        let stroke = egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(0, 0, 0, 26));
        let fill = egui::Color32::from_rgba_unmultiplied(120, 170, 90, 40);
        for diamond in grid_diamonds(config) {
            let points: Vec<egui::Pos2> = diamond
                .iter()
                .map(|vertex| self.board_to_screen(*vertex, canvas_rect, config))
                .collect();
            // Skip cells entirely outside the canvas.
            if !egui::Rect::from_points(&points).intersects(canvas_rect) {
                continue;
            }
            painter.add(egui::Shape::convex_polygon(points, fill, stroke));
        }
    }

    /// Draws a procedural sprite for one building, anchored bottom-centre on its cell.
    pub fn draw_building(
        &self,
        painter: &egui::Painter,
        canvas_rect: egui::Rect,
        config: BoardConfig,
        object: &PlacedObject,
    ) {
        let (min, max) = sprite_rect(config.tile, object);
        let rect = egui::Rect::from_min_max(
            self.board_to_screen(min, canvas_rect, config),
            self.board_to_screen(max, canvas_rect, config),
        );
        if !rect.intersects(canvas_rect) {
            return;
        }

        let kind = object.building_kind();
        let [r, g, b] = kind.map(|k| k.color()).unwrap_or([140, 140, 140]);
        let wall = egui::Color32::from_rgb(r, g, b);
        let shade = egui::Color32::from_rgb(r / 2, g / 2, b / 2);
        let outline = egui::Stroke::new(1.0, shade);

        // Footprint shadow on the building's own cell.
        let footprint: Vec<egui::Pos2> = tile_diamond(config.tile, object.grid)
            .iter()
            .map(|vertex| self.board_to_screen(*vertex, canvas_rect, config))
            .collect();
        painter.add(egui::Shape::convex_polygon(
            footprint,
            egui::Color32::from_rgba_unmultiplied(0, 0, 0, 40),
            egui::Stroke::NONE,
        ));

        // Body: lower part of the sprite, inset from the sides; roof: triangle above it.
        let inset = rect.width() * 0.15;
        let roof_top = rect.top();
        let body_top = rect.top() + rect.height() * 0.3;
        let body = egui::Rect::from_min_max(
            egui::pos2(rect.left() + inset, body_top),
            egui::pos2(rect.right() - inset, rect.bottom()),
        );
        painter.rect_filled(body, 2.0, wall);
        painter.rect_stroke(body, 2.0, outline, StrokeKind::Inside);
        painter.add(egui::Shape::convex_polygon(
            vec![
                egui::pos2(body.left(), body_top),
                egui::pos2(body.center().x, roof_top),
                egui::pos2(body.right(), body_top),
            ],
            shade,
            outline,
        ));

        let anchor = self.board_to_screen(project(config.tile, object.grid), canvas_rect, config);
        painter.circle_filled(anchor, 2.0 * self.viewport.zoom, shade);

        let icon = kind.map(|k| k.icon()).unwrap_or("?");
        let font_size = (body.width() * 0.5).clamp(8.0, 48.0);
        painter.text(
            body.center(),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(font_size),
            egui::Color32::WHITE,
        );
    }
}
