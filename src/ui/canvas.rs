//! Board view interaction and navigation.
//!
//! This module turns egui input into [`GestureEvent`]s for the viewport reducer:
//! dragging pans the board, two-finger pinches and the scroll wheel zoom it.

use super::state::BoardViewState;
use crate::constants::WHEEL_NOTCH_POINTS;
use crate::types::*;
use crate::viewport::GestureEvent;
use eframe::egui;

impl BoardViewState {
    /// Shows the board: handles gestures, then draws the grid and the buildings.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `objects` - Buildings to render, in any order
    /// * `show_grid` - Whether the background tile grid is drawn
    /// * `config` - Board geometry
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        objects: &[PlacedObject],
        show_grid: bool,
        config: BoardConfig,
    ) -> egui::Response {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());

        self.handle_board_panning(ui, &response);
        self.handle_board_pinch(ui);
        self.handle_board_wheel(ui, &response);

        let now = ui.input(|i| i.time);
        self.viewport.apply(GestureEvent::Tick { now });
        if self.viewport.is_animating() {
            ui.ctx().request_repaint();
        }

        self.render_board(&painter, response.rect, objects, show_grid, config);
        response
    }

    /// Pans the board while the pointer drags across it.
    ///
    /// The translation fed to the reducer is measured from where the press started,
    /// so it is cumulative for the whole gesture.
    pub fn handle_board_panning(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        let panning = self.viewport.pan != crate::viewport::PanPhase::Idle;
        if response.dragged() {
            let origin = ui.input(|i| i.pointer.press_origin());
            if let (Some(origin), Some(current)) = (origin, response.interact_pointer_pos()) {
                if !panning {
                    self.viewport.apply(GestureEvent::PanStart);
                }
                let translation = current - origin;
                self.viewport.apply(GestureEvent::PanMove {
                    translation_x: translation.x,
                    translation_y: translation.y,
                });
            }
        } else if panning {
            self.viewport.apply(GestureEvent::PanEnd);
        }
    }

    /// Zooms with a two-finger pinch.
    ///
    /// egui reports the zoom change per frame; the reported scale is the zoom at pinch
    /// start multiplied by every delta since, so consecutive pinches continue from the
    /// current zoom.
    pub fn handle_board_pinch(&mut self, ui: &mut egui::Ui) {
        let (touch, now) = ui.input(|i| (i.multi_touch(), i.time));
        match touch {
            Some(info) if info.num_touches >= 2 => {
                let baseline = match self.pinch_baseline {
                    Some(baseline) => baseline,
                    None => {
                        self.viewport.apply(GestureEvent::PinchStart);
                        self.pinch_baseline = Some(self.viewport.zoom);
                        self.pinch_scale = 1.0;
                        self.viewport.zoom
                    }
                };
                self.pinch_scale *= info.zoom_delta;
                self.viewport.apply(GestureEvent::PinchMove {
                    scale: baseline * self.pinch_scale,
                });
            }
            _ => {
                if self.pinch_baseline.take().is_some() {
                    self.viewport.apply(GestureEvent::PinchEnd { now });
                }
            }
        }
    }

    /// Zooms one step per wheel notch while the cursor is over the board.
    ///
    /// egui spreads a notch over several frames, so scroll distance is accumulated and
    /// every [`WHEEL_NOTCH_POINTS`] of it becomes one wheel event.
    pub fn handle_board_wheel(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll_delta == 0.0 {
            return;
        }
        let hovering = ui
            .input(|i| i.pointer.hover_pos())
            .is_some_and(|pos| response.rect.contains(pos));
        if !hovering {
            self.wheel_carry = 0.0;
            return;
        }
        self.wheel_carry += scroll_delta;
        while self.wheel_carry.abs() >= WHEEL_NOTCH_POINTS {
            let notch = self.wheel_carry.signum();
            self.viewport.apply(GestureEvent::Wheel { delta: notch });
            self.wheel_carry -= notch * WHEEL_NOTCH_POINTS;
        }
    }
}
