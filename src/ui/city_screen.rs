//! City screen: stats header and the isometric board.

use super::state::CityApp;
use eframe::egui;

impl CityApp {
    /// Renders the city screen.
    pub(super) fn draw_city_screen(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading(egui::RichText::new("Your City").size(28.0).strong());
        });
        ui.add_space(10.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("Buildings: {}", self.city.records.len()))
                        .size(18.0)
                        .strong(),
                );
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("City value: {} coins", self.city.city_value()))
                        .size(18.0)
                        .strong(),
                );
            });
        });
        ui.add_space(10.0);

        let objects = self.city.placed_objects(self.settings.demo_fallback);
        self.board
            .show(ui, &objects, self.settings.show_grid, self.board_config);
    }
}
