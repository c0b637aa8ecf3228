//! User interface for the focus city app.
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main CityApp
//! - `canvas` - Board view input: pan, pinch and wheel gestures
//! - `rendering` - Drawing the tile grid and building sprites
//! - `focus_screen` - Countdown, reward picker and session completion
//! - `city_screen` - City stats and the board view

mod canvas;
mod city_screen;
mod focus_screen;
mod rendering;
mod state;

pub use state::{AppSettings, BoardViewState, CityApp, CityScreenState, FocusScreenState, Tab};

use crate::constants::APP_STATE_KEY;
use eframe::egui;

impl eframe::App for CityApp {
    /// Persist user settings between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings.focus_minutes = self.focus.timer.duration_secs() / 60;
        match self.settings.to_json() {
            Ok(json) => {
                storage.set_string(APP_STATE_KEY, json);
            }
            Err(err) => {
                log::error!("Failed to serialize app state: {err}");
            }
        }
    }

    /// Main update function called by egui for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

impl CityApp {
    /// Restores settings saved by a previous session, falling back to defaults.
    pub fn restore_settings(storage: Option<&dyn eframe::Storage>) -> AppSettings {
        let Some(json) = storage.and_then(|s| s.get_string(APP_STATE_KEY)) else {
            return AppSettings::default();
        };
        match AppSettings::from_json(&json) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Ignoring unreadable app state: {err}");
                AppSettings::default()
            }
        }
    }

    /// Lays out one frame of the whole app.
    pub fn show(&mut self, ctx: &egui::Context) {
        let visuals = if self.settings.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        // The timer keeps counting while the city screen is visible.
        self.advance_timer(ctx);

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Focus => self.draw_focus_screen(ui),
            Tab::City => self.draw_city_screen(ui),
        });

        if self.focus.show_reward_picker {
            self.draw_reward_picker(ctx);
        }
    }

    /// Draws the tab switch and display toggles.
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut tab = self.tab;
            ui.selectable_value(&mut tab, Tab::Focus, "⏱ Focus");
            ui.selectable_value(&mut tab, Tab::City, "🏙 City");
            self.select_tab(tab);

            ui.separator();
            ui.checkbox(&mut self.settings.show_grid, "Grid");
            ui.checkbox(&mut self.settings.demo_fallback, "Demo building");

            let theme_label = if self.settings.dark_mode { "☀ Light" } else { "🌙 Dark" };
            if ui.button(theme_label).clicked() {
                self.settings.dark_mode = !self.settings.dark_mode;
            }
        });
    }
}

#[cfg(test)]
mod tests;
