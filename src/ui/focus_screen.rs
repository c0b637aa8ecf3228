//! Focus timer screen: countdown, reward selection and session completion.

use super::state::CityApp;
use crate::reward::{grant_reward, now_millis};
use crate::timer::{format_time, TimerEvent};
use crate::types::BuildingKind;
use eframe::egui;
use std::time::Duration;

impl CityApp {
    /// Advances the countdown by the time elapsed since the previous frame.
    pub fn advance_timer(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        let elapsed = self
            .focus
            .last_frame_time
            .map(|last| now - last)
            .unwrap_or(0.0);
        self.focus.last_frame_time = Some(now);

        if let Some(TimerEvent::Completed) = self.focus.timer.advance(elapsed) {
            self.complete_session();
        }

        if self.focus.timer.is_running() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }

    /// Grants the selected building and refreshes the city list.
    pub fn complete_session(&mut self) {
        let kind = self.settings.selected_reward;
        let outcome = grant_reward(
            self.repository.as_mut(),
            kind,
            self.reward_plot,
            now_millis(),
            &mut rand::rng(),
        );
        if outcome.persisted {
            self.city.records = outcome.records;
        } else {
            log::warn!("New {} is shown but was not saved", kind.name());
            self.city.records.push(outcome.granted.clone());
        }
        self.focus.last_reward = Some(outcome.granted);
    }

    /// Renders the focus screen.
    pub(super) fn draw_focus_screen(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(
                egui::RichText::new(format_time(self.focus.timer.remaining_secs()))
                    .size(48.0)
                    .strong(),
            );
            ui.add_space(20.0);

            let selected = self.settings.selected_reward;
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new("Reward:").weak());
                    ui.label(
                        egui::RichText::new(format!("{} {}", selected.icon(), selected.name()))
                            .size(18.0),
                    );
                    if ui.link("Tap to change").clicked() {
                        self.focus.show_reward_picker = true;
                    }
                });
            });
            ui.add_space(20.0);

            ui.add_enabled_ui(!self.focus.timer.is_running(), |ui| {
                let mut minutes = self.focus.timer.duration_secs() / 60;
                let response = ui.add(
                    egui::DragValue::new(&mut minutes)
                        .range(1..=180)
                        .suffix(" min"),
                );
                if response.changed() {
                    self.focus.timer.set_duration(minutes * 60);
                    self.settings.focus_minutes = minutes;
                }
            });
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                let label = if self.focus.timer.is_running() {
                    "Pause"
                } else {
                    "Start Focus"
                };
                if ui.add(egui::Button::new(label).min_size(egui::vec2(140.0, 36.0))).clicked() {
                    self.focus.timer.toggle();
                }
                if ui.button("Reset").clicked() {
                    self.focus.timer.reset();
                }
            });

            if let Some(record) = &self.focus.last_reward {
                ui.add_space(20.0);
                let name = record
                    .building_kind()
                    .map(|kind| format!("{} {}", kind.icon(), kind.name()))
                    .unwrap_or_else(|| record.kind.clone());
                ui.label(format!(
                    "Session complete! {name} was added to your city at ({}, {}).",
                    record.x, record.y
                ));
            }
        });
    }

    /// Renders the modal window listing the building catalog.
    pub(super) fn draw_reward_picker(&mut self, ctx: &egui::Context) {
        let mut open = true;
        egui::Window::new("Select Building Reward")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .open(&mut open)
            .show(ctx, |ui| {
                egui::Grid::new("reward_options")
                    .num_columns(2)
                    .spacing([12.0, 12.0])
                    .show(ui, |ui| {
                        for (index, kind) in BuildingKind::ALL.into_iter().enumerate() {
                            let is_selected = self.settings.selected_reward == kind;
                            let text = format!(
                                "{}\n{}\n{} coins",
                                kind.icon(),
                                kind.name(),
                                kind.cost()
                            );
                            let button = egui::Button::new(text)
                                .selected(is_selected)
                                .min_size(egui::vec2(150.0, 80.0));
                            if ui.add(button).on_hover_text(kind.description()).clicked() {
                                self.settings.selected_reward = kind;
                                self.focus.show_reward_picker = false;
                            }
                            if index % 2 == 1 {
                                ui.end_row();
                            }
                        }
                    });
                ui.add_space(8.0);
                if ui.button("Done").clicked() {
                    self.focus.show_reward_picker = false;
                }
            });
        if !open {
            self.focus.show_reward_picker = false;
        }
    }
}
