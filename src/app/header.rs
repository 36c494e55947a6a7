//! Header bar with tabs, settings toggle and frame stats

use std::collections::VecDeque;

use eframe::egui;

use super::{ActiveTab, GuideApp};
use crate::theme::colors;

impl GuideApp {
    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui, now: f64) {
        self.fps_counter.tick(now);

        ui.horizontal(|ui| {
            let settings_text = if self.show_settings { "Settings <<<" } else { "Settings >>>" };
            if ui.button(egui::RichText::new(settings_text)).clicked() {
                self.show_settings = !self.show_settings;
            }

            ui.add_space(10.0);
            ui.label(egui::RichText::new("AI Data Center Field Guide").strong());
            ui.add_space(10.0);

            for &tab in ActiveTab::ALL {
                let color = if self.active_tab == tab {
                    colors::TEXT_PRIMARY
                } else {
                    colors::TEXT_MUTED
                };
                if ui
                    .selectable_label(
                        self.active_tab == tab,
                        egui::RichText::new(tab.label()).color(color),
                    )
                    .clicked()
                {
                    self.active_tab = tab;
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("{:.0} fps", self.fps_counter.fps()))
                        .color(colors::TEXT_SECONDARY),
                );
                if self.mesh.is_mounted() {
                    ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));
                    ui.label(
                        egui::RichText::new(format!("{} nodes", self.mesh.mesh().points().len()))
                            .color(colors::TEXT_MUTED),
                    );
                }
            });
        });
    }
}

/// Rolling frame-rate over the last 60 frames
pub struct FpsCounter {
    frames: VecDeque<f64>,
}

impl FpsCounter {
    const WINDOW: usize = 60;

    pub fn new() -> Self {
        Self {
            frames: VecDeque::with_capacity(Self::WINDOW + 1),
        }
    }

    /// Record a frame at `now` seconds
    pub fn tick(&mut self, now: f64) {
        self.frames.push_back(now);
        if self.frames.len() > Self::WINDOW {
            self.frames.pop_front();
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.front(), self.frames.back()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if elapsed <= 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / elapsed
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
