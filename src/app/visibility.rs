use eframe::egui;

use super::scene::show_scene;
use super::GuideApp;
use crate::core::visibility::PROBES;
use crate::theme::{colors, paint_color};

impl GuideApp {
    pub(crate) fn render_visibility_tab(&mut self, ui: &mut egui::Ui) {
        Self::section_title(
            ui,
            "Network Visibility Map",
            "Select a monitoring probe to see what it can and cannot observe",
        );

        ui.horizontal_wrapped(|ui| {
            for probe in PROBES {
                let active = self.visibility.active() == probe.kind;
                let mut text = egui::RichText::new(probe.label);
                if active {
                    text = text.color(paint_color(probe.color)).strong();
                }
                if ui.selectable_label(active, text).clicked() {
                    self.visibility.select(probe.kind);
                }
            }
        });
        ui.add_space(6.0);

        let probe = self.visibility.probe();
        Self::card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui| {
                show_scene(ui, &self.visibility.diagram(), 600.0);
            });
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(probe.label)
                    .strong()
                    .size(15.0)
                    .color(paint_color(probe.color)),
            );
            ui.label(probe.description);
            ui.add_space(6.0);

            ui.columns(2, |columns| {
                columns[0].label(egui::RichText::new("Visible").strong().color(colors::CORRECT));
                for item in probe.sees {
                    columns[0].label(format!("\u{2022} {}", item));
                }
                columns[1].label(egui::RichText::new("Blind spots").strong().color(colors::WRONG));
                for item in probe.blind {
                    columns[1].label(format!("\u{2022} {}", item));
                }
            });
        });
    }
}
