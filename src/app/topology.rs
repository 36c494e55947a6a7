//! Topology explorer tab

use eframe::egui;

use super::scene::show_scene;
use super::{stat_tiles, GuideApp};
use crate::core::topology::Level;
use crate::theme::colors;

impl GuideApp {
    pub(crate) fn render_topology_tab(&mut self, ui: &mut egui::Ui) {
        Self::section_title(ui, "Cluster Topology Explorer", "From one GPU to the full fabric");

        let level = self.topology.level();
        ui.horizontal_wrapped(|ui| {
            for &l in Level::ORDER {
                if ui.selectable_label(level == l, l.info().label).clicked() {
                    self.topology.select(l);
                }
            }
        });
        ui.add_space(6.0);

        let level = self.topology.level();
        let info = level.info();
        Self::card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui| {
                show_scene(ui, &level.diagram(), 560.0);
            });
            ui.add_space(6.0);
            ui.label(info.description);
            ui.add_space(6.0);
            stat_tiles(
                ui,
                &[
                    ("GPU Count", info.gpu_count.to_string()),
                    ("Bandwidth", info.bandwidth.to_string()),
                    ("Latency", info.latency.to_string()),
                ],
            );
            ui.add_space(6.0);
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new("Verification note:").strong());
                ui.label(egui::RichText::new(info.observable).color(colors::TEXT_SECONDARY));
            });
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(self.topology.can_zoom_in(), egui::Button::new("Zoom In"))
                .clicked()
            {
                self.topology.zoom_in();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(self.topology.can_zoom_out(), egui::Button::new("Zoom Out"))
                    .clicked()
                {
                    self.topology.zoom_out();
                }
            });
        });
    }
}
