//! Settings sidebar: background mesh toggle and its active tunables

use eframe::egui;

use super::GuideApp;
use crate::theme::colors;

impl GuideApp {
    pub(crate) fn render_settings(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("settings")
            .default_width(240.0)
            .min_width(200.0)
            .resizable(true)
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY).inner_margin(8.0))
            .show(ctx, |ui| {
                let group_frame = egui::Frame::new()
                    .stroke(egui::Stroke::new(1.0, colors::TEXT_MUTED.gamma_multiply(0.6)))
                    .corner_radius(4.0)
                    .inner_margin(6.0);

                group_frame.show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(egui::RichText::new("Background:").color(colors::TEXT_MUTED));

                    let mut enabled = self.mesh_frame.is_some();
                    if ui.checkbox(&mut enabled, "Particle mesh").changed() {
                        self.set_mesh_enabled(enabled);
                    }
                    if enabled {
                        ui.label(
                            egui::RichText::new("  Restarting re-seeds the points")
                                .color(colors::TEXT_MUTED)
                                .small(),
                        );
                    }
                });

                ui.add_space(8.0);

                group_frame.show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(egui::RichText::new("Mesh config:").color(colors::TEXT_MUTED));
                    let mesh = &self.config.mesh;
                    egui::Grid::new("mesh_config").num_columns(2).show(ui, |ui| {
                        for (label, value) in [
                            ("Nodes", mesh.node_count.to_string()),
                            ("Link distance", format!("{:.0} px", mesh.connection_distance)),
                            ("Max speed", format!("{:.2} px/frame", mesh.max_speed)),
                            ("Line alpha", format!("{:.2}", mesh.line_alpha)),
                            ("Packet ratio", format!("{:.2}", mesh.packet_ratio)),
                        ] {
                            ui.label(egui::RichText::new(label).color(colors::TEXT_SECONDARY));
                            ui.label(value);
                            ui.end_row();
                        }
                    });
                    ui.label(
                        egui::RichText::new(format!("Canvas: #{}", self.config.canvas_id))
                            .small()
                            .color(colors::TEXT_MUTED),
                    );
                });
            });
    }
}
