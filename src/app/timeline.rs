//! Rack power density timeline

use eframe::egui;

use super::{stat_tiles, GuideApp};
use crate::core::timeline::{PowerTimeline, GENERATIONS};
use crate::theme::colors;

const BAR_MAX_WIDTH: f32 = 280.0;
const ROW_HEIGHT: f32 = 28.0;

impl GuideApp {
    pub(crate) fn render_timeline_tab(&mut self, ui: &mut egui::Ui) {
        Self::section_title(ui, "Power Density Timeline", "Click a generation to explore");

        Self::card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            for (i, gen) in GENERATIONS.iter().enumerate() {
                let selected = i == self.timeline.selected_index();
                let (rect, response) = ui.allocate_exact_size(
                    egui::vec2(ui.available_width(), ROW_HEIGHT),
                    egui::Sense::click(),
                );
                if response.clicked() {
                    self.timeline.select(i);
                }

                let painter = ui.painter_at(rect);
                if selected || response.hovered() {
                    painter.rect_filled(rect, 4.0, colors::BG_HOVER);
                }
                let text_color = if selected {
                    colors::TEXT_PRIMARY
                } else {
                    colors::TEXT_SECONDARY
                };
                painter.text(
                    rect.left_center() + egui::vec2(8.0, 0.0),
                    egui::Align2::LEFT_CENTER,
                    format!("{}  {}", gen.gpu, gen.year),
                    egui::FontId::proportional(13.0),
                    text_color,
                );

                let track_min = rect.left_center() + egui::vec2(110.0, -6.0);
                let width = BAR_MAX_WIDTH.min(rect.width() - 180.0).max(0.0);
                let fill_width = width * PowerTimeline::bar_fraction(gen) as f32;
                painter.rect_filled(
                    egui::Rect::from_min_size(track_min, egui::vec2(fill_width, 12.0)),
                    3.0,
                    if selected { colors::PLANNED } else { colors::PLANNED.gamma_multiply(0.55) },
                );
                painter.text(
                    track_min + egui::vec2(fill_width + 6.0, 6.0),
                    egui::Align2::LEFT_CENTER,
                    format!("{} kW", gen.rack_power_kw),
                    egui::FontId::proportional(12.0),
                    text_color,
                );
            }
        });

        ui.add_space(8.0);
        let gen = self.timeline.selected();
        Self::card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(
                egui::RichText::new(format!("{} ({}) \u{2014} {}", gen.name, gen.gpu, gen.year))
                    .strong()
                    .size(15.0),
            );
            ui.add_space(4.0);
            stat_tiles(
                ui,
                &[
                    ("TDP / GPU", format!("{} W", gen.tdp_watts)),
                    ("Memory", format!("{} GB {}", gen.memory_gb, gen.memory_type)),
                    ("Compute", format!("{} PFLOPS {}", gen.compute_pflops, gen.compute_unit)),
                    ("Cooling", gen.cooling.to_string()),
                ],
            );
            if let Some(coolant) = gen.coolant_temp {
                ui.label(egui::RichText::new(format!("Coolant: {}", coolant)).color(colors::TEXT_SECONDARY));
            }
            ui.label(gen.notes);

            if let Some(m) = self.timeline.multipliers() {
                let base = GENERATIONS[0].gpu;
                ui.add_space(6.0);
                ui.label(
                    egui::RichText::new(format!(
                        "{:.1}x the rack power of {} \u{2014} {:.1}x the compute. Power grew {:.1}x per unit of compute improvement.",
                        m.power,
                        base,
                        m.compute,
                        m.power_per_compute()
                    ))
                    .color(colors::ACCENT),
                );
            }
        });
    }
}
