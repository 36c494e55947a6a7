//! Training compute calculator

use eframe::egui;

use super::{stat_tiles, GuideApp};
use crate::core::flops::{
    format_energy, format_flops, format_memory, format_power, TokenUnit, GPU_OPTIONS, MFU_MAX,
    MFU_MIN, PUE,
};
use crate::theme::colors;

impl GuideApp {
    pub(crate) fn render_calculator_tab(&mut self, ui: &mut egui::Ui) {
        Self::section_title(
            ui,
            "FLOP Accounting Calculator",
            "Estimate compute requirements for training runs",
        );

        Self::card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            self.calculator_inputs(ui);
        });
        ui.add_space(8.0);
        Self::card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            self.calculator_results(ui);
        });
    }

    fn calculator_inputs(&mut self, ui: &mut egui::Ui) {
        let inputs = &mut self.calculator;

        egui::Grid::new("flop_inputs")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Model parameters");
                ui.horizontal(|ui| {
                    ui.add(egui::TextEdit::singleline(&mut inputs.params).desired_width(90.0));
                    ui.label(egui::RichText::new("billion").color(colors::TEXT_MUTED));
                });
                ui.end_row();

                ui.label("Training tokens");
                ui.horizontal(|ui| {
                    ui.add(egui::TextEdit::singleline(&mut inputs.tokens).desired_width(90.0));
                    egui::ComboBox::from_id_salt("token_unit")
                        .selected_text(inputs.token_unit.label())
                        .show_ui(ui, |ui| {
                            for unit in [TokenUnit::Trillion, TokenUnit::Billion] {
                                ui.selectable_value(&mut inputs.token_unit, unit, unit.label());
                            }
                        });
                });
                ui.end_row();

                ui.label("GPU type");
                egui::ComboBox::from_id_salt("gpu_type")
                    .width(260.0)
                    .selected_text(inputs.gpu().name)
                    .show_ui(ui, |ui| {
                        for (i, gpu) in GPU_OPTIONS.iter().enumerate() {
                            let text = format!(
                                "{} \u{2014} {} PFLOPS, {} GB",
                                gpu.name, gpu.pflops, gpu.memory_gb
                            );
                            ui.selectable_value(&mut inputs.gpu_index, i, text);
                        }
                    });
                ui.end_row();

                ui.label("GPU count");
                ui.add(egui::TextEdit::singleline(&mut inputs.gpu_count).desired_width(90.0));
                ui.end_row();

                ui.label(format!("MFU: {}%", inputs.mfu_percent));
                ui.add(
                    egui::Slider::new(&mut inputs.mfu_percent, MFU_MIN..=MFU_MAX)
                        .clamping(egui::SliderClamping::Always)
                        .show_value(false),
                );
                ui.end_row();
            });
        ui.label(
            egui::RichText::new("10% (poor) \u{00B7} 40% (typical) \u{00B7} 70% (excellent)")
                .small()
                .color(colors::TEXT_MUTED),
        );
    }

    fn calculator_results(&self, ui: &mut egui::Ui) {
        let est = self.calculator.estimate();
        let gpu = est.gpu.short_name();

        stat_tiles(
            ui,
            &[
                ("Total FLOP", format_flops(est.total_flops)),
                ("Training time", est.training_time_label()),
                ("Min. GPUs (memory)", est.min_gpus_for_memory.to_string()),
                ("Energy", format_energy(est.energy_mwh)),
            ],
        );

        if est.memory_shortfall() {
            ui.add_space(6.0);
            ui.colored_label(
                colors::PLANNED,
                format!(
                    "{n} GPUs may not have enough aggregate memory. The model training state needs ~{need} but {n} {gpu} GPUs provide {have}.",
                    n = est.gpus,
                    need = format_memory(est.training_memory_gb),
                    have = format_memory(est.aggregate_memory_gb()),
                ),
            );
        }

        ui.add_space(8.0);
        ui.label(format!(
            "Verification note: a {}B parameter model training on {} {} GPUs would draw ~{} of IT power. At PUE {}, that's ~{} total facility power. This power signature is detectable at the facility level and is difficult to fake.",
            est.params_b,
            est.gpus,
            gpu,
            format_power(est.it_power_mw),
            PUE,
            format_power(est.facility_power_mw()),
        ));
    }
}
