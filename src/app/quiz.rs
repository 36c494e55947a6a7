//! Concept checks and discussion scenarios

use eframe::egui;

use super::GuideApp;
use crate::core::quiz::{ConceptCheck, OptionMark, Scenario};
use crate::theme::colors;

fn render_check(ui: &mut egui::Ui, check: &mut ConceptCheck) {
    let (icon, border) = match check.is_answered() {
        false => ("?", colors::BORDER),
        true if check.is_correct() => ("\u{2713}", colors::CORRECT),
        true => ("\u{2717}", colors::WRONG),
    };

    GuideApp::card_frame()
        .stroke(egui::Stroke::new(1.0, border))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(
                egui::RichText::new(format!("{} Check your understanding", icon))
                    .small()
                    .color(colors::TEXT_MUTED),
            );
            ui.label(egui::RichText::new(&check.question).strong());
            ui.add_space(4.0);

            let mut chosen = None;
            for (i, option) in check.options.iter().enumerate() {
                let mark = check.mark(i);
                let color = match mark {
                    OptionMark::Correct | OptionMark::Missed => colors::CORRECT,
                    OptionMark::Wrong => colors::WRONG,
                    OptionMark::None => colors::TEXT_PRIMARY,
                };
                let suffix = match mark {
                    OptionMark::Correct | OptionMark::Missed => " \u{2713}",
                    OptionMark::Wrong => " \u{2717}",
                    OptionMark::None => "",
                };
                let text = egui::RichText::new(format!("{}{}", option.label, suffix)).color(color);
                let response = ui.add_enabled(
                    !check.is_answered(),
                    egui::RadioButton::new(check.selected() == Some(i), text),
                );
                if response.clicked() {
                    chosen = Some(i);
                }
            }
            if let Some(i) = chosen {
                check.answer(i);
            }

            if check.hint_available() {
                let label = if check.hint_visible() { "Hide hint" } else { "Show hint" };
                if ui.small_button(label).clicked() {
                    check.toggle_hint();
                }
                if let (true, Some(hint)) = (check.hint_visible(), &check.hint) {
                    ui.label(egui::RichText::new(hint).italics().color(colors::TEXT_SECONDARY));
                }
            }

            if let Some(header) = check.result_header() {
                ui.add_space(4.0);
                ui.label(egui::RichText::new(header).strong().color(border));
                ui.label(&check.explanation);
            }
        });
}

fn render_scenario(ui: &mut egui::Ui, scenario: &mut Scenario) {
    GuideApp::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.label(
            egui::RichText::new("What Would You Do?")
                .small()
                .color(colors::ACCENT),
        );
        ui.label(egui::RichText::new(&scenario.title).strong().size(15.0));
        ui.label(&scenario.prompt);
        for q in &scenario.questions {
            ui.label(format!("\u{2022} {}", q));
        }
        if scenario.notes.is_some() {
            if ui.button(scenario.toggle_label()).clicked() {
                scenario.toggle_notes();
            }
            if let (true, Some(notes)) = (scenario.notes_visible(), &scenario.notes) {
                ui.label(egui::RichText::new(notes).color(colors::TEXT_SECONDARY));
            }
        }
    });
}

impl GuideApp {
    pub(crate) fn render_quiz_tab(&mut self, ui: &mut egui::Ui) {
        Self::section_title(ui, "Check Your Understanding", "Answers lock on first pick");

        for (i, check) in self.checks.iter_mut().enumerate() {
            ui.push_id(("concept_check", i), |ui| render_check(ui, check));
            ui.add_space(8.0);
        }
        for (i, scenario) in self.scenarios.iter_mut().enumerate() {
            ui.push_id(("scenario", i), |ui| render_scenario(ui, scenario));
            ui.add_space(8.0);
        }
    }
}
