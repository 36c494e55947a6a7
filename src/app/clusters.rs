//! Cluster catalog: search, category filter, sortable columns, expandable cards

use eframe::egui;

use super::GuideApp;
use crate::core::clusters::{Category, CategoryFilter, Cluster, SortField, CLUSTERS};
use crate::theme::colors;

fn category_color(category: Category) -> egui::Color32 {
    match category {
        Category::Operational => colors::OPERATIONAL,
        Category::Planned => colors::PLANNED,
    }
}

impl GuideApp {
    pub(crate) fn render_clusters_tab(&mut self, ui: &mut egui::Ui) {
        Self::section_title(ui, "AI Training Clusters", "Click a card for details");

        ui.horizontal_wrapped(|ui| {
            let mut search = self.clusters.search.clone();
            let response = ui.add(
                egui::TextEdit::singleline(&mut search)
                    .hint_text("Search clusters...")
                    .desired_width(220.0),
            );
            if response.changed() {
                self.clusters = self.clusters.with_search(&search);
            }

            ui.add_space(8.0);
            for &filter in CategoryFilter::ALL {
                if ui
                    .selectable_label(self.clusters.filter == filter, filter.label())
                    .clicked()
                {
                    self.clusters = self.clusters.with_filter(filter);
                }
            }
        });

        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new("Sort:").color(colors::TEXT_MUTED));
            for &field in SortField::ALL {
                let text = format!("{} {}", field.label(), self.clusters.sort_indicator(field));
                if ui
                    .selectable_label(self.clusters.sort_field == field, text)
                    .clicked()
                {
                    self.clusters = self.clusters.with_sort(field);
                }
            }
        });
        ui.add_space(8.0);

        let rows = self.clusters.view(CLUSTERS);
        let mut toggled = None;
        for cluster in &rows {
            if self.cluster_card(ui, cluster).clicked() {
                toggled = Some(cluster.name);
            }
            ui.add_space(6.0);
        }
        if let Some(name) = toggled {
            self.clusters = self.clusters.with_toggled(name);
        }

        ui.label(
            egui::RichText::new(format!(
                "Showing {} of {} clusters",
                rows.len(),
                CLUSTERS.len()
            ))
            .color(colors::TEXT_MUTED),
        );
    }

    fn cluster_card(&self, ui: &mut egui::Ui, cluster: &Cluster) -> egui::Response {
        let accent = category_color(cluster.category);
        let expanded = self.clusters.is_expanded(cluster.name);

        let inner = Self::card_frame()
            .stroke(egui::Stroke::new(if expanded { 1.5 } else { 1.0 }, accent.gamma_multiply(0.7)))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(cluster.category.label())
                            .small()
                            .color(accent),
                    );
                    ui.label(egui::RichText::new(cluster.name).strong().size(15.0));
                });
                ui.label(egui::RichText::new(cluster.operator).color(colors::TEXT_SECONDARY));

                egui::Grid::new(("cluster_stats", cluster.name))
                    .num_columns(2)
                    .spacing([16.0, 2.0])
                    .show(ui, |ui| {
                        stat(ui, "Accelerators", cluster.accelerator_count);
                        stat(ui, "Power", cluster.power);
                    });

                if expanded {
                    ui.separator();
                    detail(ui, "Location", cluster.location);
                    detail(ui, "Hardware", cluster.hardware);
                    detail(ui, "Networking", cluster.networking);
                    detail(ui, "Status", cluster.status);
                }
            });

        inner.response.interact(egui::Sense::click())
    }
}

fn stat(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.label(egui::RichText::new(label).small().color(colors::TEXT_MUTED));
    ui.label(egui::RichText::new(value).strong());
    ui.end_row();
}

fn detail(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new(format!("{}:", label)).strong());
        ui.label(value);
    });
}
