//! Field guide app
//!
//! One egui app hosting every widget behind a tab bar, with the particle
//! mesh painted behind the central panel.

mod calculator;
mod clusters;
mod header;
mod mesh;
mod quiz;
mod scene;
mod settings;
mod timeline;
mod topology;
mod visibility;

use eframe::egui;
use tracing::info;

use crate::core::quiz::{concept_checks, scenarios};
use crate::core::{
    CalculatorInputs, ConceptCheck, FrameHandle, GuideConfig, MeshAnimator, PowerTimeline,
    ReadingProgress, Scenario, TopologyExplorer, ViewState, VisibilityMap,
};
use crate::theme::{colors, guide_visuals};

/// Active tab in the guide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    #[default]
    Clusters,
    Compute,
    Power,
    Topology,
    Visibility,
    Quiz,
}

impl ActiveTab {
    pub const ALL: &'static [ActiveTab] = &[
        ActiveTab::Clusters,
        ActiveTab::Compute,
        ActiveTab::Power,
        ActiveTab::Topology,
        ActiveTab::Visibility,
        ActiveTab::Quiz,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActiveTab::Clusters => "Clusters",
            ActiveTab::Compute => "Compute",
            ActiveTab::Power => "Power",
            ActiveTab::Topology => "Topology",
            ActiveTab::Visibility => "Visibility",
            ActiveTab::Quiz => "Check",
        }
    }
}

pub struct GuideApp {
    pub(crate) config: GuideConfig,
    pub(crate) fps_counter: header::FpsCounter,
    pub(crate) active_tab: ActiveTab,
    pub(crate) show_settings: bool,

    /// Background mesh and its pending frame (None while unmounted)
    pub(crate) mesh: MeshAnimator,
    pub(crate) mesh_frame: Option<FrameHandle>,
    /// Last surface size reported to the mesh
    pub(crate) mesh_surface: Option<[f32; 2]>,

    pub(crate) clusters: ViewState,
    pub(crate) calculator: CalculatorInputs,
    pub(crate) timeline: PowerTimeline,
    pub(crate) topology: TopologyExplorer,
    pub(crate) visibility: VisibilityMap,
    pub(crate) checks: Vec<ConceptCheck>,
    pub(crate) scenarios: Vec<Scenario>,
    pub(crate) progress: ReadingProgress,
}

impl GuideApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: GuideConfig) -> Self {
        cc.egui_ctx.set_visuals(guide_visuals());

        let mut mesh = MeshAnimator::new(config.mesh.clone());
        let mesh_frame = Some(mesh.mount());
        info!(canvas = %config.canvas_id, "Field guide started");

        Self {
            config,
            fps_counter: header::FpsCounter::new(),
            active_tab: ActiveTab::default(),
            show_settings: false,
            mesh,
            mesh_frame,
            mesh_surface: None,
            clusters: ViewState::default(),
            calculator: CalculatorInputs::default(),
            timeline: PowerTimeline::default(),
            topology: TopologyExplorer::default(),
            visibility: VisibilityMap::default(),
            checks: concept_checks(),
            scenarios: scenarios(),
            progress: ReadingProgress::default(),
        }
    }

    /// Shared card frame for widget panels
    pub(crate) fn card_frame() -> egui::Frame {
        egui::Frame::new()
            .fill(colors::BG_ELEVATED.gamma_multiply(0.92))
            .stroke(egui::Stroke::new(1.0, colors::BORDER))
            .corner_radius(6.0)
            .inner_margin(12.0)
    }

    pub(crate) fn section_title(ui: &mut egui::Ui, title: &str, subtitle: &str) {
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new(title).strong().size(16.0));
            ui.label(egui::RichText::new(subtitle).color(colors::TEXT_MUTED));
        });
        ui.add_space(6.0);
    }

    fn render_tab(&mut self, ui: &mut egui::Ui) {
        match self.active_tab {
            ActiveTab::Clusters => self.render_clusters_tab(ui),
            ActiveTab::Compute => self.render_calculator_tab(ui),
            ActiveTab::Power => self.render_timeline_tab(ui),
            ActiveTab::Topology => self.render_topology_tab(ui),
            ActiveTab::Visibility => self.render_visibility_tab(ui),
            ActiveTab::Quiz => self.render_quiz_tab(ui),
        }
    }

    /// Thin bar along the top edge of the content area
    fn draw_reading_progress(&self, ui: &egui::Ui, rect: egui::Rect) {
        if !self.progress.is_visible() {
            return;
        }
        let width = rect.width() * self.progress.percent() / 100.0;
        let bar = egui::Rect::from_min_size(rect.min, egui::vec2(width, 3.0));
        ui.painter().rect_filled(bar, 0.0, colors::ACCENT);
    }
}

/// Row of label/value tiles
pub(crate) fn stat_tiles(ui: &mut egui::Ui, tiles: &[(&str, String)]) {
    ui.horizontal_wrapped(|ui| {
        for (label, value) in tiles {
            egui::Frame::new()
                .stroke(egui::Stroke::new(1.0, colors::BORDER))
                .corner_radius(4.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(*label).small().color(colors::TEXT_MUTED));
                        ui.label(egui::RichText::new(value).strong().size(15.0));
                    });
                });
        }
    });
}

impl eframe::App for GuideApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Mesh animates continuously
        ctx.request_repaint();
        let now = ctx.input(|i| i.time);

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY).inner_margin(6.0))
            .show(ctx, |ui| {
                self.render_header(ui, now);
            });

        if self.show_settings {
            self.render_settings(ctx);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.paint_mesh(ui, rect, now);

                let output = egui::ScrollArea::vertical()
                    .id_salt("guide_content")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.add_space(12.0);
                        ui.vertical_centered(|ui| {
                            ui.set_max_width(880.0_f32.min(ui.available_width()));
                            ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                                self.render_tab(ui);
                            });
                        });
                        ui.add_space(24.0);
                    });

                self.progress.on_scroll(
                    output.state.offset.y,
                    output.content_size.y,
                    output.inner_rect.height(),
                );
                self.draw_reading_progress(ui, rect);
            });
    }
}
