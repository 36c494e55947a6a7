//! Paints a [`Scene`] into the available width, preserving its aspect ratio

use eframe::egui;

use crate::core::scene::{Anchor, Primitive, Rect, Scene, Stroke, Text};
use crate::theme::paint_color;

/// Maps view-box coordinates into a screen rect
#[derive(Debug, Clone, Copy)]
pub(crate) struct ViewBox {
    origin: egui::Pos2,
    scale: f32,
}

impl ViewBox {
    pub(crate) fn fit(scene: &Scene, rect: egui::Rect) -> Self {
        let scale = if scene.width > 0.0 && scene.height > 0.0 {
            (rect.width() / scene.width).min(rect.height() / scene.height)
        } else {
            1.0
        };
        Self {
            origin: rect.min,
            scale,
        }
    }

    pub(crate) fn pos(&self, p: [f32; 2]) -> egui::Pos2 {
        self.origin + egui::vec2(p[0], p[1]) * self.scale
    }

    fn len(&self, v: f32) -> f32 {
        v * self.scale
    }
}

fn stroke_shapes(
    view: &ViewBox,
    from: egui::Pos2,
    to: egui::Pos2,
    stroke: &Stroke,
    opacity: f32,
) -> Vec<egui::Shape> {
    let egui_stroke = egui::Stroke::new(
        view.len(stroke.width),
        paint_color(stroke.paint).gamma_multiply(opacity),
    );
    match stroke.dash {
        Some((dash, gap)) => {
            egui::Shape::dashed_line(&[from, to], egui_stroke, view.len(dash), view.len(gap))
        }
        None => vec![egui::Shape::line_segment([from, to], egui_stroke)],
    }
}

fn paint_rect(painter: &egui::Painter, view: &ViewBox, r: &Rect) {
    let rect = egui::Rect::from_min_size(
        view.pos(r.min),
        egui::vec2(view.len(r.size[0]), view.len(r.size[1])),
    );
    let radius = view.len(r.radius);

    if let Some(fill) = r.fill {
        painter.rect_filled(rect, radius, paint_color(fill).gamma_multiply(r.opacity));
    }
    let Some(stroke) = &r.stroke else {
        return;
    };
    if stroke.dash.is_some() {
        // square corners; dashes follow the four edges
        let corners = [
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
        ];
        for i in 0..4 {
            painter.extend(stroke_shapes(
                view,
                corners[i],
                corners[(i + 1) % 4],
                stroke,
                r.opacity,
            ));
        }
    } else {
        painter.rect_stroke(
            rect,
            radius,
            egui::Stroke::new(
                view.len(stroke.width),
                paint_color(stroke.paint).gamma_multiply(r.opacity),
            ),
            egui::StrokeKind::Inside,
        );
    }
}

fn paint_text(painter: &egui::Painter, view: &ViewBox, t: &Text) {
    let align = match t.anchor {
        Anchor::Start => egui::Align2::LEFT_BOTTOM,
        Anchor::Middle => egui::Align2::CENTER_BOTTOM,
    };
    let font = if t.bold {
        egui::FontId::monospace(view.len(t.size))
    } else {
        egui::FontId::proportional(view.len(t.size))
    };
    // y is the baseline; let descenders hang below it
    let at = view.pos(t.at) + egui::vec2(0.0, view.len(t.size) * 0.25);
    painter.text(at, align, &t.text, font, paint_color(t.paint));
}

/// Allocate space for `scene` at up to `max_width` and paint it
pub(crate) fn show_scene(ui: &mut egui::Ui, scene: &Scene, max_width: f32) -> egui::Response {
    let width = ui.available_width().min(max_width);
    let height = if scene.width > 0.0 {
        width * scene.height / scene.width
    } else {
        0.0
    };
    let (response, painter) = ui.allocate_painter(egui::vec2(width, height), egui::Sense::hover());
    let view = ViewBox::fit(scene, response.rect);

    for item in &scene.items {
        match item {
            Primitive::Rect(r) => paint_rect(&painter, &view, r),
            Primitive::Line(l) => painter.extend(stroke_shapes(
                &view,
                view.pos(l.from),
                view.pos(l.to),
                &l.stroke,
                l.opacity,
            )),
            Primitive::Circle(c) => {
                painter.circle_filled(
                    view.pos(c.center),
                    view.len(c.radius),
                    paint_color(c.fill).gamma_multiply(c.opacity),
                );
            }
            Primitive::Text(t) => paint_text(&painter, &view, t),
        }
    }

    response
}
