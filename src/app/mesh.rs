//! Background particle mesh drawn with egui shapes

use eframe::egui;
use tracing::debug;

use super::GuideApp;
use crate::core::mesh::{MeshPainter, NODE_RADIUS, PACKET_RADIUS};
use crate::theme::{colors, mesh_color};

/// Collects one mesh frame as egui shapes, offset to the panel origin
pub(crate) struct ShapePainter {
    origin: egui::Pos2,
    pub(crate) shapes: Vec<egui::Shape>,
}

impl ShapePainter {
    pub(crate) fn new(origin: egui::Pos2) -> Self {
        Self {
            origin,
            shapes: Vec::new(),
        }
    }

    fn at(&self, p: [f32; 2]) -> egui::Pos2 {
        self.origin + egui::vec2(p[0], p[1])
    }
}

impl MeshPainter for ShapePainter {
    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn link(&mut self, from: [f32; 2], to: [f32; 2], opacity: f32) {
        self.shapes.push(egui::Shape::line_segment(
            [self.at(from), self.at(to)],
            egui::Stroke::new(1.0, mesh_color(opacity)),
        ));
    }

    fn packet(&mut self, at: [f32; 2]) {
        self.shapes.push(egui::Shape::circle_filled(
            self.at(at),
            PACKET_RADIUS,
            mesh_color(colors::MESH_PACKET_ALPHA),
        ));
    }

    fn node(&mut self, at: [f32; 2]) {
        self.shapes.push(egui::Shape::circle_filled(
            self.at(at),
            NODE_RADIUS,
            mesh_color(colors::MESH_NODE_ALPHA),
        ));
    }
}

impl GuideApp {
    /// Drive one mesh frame against `rect`, reporting size changes first.
    pub(crate) fn paint_mesh(&mut self, ui: &egui::Ui, rect: egui::Rect, now: f64) {
        let size = [rect.width(), rect.height()];
        let surface = (rect.area() > 0.0).then_some(size);

        if surface.is_some() && self.mesh_surface != surface {
            if self.mesh_surface.is_some() {
                debug!(width = size[0], height = size[1], "Mesh surface resized");
                self.mesh.on_resize(size);
            }
            self.mesh_surface = surface;
        }

        let Some(handle) = self.mesh_frame else {
            return;
        };
        let mut painter = ShapePainter::new(rect.min);
        self.mesh_frame = self.mesh.on_frame(handle, surface, now, &mut painter);
        ui.painter().with_clip_rect(rect).extend(painter.shapes);
    }

    /// Start or stop the background animation
    pub(crate) fn set_mesh_enabled(&mut self, enabled: bool) {
        match (enabled, self.mesh_frame.is_some()) {
            (true, false) => {
                self.mesh_frame = Some(self.mesh.mount());
            }
            (false, true) => {
                self.mesh.unmount();
                self.mesh_frame = None;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mesh::{Mesh, Point};
    use crate::core::MeshConfig;

    #[test]
    fn test_shapes_offset_by_origin_and_cleared() {
        let mut mesh = Mesh::new(MeshConfig::default());
        mesh.set_points(
            [100.0, 100.0],
            vec![
                Point { x: 10.0, y: 10.0, vx: 0.0, vy: 0.0 },
                Point { x: 20.0, y: 10.0, vx: 0.0, vy: 0.0 },
            ],
        );

        let mut painter = ShapePainter::new(egui::pos2(5.0, 7.0));
        painter.shapes.push(egui::Shape::Noop);
        let stats = mesh.render(0.0, &mut painter);

        // stale shape cleared; link + nodes (+ packet if in phase)
        assert_eq!(painter.shapes.len(), stats.links + stats.packets + stats.nodes);
        let last = painter.shapes.last().expect("node shape");
        match last {
            egui::Shape::Circle(c) => assert_eq!(c.center, egui::pos2(25.0, 17.0)),
            other => panic!("unexpected shape {:?}", other),
        }
    }
}
