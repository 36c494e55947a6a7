//! What each monitoring probe can and cannot observe in a rack-scale
//! cluster, plus the diagram that highlights its coverage.

use tracing::debug;

use super::scene::{Anchor, Circle, Line, Paint, Rect, Scene, Stroke, Text};
use super::topology::{GPU_COLOR, IB_COLOR, NVLINK_COLOR};

const DIMMED: f32 = 0.3;
const MUTED: f32 = 0.5;
const NVLINK_ZONE_ALPHA: f32 = 0.12;
const IB_ZONE_ALPHA: f32 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeKind {
    #[default]
    SmartNic,
    Bmc,
    Tap,
    Dcgm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    pub kind: ProbeKind,
    pub label: &'static str,
    pub color: Paint,
    pub description: &'static str,
    pub sees: [&'static str; 4],
    pub blind: [&'static str; 4],
}

pub const PROBES: &[Probe] = &[
    Probe {
        kind: ProbeKind::SmartNic,
        label: "SmartNIC",
        color: Paint::Rgb(230, 81, 0),
        description: "Monitors traffic on InfiniBand ports. Sees all data entering or leaving a node via the network fabric.",
        sees: [
            "Inter-rack InfiniBand traffic (all-reduce across racks)",
            "Storage traffic (checkpoint writes to remote storage)",
            "Control plane traffic (scheduler, health checks)",
            "Cross-SuperPOD and WAN traffic",
        ],
        blind: [
            "NVLink GPU-to-GPU traffic within the rack",
            "Local memory access patterns",
            "GPU compute activity (utilization, kernels running)",
            "Power draw and thermal state",
        ],
    },
    Probe {
        kind: ProbeKind::Bmc,
        label: "BMC",
        color: Paint::Rgb(46, 125, 50),
        description: "Baseboard Management Controller. Hardware-level monitoring of power, temperature, and fan/pump speeds via IPMI/Redfish.",
        sees: [
            "Per-node power consumption (distinctive training signature)",
            "CPU and GPU temperatures",
            "Fan speeds and coolant flow rates",
            "Hardware health (DIMM errors, PSU status)",
        ],
        blind: [
            "What computation is actually running",
            "Network traffic content or patterns",
            "Software-level metrics (loss curves, throughput)",
            "NVLink utilization details",
        ],
    },
    Probe {
        kind: ProbeKind::Tap,
        label: "Network TAP",
        color: Paint::Rgb(106, 27, 154),
        description: "Physical device that creates an exact copy of traffic on a link for analysis. Highest fidelity network monitoring.",
        sees: [
            "Complete packet-level copy of InfiniBand traffic",
            "Traffic timing and flow patterns",
            "Communication topology between nodes",
            "Anomalous or unexpected traffic flows",
        ],
        blind: [
            "NVLink traffic (never touches the IB fabric)",
            "Encrypted payload contents (can see flow metadata)",
            "GPU-internal operations",
            "Traffic on links without a TAP installed",
        ],
    },
    Probe {
        kind: ProbeKind::Dcgm,
        label: "DCGM Agent",
        color: Paint::Rgb(74, 144, 217),
        description: "NVIDIA Data Center GPU Manager. Software agent that reports detailed GPU metrics. Requires trust in the host OS.",
        sees: [
            "GPU SM utilization and memory usage",
            "NVLink bandwidth utilization per GPU",
            "ECC error counts and thermal throttling events",
            "Running process and compute kernel information",
        ],
        blind: [
            "Network traffic patterns",
            "Other nodes' activity",
            "Facility-level power and cooling metrics",
            "Can be spoofed if host OS is compromised",
        ],
    },
];

impl ProbeKind {
    pub fn probe(&self) -> &'static Probe {
        PROBES
            .iter()
            .find(|p| p.kind == *self)
            .unwrap_or(&PROBES[0])
    }

    /// Network probes sit on the InfiniBand boundary
    pub fn on_fabric(&self) -> bool {
        matches!(self, ProbeKind::SmartNic | ProbeKind::Tap)
    }

    /// Marker letter drawn on the IB boundary
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            ProbeKind::SmartNic => Some("S"),
            ProbeKind::Tap => Some("T"),
            _ => None,
        }
    }

    pub fn nvlink_zone_opacity(&self) -> f32 {
        if self.on_fabric() {
            DIMMED
        } else {
            1.0
        }
    }

    pub fn ib_zone_opacity(&self) -> f32 {
        if matches!(self, ProbeKind::Dcgm | ProbeKind::Bmc) {
            DIMMED
        } else {
            1.0
        }
    }

    pub fn gpu_opacity(&self) -> f32 {
        if *self == ProbeKind::Dcgm {
            1.0
        } else {
            MUTED
        }
    }

    pub fn nvlink_bus_opacity(&self) -> f32 {
        if *self == ProbeKind::Dcgm {
            1.0
        } else {
            DIMMED
        }
    }

    pub fn fabric_opacity(&self) -> f32 {
        if self.on_fabric() {
            1.0
        } else {
            MUTED
        }
    }
}

/// Probe selector state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityMap {
    active: ProbeKind,
}

impl VisibilityMap {
    pub fn active(&self) -> ProbeKind {
        self.active
    }

    pub fn select(&mut self, kind: ProbeKind) {
        debug!(?kind, "Probe selected");
        self.active = kind;
    }

    pub fn probe(&self) -> &'static Probe {
        self.active.probe()
    }

    pub fn diagram(&self) -> Scene {
        diagram(self.active)
    }
}

/// Tinted zone with a dashed border; the tint is `fill_alpha` of the border's opacity
fn zone(scene: &mut Scene, x: f32, width: f32, paint: Paint, fill_alpha: f32, opacity: f32) {
    let rect = Rect::new(x, 30.0, width, 170.0).rounded(10.0);
    scene.add(rect.clone().fill(paint).opacity(fill_alpha * opacity));
    scene.add(
        rect.stroke(Stroke::dashed(1.5, paint, 6.0, 3.0))
            .opacity(opacity),
    );
}

pub fn diagram(active: ProbeKind) -> Scene {
    let mut s = Scene::new(500.0, 240.0);

    zone(&mut s, 15.0, 225.0, NVLINK_COLOR, NVLINK_ZONE_ALPHA, active.nvlink_zone_opacity());
    s.add(
        Text::new(127.0, 22.0, "NVLink Domain (intra-rack)", 11.0)
            .paint(NVLINK_COLOR)
            .bold(),
    );
    for i in 0..8 {
        let x = 30.0 + (i % 4) as f32 * 52.0;
        let y = 50.0 + (i / 4) as f32 * 60.0;
        s.add(
            Rect::new(x, y, 40.0, 40.0)
                .rounded(4.0)
                .fill(GPU_COLOR)
                .opacity(active.gpu_opacity()),
        );
        s.add(
            Text::new(x + 20.0, y + 23.0, format!("GPU {}", i), 9.0)
                .paint(Paint::White)
                .bold(),
        );
    }
    for y in [100.0, 160.0] {
        s.add(
            Line::new([30.0, y], [230.0, y], Stroke::solid(2.0, NVLINK_COLOR))
                .opacity(active.nvlink_bus_opacity()),
        );
    }

    s.add(Line::new(
        [260.0, 30.0],
        [260.0, 200.0],
        Stroke::dashed(2.5, IB_COLOR, 8.0, 4.0),
    ));
    s.add(
        Text::new(262.0, 215.0, "IB boundary", 8.0)
            .paint(IB_COLOR)
            .bold()
            .anchor(Anchor::Start),
    );

    zone(&mut s, 275.0, 210.0, IB_COLOR, IB_ZONE_ALPHA, active.ib_zone_opacity());
    s.add(
        Text::new(380.0, 22.0, "InfiniBand Fabric (inter-rack)", 11.0)
            .paint(IB_COLOR)
            .bold(),
    );
    for i in 0..3 {
        let x = 290.0 + i as f32 * 60.0;
        s.add(
            Rect::new(x, 55.0, 50.0, 24.0)
                .rounded(4.0)
                .fill(IB_COLOR)
                .opacity(active.fabric_opacity()),
        );
        s.add(Text::new(x + 25.0, 70.0, format!("Switch {}", i), 8.0).paint(Paint::White));
    }
    for i in 0..3 {
        let x = 290.0 + i as f32 * 60.0;
        s.add(
            Rect::new(x, 110.0, 50.0, 60.0)
                .rounded(4.0)
                .stroke(Stroke::solid(1.5, Paint::Outline))
                .opacity(active.fabric_opacity()),
        );
        s.add(Text::new(x + 25.0, 128.0, format!("Rack {}", i + 1), 8.0).bold());
        for j in 0..4 {
            s.add(
                Rect::new(x + 6.0 + j as f32 * 11.0, 138.0, 9.0, 22.0)
                    .rounded(2.0)
                    .fill(GPU_COLOR)
                    .opacity(MUTED),
            );
        }
        s.add(Line::new(
            [x + 25.0, 110.0],
            [x + 25.0, 80.0],
            Stroke::solid(1.0, IB_COLOR),
        ));
    }

    if active == ProbeKind::Bmc {
        s.add(
            Rect::new(70.0, 145.0, 110.0, 20.0)
                .rounded(3.0)
                .fill(NVLINK_COLOR)
                .opacity(0.8),
        );
        s.add(Text::new(125.0, 158.0, "BMC: power, temp, fans", 8.0).paint(Paint::White));
    }

    if let Some(marker) = active.marker() {
        s.add(Circle::new([260.0, 115.0], 8.0, active.probe().color).opacity(0.9));
        s.add(
            Text::new(260.0, 118.0, marker, 7.0)
                .paint(Paint::White)
                .bold(),
        );
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::Primitive;

    fn gpu_opacities(scene: &Scene) -> Vec<f32> {
        scene
            .rects()
            .filter(|r| r.fill == Some(GPU_COLOR) && r.size == [40.0, 40.0])
            .map(|r| r.opacity)
            .collect()
    }

    fn has_circle(scene: &Scene) -> bool {
        scene.items.iter().any(|p| matches!(p, Primitive::Circle(_)))
    }

    #[test]
    fn test_default_probe_is_smartnic() {
        let map = VisibilityMap::default();
        assert_eq!(map.probe().label, "SmartNIC");
        assert_eq!(map.probe().color, IB_COLOR);
    }

    #[test]
    fn test_every_probe_has_four_each() {
        for probe in PROBES {
            assert_eq!(probe.kind.probe(), probe);
            assert!(probe.sees.iter().all(|s| !s.is_empty()));
            assert!(probe.blind.iter().all(|s| !s.is_empty()));
        }
    }

    #[test]
    fn test_zone_emphasis_rules() {
        assert_eq!(ProbeKind::SmartNic.nvlink_zone_opacity(), DIMMED);
        assert_eq!(ProbeKind::Tap.nvlink_zone_opacity(), DIMMED);
        assert_eq!(ProbeKind::Dcgm.nvlink_zone_opacity(), 1.0);
        assert_eq!(ProbeKind::Dcgm.ib_zone_opacity(), DIMMED);
        assert_eq!(ProbeKind::Bmc.ib_zone_opacity(), DIMMED);
        assert_eq!(ProbeKind::Tap.ib_zone_opacity(), 1.0);
    }

    #[test]
    fn test_gpus_bright_only_for_dcgm() {
        let dcgm = diagram(ProbeKind::Dcgm);
        assert_eq!(gpu_opacities(&dcgm), vec![1.0; 8]);
        let nic = diagram(ProbeKind::SmartNic);
        assert_eq!(gpu_opacities(&nic), vec![MUTED; 8]);
    }

    #[test]
    fn test_markers_and_badge() {
        let mut map = VisibilityMap::default();
        let scene = map.diagram();
        assert!(has_circle(&scene));
        assert!(scene.texts().any(|t| t.text == "S"));

        map.select(ProbeKind::Tap);
        assert!(map.diagram().texts().any(|t| t.text == "T"));

        map.select(ProbeKind::Bmc);
        let scene = map.diagram();
        assert!(!has_circle(&scene));
        assert!(scene.texts().any(|t| t.text.starts_with("BMC:")));

        map.select(ProbeKind::Dcgm);
        let scene = map.diagram();
        assert!(!has_circle(&scene));
        assert!(!scene.texts().any(|t| t.text.starts_with("BMC:")));
    }
}
